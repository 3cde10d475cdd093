use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
  board::{Board, Node, PlaceSymbolError},
  event::{EventBus, GameEvent, Subscription},
  pos::{GlobalPos, OuterPos},
  Marker, Player,
};

/// The game controller: turn order, move legality and lock propagation
/// on top of the board hierarchy.
#[derive(Debug)]
pub struct Game {
  board: Board,
  /// fixed turn order, starting player first
  players: [Player; 2],
  turn: usize,
  status: GameStatus,
  history: Vec<Move>,
  observers: EventBus,
}

impl Game {
  pub fn new(starting_player: Player) -> Self {
    Self {
      board: Board::new_root(),
      players: [starting_player, starting_player.other()],
      turn: 0,
      status: GameStatus::InProgress,
      history: Vec::new(),
      observers: EventBus::default(),
    }
  }

  /// The only mutator of a game.
  ///
  /// Either the move is accepted and the produced events are returned
  /// (after being delivered to every observer), or nothing changes.
  pub fn submit_move(
    &mut self,
    pos: impl Into<GlobalPos>,
    player: Player,
  ) -> Result<Vec<GameEvent>, MoveError> {
    let pos = pos.into();
    if let Err(e) = self.check_move(player, pos) {
      debug!(?player, ?pos, %e, "move rejected");
      return Err(e);
    }

    let mut events = self
      .board
      .place_marker(pos, Marker::from(player))
      .map_err(MoveError::AlreadyDecided)?;
    self.history.push(Move { player, pos });
    debug!(?player, ?pos, "move accepted");

    match self.board.marker() {
      Some(marker) => {
        info!(?marker, nmoves = self.history.len(), "game finished");
        self.status = GameStatus::Finished(marker);
        events.push(GameEvent::GameFinished(marker));
      }
      None => {
        self.propagate_locks(pos, &mut events);
        self.turn = 1 - self.turn;
      }
    }

    self.observers.dispatch(&events);
    Ok(events)
  }

  pub fn could_play_move(&self, player: Player, pos: GlobalPos) -> bool {
    self.check_move(player, pos).is_ok()
  }

  /// All positions the current player may play.
  pub fn legal_moves(&self) -> impl Iterator<Item = GlobalPos> + '_ {
    let player = self.current_player();
    GlobalPos::all().filter(move |&pos| self.could_play_move(player, pos))
  }

  pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + Send + 'static) -> Subscription {
    self.observers.subscribe(observer)
  }
  pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
    self.observers.unsubscribe(subscription)
  }

  pub fn board(&self) -> &Board {
    &self.board
  }
  pub fn current_player(&self) -> Player {
    self.players[self.turn]
  }
  pub fn status(&self) -> GameStatus {
    self.status
  }
  pub fn is_finished(&self) -> bool {
    matches!(self.status, GameStatus::Finished(_))
  }
  pub fn outcome(&self) -> Option<Outcome> {
    match self.status {
      GameStatus::InProgress => None,
      GameStatus::Finished(marker) => Some(marker.into()),
    }
  }
  pub fn history(&self) -> &[Move] {
    &self.history
  }

  /// The sub-board the current player is restricted to, `None` in free mode.
  pub fn designated_board(&self) -> Option<OuterPos> {
    if self.is_finished() || !self.board.is_locked() {
      return None;
    }
    OuterPos::all().find(|&outer| !self.board.sub_board(outer).is_locked())
  }
}

// private methods
impl Game {
  fn check_move(&self, player: Player, pos: GlobalPos) -> Result<(), MoveError> {
    if self.is_finished() {
      return Err(MoveError::GameOver);
    }
    if player != self.current_player() {
      return Err(MoveError::NotYourTurn);
    }
    // restricted mode and not the designated board
    if self.board.is_locked() && self.board.sub_board(pos.outer()).is_locked() {
      return Err(MoveError::IllegalMove);
    }
    self
      .board
      .could_place_at(pos)
      .map_err(MoveError::AlreadyDecided)
  }

  /// Closes the board just played in and opens the board the opponent got sent to.
  /// If that board is already decided the unlock is refused and play becomes free.
  fn propagate_locks(&mut self, pos: GlobalPos, events: &mut Vec<GameEvent>) {
    self.board.sub_board_mut(pos.outer()).lock(events);
    let next = pos.inner().as_outer();
    let restricted = !self.board.sub_board_mut(next).unlock(events);
    self.board.set_lock(restricted, events);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
  InProgress,
  Finished(Marker),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
  pub player: Player,
  pub pos: GlobalPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
  Win(Player),
  Draw,
}

impl From<Marker> for Outcome {
  fn from(marker: Marker) -> Self {
    match marker {
      Marker::Player(p) => Self::Win(p),
      Marker::Stalemate => Self::Draw,
    }
  }
}

/// Outcomes of successive rounds between the same two players.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  pub ngames: usize,
  pub scores: [usize; 2],
}
impl Stats {
  pub fn update(&mut self, outcome: Outcome) {
    self.ngames += 1;
    match outcome {
      Outcome::Win(p) => self.scores[p.idx()] += 1,
      Outcome::Draw => (),
    }
  }
  pub fn ndraws(&self) -> usize {
    self.ngames - self.scores.iter().sum::<usize>()
  }
}

/// Rejections of `Game::submit_move`. None of them change the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
pub enum MoveError {
  #[display("it is not your turn")]
  NotYourTurn,
  #[display("move must be played on the designated board")]
  IllegalMove,
  #[display("{_0}")]
  AlreadyDecided(#[error(source)] PlaceSymbolError),
  #[display("game is already over")]
  GameOver,
}
