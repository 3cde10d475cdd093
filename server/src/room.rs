use common::{
  game::{Game, MoveError, Outcome, Stats},
  message::{send_message, ClientMessage, RoomId, ServerMessage},
  Player,
};

use std::io::Write;

use derive_more::{Display, Error};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum JoinError {
  #[display("room already has two players")]
  RoomFull,
}

#[derive(Debug)]
struct Participant<W> {
  writer: W,
  wants_new_round: bool,
}

/// One game instance shared by (up to) two connections.
///
/// The room owns the authoritative `Game`. Every move is validated by it
/// before being forwarded to both participants.
#[derive(Debug)]
pub struct Room<W> {
  id: RoomId,
  /// sorted according to `Player`
  participants: [Option<Participant<W>>; 2],
  round: Option<Game>,
  /// between the two current participants
  stats: Stats,
  /// set once the room got removed from the registry, it never takes participants again
  closed: bool,
}

impl<W: Write> Room<W> {
  pub fn new(id: RoomId) -> Self {
    info!(room = %id, "room created");
    Self {
      id,
      participants: [None, None],
      round: None,
      stats: Stats::default(),
      closed: false,
    }
  }

  pub fn id(&self) -> &RoomId {
    &self.id
  }
  pub fn round(&self) -> Option<&Game> {
    self.round.as_ref()
  }
  pub fn stats(&self) -> &Stats {
    &self.stats
  }
  pub fn nparticipants(&self) -> usize {
    self.participants.iter().flatten().count()
  }
  pub fn is_empty(&self) -> bool {
    self.nparticipants() == 0
  }
  pub fn is_closed(&self) -> bool {
    self.closed
  }
  pub(crate) fn close(&mut self) {
    self.closed = true;
  }

  /// Seats a new participant. The first one gets a random symbol, the second the other one.
  /// Once both are seated the first round starts.
  pub fn join(&mut self, writer: W) -> Result<Player, JoinError> {
    let player = match self.participants.each_ref().map(Option::is_some) {
      [false, false] => rand::random(),
      [true, false] => Player::Circle,
      [false, true] => Player::Cross,
      [true, true] => return Err(JoinError::RoomFull),
    };
    self.participants[player.idx()] = Some(Participant {
      writer,
      wants_new_round: false,
    });
    info!(room = %self.id, ?player, "player joined");
    self.send(player, &ServerMessage::SymbolAssignment(player));

    if self.nparticipants() == 2 {
      self.start_round(rand::random());
    }
    Ok(player)
  }

  /// Removes a participant, aborting a running round.
  /// Whoever takes the free seat starts with fresh stats.
  pub fn leave(&mut self, player: Player) {
    if self.participants[player.idx()].take().is_none() {
      return;
    }
    info!(room = %self.id, ?player, "player left");
    self.round = None;
    self.stats = Stats::default();
    self.send(player.other(), &ServerMessage::OpponentLeft);
  }

  /// Handles one message of the participant playing `player`.
  /// The claimed player of a move is always the connection's own symbol.
  pub fn handle(&mut self, player: Player, msg: ClientMessage) {
    debug!(room = %self.id, ?player, ?msg, "handling message");
    match msg {
      ClientMessage::PlaceSymbol(pos) => {
        let result = match self.round.as_mut() {
          Some(game) => game.submit_move(pos, player).map(|_| game.outcome()),
          None => Err(MoveError::GameOver),
        };
        match result {
          Ok(outcome) => {
            self.broadcast(&ServerMessage::SymbolPlaced(player, pos));
            if let Some(outcome) = outcome {
              self.end_round(outcome);
            }
          }
          Err(e) => {
            warn!(room = %self.id, ?player, ?pos, %e, "move rejected");
            self.send(player, &ServerMessage::MoveRejected(e));
          }
        }
      }
      ClientMessage::GiveUp => {
        if self.round_in_progress() {
          self.send(player.other(), &ServerMessage::OpponentGiveUp);
          self.end_round(Outcome::Win(player.other()));
        }
      }
      ClientMessage::StartRoundRequest => {
        if self.round_in_progress() {
          return;
        }
        if let Some(p) = self.participants[player.idx()].as_mut() {
          p.wants_new_round = true;
        }
        let all_ready = self
          .participants
          .iter()
          .all(|p| p.as_ref().is_some_and(|p| p.wants_new_round));
        if all_ready {
          self.start_round(rand::random());
        }
      }
      ClientMessage::JoinRoom(other) => {
        warn!(room = %self.id, ?player, %other, "already joined a room");
      }
    }
  }
}

// private methods
impl<W: Write> Room<W> {
  fn round_in_progress(&self) -> bool {
    self.round.as_ref().is_some_and(|game| !game.is_finished())
  }

  fn start_round(&mut self, starting_player: Player) {
    info!(room = %self.id, ?starting_player, "new round started");
    self.round = Some(Game::new(starting_player));
    for p in self.participants.iter_mut().flatten() {
      p.wants_new_round = false;
    }
    self.broadcast(&ServerMessage::RoundStart(starting_player));
  }

  fn end_round(&mut self, outcome: Outcome) {
    self.stats.update(outcome);
    info!(room = %self.id, ?outcome, stats = ?self.stats, "round ended");
    if let Some(game) = self.round.as_ref() {
      debug!(room = %self.id, "final board\n{}", game.board());
    }
    // an abandoned game is dropped, a finished one is kept
    if self.round_in_progress() {
      self.round = None;
    }
    self.broadcast(&ServerMessage::RoundEnd(outcome, self.stats.clone()));
  }

  /// Send failures only get logged, the reading side of the connection notices the disconnect.
  fn send(&mut self, player: Player, msg: &ServerMessage) {
    if let Some(p) = self.participants[player.idx()].as_mut() {
      if let Err(e) = send_message(msg, &mut p.writer) {
        warn!(room = %self.id, ?player, %e, "sending message failed");
      }
    }
  }

  fn broadcast(&mut self, msg: &ServerMessage) {
    for player in common::PLAYERS {
      self.send(player, msg);
    }
  }
}
