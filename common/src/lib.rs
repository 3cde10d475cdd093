pub mod board;
pub mod event;
pub mod game;
pub mod line;
pub mod message;
pub mod pos;

pub use board::{Board, SubBoard};
pub use game::{Game, MoveError};
pub use pos::{GlobalPos, InnerPos, OuterPos, Pos};

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

pub const DEFAULT_IP: Ipv4Addr = Ipv4Addr::LOCALHOST;
pub const DEFAULT_PORT: u16 = 42069;

pub const BOARD_SIDE_LENGTH: u8 = 3;

/// turn order of the players
pub const PLAYERS: [Player; 2] = [Player::Cross, Player::Circle];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Player {
  Cross = 0,
  Circle = 1,
}

impl Player {
  pub fn idx(self) -> usize {
    self as usize
  }
  pub fn other(self) -> Self {
    match self {
      Self::Cross => Self::Circle,
      Self::Circle => Self::Cross,
    }
  }
  pub fn switch(&mut self) {
    *self = self.other();
  }

  pub fn as_char(self) -> char {
    match self {
      Self::Cross => 'X',
      Self::Circle => 'O',
    }
  }
  pub fn from_char(c: char) -> Option<Self> {
    match c {
      'X' => Some(Self::Cross),
      'O' => Some(Self::Circle),
      _ => None,
    }
  }
}

impl rand::distributions::Distribution<Player> for rand::distributions::Standard {
  fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Player {
    PLAYERS[rng.gen_range(0..PLAYERS.len())]
  }
}

impl std::fmt::Display for Player {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_char())
  }
}

/// The result held by a decided cell or grid.
///
/// Markers compare by value, so three `Stalemate` children form a uniform line
/// just like three markers of the same player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
  Player(Player),
  Stalemate,
}

impl Marker {
  pub fn player(self) -> Option<Player> {
    match self {
      Self::Player(p) => Some(p),
      Self::Stalemate => None,
    }
  }

  pub fn as_char(self) -> char {
    match self {
      Self::Player(p) => p.as_char(),
      Self::Stalemate => '#',
    }
  }
}

impl From<Player> for Marker {
  fn from(player: Player) -> Self {
    Self::Player(player)
  }
}

#[cfg(test)]
mod test {
  use super::{Marker, Player, PLAYERS};

  #[test]
  fn check_player_alternation() {
    for p in PLAYERS {
      assert_ne!(p, p.other());
      assert_eq!(p, p.other().other());
      let mut q = p;
      q.switch();
      assert_eq!(q, p.other());
      assert_eq!(Player::from_char(p.as_char()), Some(p));
    }
    assert_eq!(PLAYERS.map(Player::idx), [0, 1]);
  }

  #[test]
  fn check_marker_equality() {
    assert_eq!(Marker::Stalemate, Marker::Stalemate);
    assert_ne!(Marker::from(Player::Cross), Marker::Stalemate);
    assert_ne!(Marker::from(Player::Cross), Marker::from(Player::Circle));
    assert_eq!(Marker::from(Player::Circle).player(), Some(Player::Circle));
    assert_eq!(Marker::Stalemate.player(), None);
  }
}
