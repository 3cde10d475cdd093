use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::BOARD_SIDE_LENGTH;

const GLOBAL_SIDE_LENGTH: u8 = BOARD_SIDE_LENGTH * BOARD_SIDE_LENGTH;

/// Generic local position inside one grid of the board hierarchy.
/// This position only describes a location in relation to its direct parent grid.
///
/// Instance guranteed to be valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Pos([u8; 2]);

impl Pos {
  pub const fn new_arr(arr: [u8; 2]) -> Self {
    assert!(arr[0] < BOARD_SIDE_LENGTH && arr[1] < BOARD_SIDE_LENGTH);
    Self(arr)
  }
  pub const fn new(row: u8, col: u8) -> Self {
    Self::new_arr([row, col])
  }

  pub fn row(self) -> u8 {
    self.0[0]
  }
  pub fn col(self) -> u8 {
    self.0[1]
  }
  pub fn linear_idx(self) -> usize {
    (self.row() * BOARD_SIDE_LENGTH + self.col()) as usize
  }
  pub fn from_linear_idx(idx: usize) -> Self {
    let side = BOARD_SIDE_LENGTH as usize;
    assert!(idx < side * side);
    Self::new((idx / side) as u8, (idx % side) as u8)
  }

  /// all nine positions in row-major order
  pub fn all() -> impl Iterator<Item = Self> {
    (0..9).map(Self::from_linear_idx)
  }

  pub fn iter(self) -> impl Iterator<Item = Self> {
    std::iter::once(self)
  }
}

/// Position of a sub-grid inside the meta-grid.
///
/// Instance guranteed to be valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct OuterPos(Pos);

impl OuterPos {
  pub const fn new(row: u8, col: u8) -> Self {
    Self(Pos::new(row, col))
  }
  pub fn row(self) -> u8 {
    self.0.row()
  }
  pub fn col(self) -> u8 {
    self.0.col()
  }

  pub fn all() -> impl Iterator<Item = Self> {
    Pos::all().map(Self)
  }
}

/// Position of a cell inside its sub-grid.
///
/// Instance guranteed to be valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct InnerPos(Pos);

impl InnerPos {
  pub const fn new(row: u8, col: u8) -> Self {
    Self(Pos::new(row, col))
  }
  pub fn row(self) -> u8 {
    self.0.row()
  }
  pub fn col(self) -> u8 {
    self.0.col()
  }

  /// The sub-grid spatially corresponding to this cell,
  /// i.e. the board the opponent gets sent to.
  pub fn as_outer(self) -> OuterPos {
    OuterPos(self.0)
  }
}

impl From<OuterPos> for Pos {
  fn from(outer: OuterPos) -> Self {
    outer.0
  }
}
impl From<InnerPos> for Pos {
  fn from(inner: InnerPos) -> Self {
    inner.0
  }
}
impl From<Pos> for OuterPos {
  fn from(pos: Pos) -> Self {
    Self(pos)
  }
}
impl From<Pos> for InnerPos {
  fn from(pos: Pos) -> Self {
    Self(pos)
  }
}

/// Position of a cell on the whole 9x9 board.
///
/// Instance guranteed to be valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct GlobalPos([u8; 2]);

impl GlobalPos {
  pub fn new(row: u8, col: u8) -> Self {
    assert!(row < GLOBAL_SIDE_LENGTH && col < GLOBAL_SIDE_LENGTH);
    Self([row, col])
  }
  pub fn try_new(row: u8, col: u8) -> Option<Self> {
    (row < GLOBAL_SIDE_LENGTH && col < GLOBAL_SIDE_LENGTH).then_some(Self([row, col]))
  }

  pub fn row(self) -> u8 {
    self.0[0]
  }
  pub fn col(self) -> u8 {
    self.0[1]
  }
  pub fn outer(self) -> OuterPos {
    self.into()
  }
  pub fn inner(self) -> InnerPos {
    self.into()
  }

  pub fn all() -> impl Iterator<Item = Self> {
    (0..GLOBAL_SIDE_LENGTH)
      .flat_map(|row| (0..GLOBAL_SIDE_LENGTH).map(move |col| Self([row, col])))
  }
}

impl From<(OuterPos, InnerPos)> for GlobalPos {
  fn from((outer, inner): (OuterPos, InnerPos)) -> Self {
    Self([
      outer.row() * BOARD_SIDE_LENGTH + inner.row(),
      outer.col() * BOARD_SIDE_LENGTH + inner.col(),
    ])
  }
}
impl From<GlobalPos> for OuterPos {
  fn from(global: GlobalPos) -> Self {
    let [row, col] = global.0.map(|v| v / BOARD_SIDE_LENGTH);
    Self::new(row, col)
  }
}
impl From<GlobalPos> for InnerPos {
  fn from(global: GlobalPos) -> Self {
    let [row, col] = global.0.map(|v| v % BOARD_SIDE_LENGTH);
    Self::new(row, col)
  }
}

/// A global position is the path `[outer, inner]` through the board tree.
impl IntoIterator for GlobalPos {
  type Item = Pos;
  type IntoIter = std::array::IntoIter<Pos, 2>;
  fn into_iter(self) -> Self::IntoIter {
    [Pos::from(self.outer()), Pos::from(self.inner())].into_iter()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("position {_0:?} is out of range")]
pub struct PosOutOfRange(#[error(not(source))] [u8; 2]);

impl TryFrom<[u8; 2]> for GlobalPos {
  type Error = PosOutOfRange;
  fn try_from(arr: [u8; 2]) -> Result<Self, Self::Error> {
    Self::try_new(arr[0], arr[1]).ok_or(PosOutOfRange(arr))
  }
}
impl TryFrom<[u8; 2]> for Pos {
  type Error = PosOutOfRange;
  fn try_from(arr: [u8; 2]) -> Result<Self, Self::Error> {
    match arr {
      [row, col] if row < BOARD_SIDE_LENGTH && col < BOARD_SIDE_LENGTH => Ok(Self(arr)),
      _ => Err(PosOutOfRange(arr)),
    }
  }
}
impl TryFrom<[u8; 2]> for OuterPos {
  type Error = PosOutOfRange;
  fn try_from(arr: [u8; 2]) -> Result<Self, Self::Error> {
    Pos::try_from(arr).map(Self)
  }
}
impl TryFrom<[u8; 2]> for InnerPos {
  type Error = PosOutOfRange;
  fn try_from(arr: [u8; 2]) -> Result<Self, Self::Error> {
    Pos::try_from(arr).map(Self)
  }
}
impl From<GlobalPos> for [u8; 2] {
  fn from(global: GlobalPos) -> Self {
    global.0
  }
}
impl From<Pos> for [u8; 2] {
  fn from(pos: Pos) -> Self {
    pos.0
  }
}
impl From<OuterPos> for [u8; 2] {
  fn from(outer: OuterPos) -> Self {
    outer.0.into()
  }
}
impl From<InnerPos> for [u8; 2] {
  fn from(inner: InnerPos) -> Self {
    inner.0.into()
  }
}
