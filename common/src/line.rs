use crate::{pos::Pos, BOARD_SIDE_LENGTH};

const NLINES: usize = 2 * BOARD_SIDE_LENGTH as usize + 2;

/// One of the eight winning lines of a grid.
/// The same table is used at every level of the board hierarchy.
///
/// Instance guranteed to be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
  Row(u8),
  Col(u8),
  MainDiagonal,
  AntiDiagonal,
}

impl Line {
  pub fn from_idx(idx: usize) -> Self {
    assert!(idx < NLINES);
    let idx = idx as u8;
    if idx < BOARD_SIDE_LENGTH {
      Self::Row(idx)
    } else if idx < 2 * BOARD_SIDE_LENGTH {
      Self::Col(idx - BOARD_SIDE_LENGTH)
    } else if idx == 2 * BOARD_SIDE_LENGTH {
      Self::MainDiagonal
    } else {
      Self::AntiDiagonal
    }
  }

  /// The three positions of this line, in the order they are compared.
  pub fn positions(self) -> [Pos; 3] {
    std::array::from_fn(|i| {
      let i = i as u8;
      match self {
        Self::Row(row) => Pos::new(row, i),
        Self::Col(col) => Pos::new(i, col),
        Self::MainDiagonal => Pos::new(i, i),
        Self::AntiDiagonal => Pos::new(2 - i, i),
      }
    })
  }

  /// rows, then columns, then diagonals
  pub fn all() -> impl Iterator<Item = Self> {
    (0..NLINES).map(Self::from_idx)
  }
}
