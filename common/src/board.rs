mod cell;
mod grid;
pub mod win;

pub use cell::Cell;
pub use grid::Grid;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::{
  event::{GameEvent, GridId},
  pos::{GlobalPos, OuterPos, Pos},
  Marker,
};

/// `SubBoard` is the first non-trivial grid in the board hierarchy.
pub type SubBoard = Grid<Cell>;
/// The meta-grid, the top of the board hierarchy.
pub type Board = Grid<SubBoard>;

/// Capabilities shared by every node of the board hierarchy.
/// Implemented by `Cell` (base case) and `Grid` (induction step).
pub trait Node: Sized {
  /// Creates an empty node at the given position inside its parent grid.
  fn new_at(pos: Pos) -> Self;

  fn marker(&self) -> Option<Marker>;
  fn is_empty(&self) -> bool {
    self.marker().is_none()
  }

  /// Returns the cell at the end of `path`, by recursively walking the board hierarchy.
  fn cell(&self, path: impl Iterator<Item = Pos>) -> &Cell;

  /// Checks whether `place` would succeed, without changing anything.
  fn could_place(&self, path: impl Iterator<Item = Pos>) -> Result<(), PlaceSymbolError>;

  /// Places a marker on the cell at the end of `path`, by recursively walking the board hierarchy
  /// and updating the markers of every grid on the way back up.
  /// `parent` names the grid directly containing this node.
  fn place(
    &mut self,
    path: impl Iterator<Item = Pos>,
    marker: Marker,
    parent: GridId,
    events: &mut Vec<GameEvent>,
  ) -> Result<(), PlaceSymbolError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
pub enum PlaceSymbolError {
  #[display("cell is already occupied")]
  CellOccupied,
  #[display("{_0} is already decided")]
  GridDecided(#[error(not(source))] GridId),
}

impl Board {
  pub fn sub_board(&self, outer: OuterPos) -> &SubBoard {
    self.child(outer)
  }
  pub(crate) fn sub_board_mut(&mut self, outer: OuterPos) -> &mut SubBoard {
    self.child_mut(outer)
  }
  pub fn cell_at(&self, pos: GlobalPos) -> &Cell {
    Node::cell(self, pos.into_iter())
  }
  pub fn could_place_at(&self, pos: GlobalPos) -> Result<(), PlaceSymbolError> {
    Node::could_place(self, pos.into_iter())
  }
}

impl std::fmt::Display for Board {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for row in 0..9 {
      if row != 0 && row % 3 == 0 {
        writeln!(f)?;
      }
      for col in 0..9 {
        if col != 0 && col % 3 == 0 {
          write!(f, " ")?;
        }
        let c = match self.cell_at(GlobalPos::new(row, col)).marker() {
          Some(marker) => marker.as_char(),
          None => '_',
        };
        write!(f, "{}", c)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
