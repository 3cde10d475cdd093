use super::{Node, PlaceSymbolError};
use crate::{
  event::{GameEvent, GridId},
  pos::Pos,
  Marker,
};

/// `Cell` is the bottom of the board hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
  marker: Option<Marker>,
  pos: Pos,
}

impl Cell {
  /// A cell is written at most once.
  pub fn set_marker(&mut self, marker: Marker) -> Result<(), PlaceSymbolError> {
    if self.marker.is_some() {
      return Err(PlaceSymbolError::CellOccupied);
    }
    self.marker = Some(marker);
    Ok(())
  }
}

/// Base case of the board hierarchy.
impl Node for Cell {
  fn new_at(pos: Pos) -> Self {
    Self { marker: None, pos }
  }

  fn marker(&self) -> Option<Marker> {
    self.marker
  }

  fn cell(&self, mut path: impl Iterator<Item = Pos>) -> &Cell {
    assert!(path.next().is_none());
    self
  }

  fn could_place(&self, mut path: impl Iterator<Item = Pos>) -> Result<(), PlaceSymbolError> {
    assert!(path.next().is_none());
    match self.is_empty() {
      true => Ok(()),
      false => Err(PlaceSymbolError::CellOccupied),
    }
  }

  fn place(
    &mut self,
    mut path: impl Iterator<Item = Pos>,
    marker: Marker,
    parent: GridId,
    events: &mut Vec<GameEvent>,
  ) -> Result<(), PlaceSymbolError> {
    assert!(path.next().is_none());
    self.set_marker(marker)?;
    events.push(GameEvent::CellActivated {
      grid: parent,
      cell: self.pos,
      marker,
    });
    Ok(())
  }
}
