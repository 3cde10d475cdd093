use super::{win, Cell, Node, PlaceSymbolError};
use crate::{
  event::{GameEvent, GridId},
  pos::Pos,
  Marker,
};

/// Inductive type generating the board hierarchy.
///
/// A grid owns nine children of one kind and is itself a node one level up:
/// once decided, its marker takes part in the parent's win check exactly like a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
  children: [T; 9],
  marker: Option<Marker>,
  locked: bool,
  /// `None` for the top-level grid.
  pos: Option<Pos>,
}

impl<T: Node> Grid<T> {
  fn build(pos: Option<Pos>, locked: bool) -> Self {
    Self {
      children: std::array::from_fn(|i| T::new_at(Pos::from_linear_idx(i))),
      marker: None,
      locked,
      pos,
    }
  }

  /// A top-level grid, starting unlocked.
  pub fn new_root() -> Self {
    Self::build(None, false)
  }

  pub fn id(&self) -> GridId {
    match self.pos {
      None => GridId::Meta,
      Some(pos) => GridId::Sub(pos.into()),
    }
  }

  pub fn child(&self, pos: impl Into<Pos>) -> &T {
    &self.children[pos.into().linear_idx()]
  }
  pub(crate) fn child_mut(&mut self, pos: impl Into<Pos>) -> &mut T {
    &mut self.children[pos.into().linear_idx()]
  }
  pub fn children(&self) -> impl Iterator<Item = &T> {
    self.children.iter()
  }

  /// Places a marker on the cell at the end of `path`, re-evaluating every grid on the way back up.
  pub fn place_marker(
    &mut self,
    path: impl IntoIterator<Item = Pos>,
    marker: Marker,
  ) -> Result<Vec<GameEvent>, PlaceSymbolError> {
    let mut events = Vec::new();
    let id = self.id();
    Node::place(self, path.into_iter(), marker, id, &mut events)?;
    Ok(events)
  }

  fn child_markers(&self) -> [Option<Marker>; 9] {
    std::array::from_fn(|i| self.children[i].marker())
  }

  /// Runs the win check after a child changed. A decided grid is never re-evaluated.
  fn update_marker(&mut self, events: &mut Vec<GameEvent>) {
    if !self.is_empty() {
      return;
    }
    if let Some(marker) = win::evaluate(&self.child_markers()) {
      self.complete(marker, events);
    }
  }

  fn complete(&mut self, marker: Marker, events: &mut Vec<GameEvent>) {
    debug_assert!(self.marker.is_none());
    self.marker = Some(marker);
    tracing::debug!(grid = ?self.id(), ?marker, "grid completed");
    events.push(GameEvent::GridCompleted {
      grid: self.id(),
      marker,
    });
    self.lock(events);
  }
}

/// lock state
impl<T: Node> Grid<T> {
  pub fn is_locked(&self) -> bool {
    self.locked
  }

  /// Returns whether the lock state changed.
  /// Locking always succeeds, unlocking only while the grid is undecided.
  pub fn set_lock(&mut self, locked: bool, events: &mut Vec<GameEvent>) -> bool {
    if self.locked == locked || (!locked && !self.is_empty()) {
      return false;
    }
    self.locked = locked;
    events.push(GameEvent::GridLockChanged {
      grid: self.id(),
      locked,
    });
    true
  }

  /// Returns the resulting lock state.
  pub fn lock(&mut self, events: &mut Vec<GameEvent>) -> bool {
    self.set_lock(true, events);
    self.locked
  }

  /// Returns the resulting lock state, so `true` means the unlock was refused.
  pub fn unlock(&mut self, events: &mut Vec<GameEvent>) -> bool {
    self.set_lock(false, events);
    self.locked
  }
}

impl<T: Node> Default for Grid<T> {
  fn default() -> Self {
    Self::new_root()
  }
}

/// Induction step of the board hierarchy.
impl<T: Node> Node for Grid<T> {
  fn new_at(pos: Pos) -> Self {
    Self::build(Some(pos), true)
  }

  fn marker(&self) -> Option<Marker> {
    self.marker
  }

  fn cell(&self, mut path: impl Iterator<Item = Pos>) -> &Cell {
    let local_pos = path.next().expect("ran out of positions");
    // recursion
    self.child(local_pos).cell(path)
  }

  fn could_place(&self, mut path: impl Iterator<Item = Pos>) -> Result<(), PlaceSymbolError> {
    if !self.is_empty() {
      return Err(PlaceSymbolError::GridDecided(self.id()));
    }
    let local_pos = path.next().expect("ran out of positions");
    // recursion
    self.child(local_pos).could_place(path)
  }

  fn place(
    &mut self,
    mut path: impl Iterator<Item = Pos>,
    marker: Marker,
    _parent: GridId,
    events: &mut Vec<GameEvent>,
  ) -> Result<(), PlaceSymbolError> {
    if !self.is_empty() {
      return Err(PlaceSymbolError::GridDecided(self.id()));
    }
    let local_pos = path.next().expect("ran out of positions");
    let id = self.id();
    // recursion
    self.child_mut(local_pos).place(path, marker, id, events)?;
    self.update_marker(events);
    Ok(())
  }
}
