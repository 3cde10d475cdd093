use crate::room::{JoinError, Room};
use common::{message::RoomId, Player};

use std::{
  collections::HashMap,
  io::Write,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::info;

pub type SharedRoom<W> = Arc<Mutex<Room<W>>>;

/// Per-instance game registry keyed by room id.
///
/// A room is created on its first join and destroyed when its last participant leaves.
/// Every room has its own lock, so moves are serialized per game, not globally.
/// The registry lock is never held while a room talks to its participants.
/// When both are needed, the registry is locked before the room.
pub struct Registry<W> {
  rooms: Arc<Mutex<HashMap<RoomId, SharedRoom<W>>>>,
}

impl<W> Clone for Registry<W> {
  fn clone(&self) -> Self {
    Self {
      rooms: self.rooms.clone(),
    }
  }
}

impl<W> Default for Registry<W> {
  fn default() -> Self {
    Self {
      rooms: Default::default(),
    }
  }
}

impl<W: Write> Registry<W> {
  pub fn join(&self, id: RoomId, writer: W) -> Result<(SharedRoom<W>, Player), JoinError> {
    loop {
      let room = self
        .rooms()
        .entry(id.clone())
        .or_insert_with(|| Arc::new(Mutex::new(Room::new(id.clone()))))
        .clone();
      let mut guard = lock_room(&room);
      // closed in between by its last participant leaving, look up again
      if guard.is_closed() {
        continue;
      }
      let player = guard.join(writer)?;
      drop(guard);
      return Ok((room, player));
    }
  }

  /// Removes `player` from `room`, closing the room if it is empty afterwards.
  pub fn leave(&self, room: &SharedRoom<W>, player: Player) {
    let is_empty = {
      let mut room = lock_room(room);
      room.leave(player);
      room.is_empty()
    };
    if !is_empty {
      return;
    }

    let mut rooms = self.rooms();
    let mut guard = lock_room(room);
    // someone might have joined since
    if !guard.is_empty() || guard.is_closed() {
      return;
    }
    guard.close();
    let id = guard.id();
    if rooms.get(id).is_some_and(|r| Arc::ptr_eq(r, room)) {
      rooms.remove(id);
      info!(room = %id, "room closed");
    }
  }

  pub fn contains(&self, id: &str) -> bool {
    self.rooms().contains_key(id)
  }
  pub fn len(&self) -> usize {
    self.rooms().len()
  }
  pub fn is_empty(&self) -> bool {
    self.rooms().is_empty()
  }

  fn rooms(&self) -> MutexGuard<'_, HashMap<RoomId, SharedRoom<W>>> {
    self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// A panic while holding a room lock leaves the room in a consistent state,
/// since `Game` only mutates after validating a move.
pub fn lock_room<W>(room: &Mutex<Room<W>>) -> MutexGuard<'_, Room<W>> {
  room.lock().unwrap_or_else(PoisonError::into_inner)
}
