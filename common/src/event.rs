use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{
  pos::{GlobalPos, InnerPos, OuterPos, Pos},
  Marker,
};

/// Names a grid of the board hierarchy.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridId {
  #[display("board")]
  Meta,
  #[display("sub-board ({}, {})", _0.row(), _0.col())]
  Sub(OuterPos),
}

/// Observable state changes, in the order they happened during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
  CellActivated {
    grid: GridId,
    cell: Pos,
    marker: Marker,
  },
  GridCompleted {
    grid: GridId,
    marker: Marker,
  },
  GridLockChanged {
    grid: GridId,
    locked: bool,
  },
  GameFinished(Marker),
}

impl GameEvent {
  /// Global position of an activated leaf cell.
  pub fn activated_pos(&self) -> Option<GlobalPos> {
    match *self {
      Self::CellActivated {
        grid: GridId::Sub(outer),
        cell,
        ..
      } => Some(GlobalPos::from((outer, InnerPos::from(cell)))),
      _ => None,
    }
  }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer = Box<dyn FnMut(&GameEvent) + Send>;

/// Synchronous in-process observer registry.
#[derive(Default)]
pub struct EventBus {
  next_id: u64,
  observers: Vec<(Subscription, Observer)>,
}

impl EventBus {
  pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + Send + 'static) -> Subscription {
    let subscription = Subscription(self.next_id);
    self.next_id += 1;
    self.observers.push((subscription, Box::new(observer)));
    subscription
  }

  /// Returns `false` if the subscription was not registered.
  pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
    let len = self.observers.len();
    self.observers.retain(|(s, _)| *s != subscription);
    self.observers.len() != len
  }

  /// Delivers every event to every observer, in registration order.
  pub fn dispatch(&mut self, events: &[GameEvent]) {
    for event in events {
      for (_, observer) in self.observers.iter_mut() {
        observer(event);
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.observers.is_empty()
  }
}

impl std::fmt::Debug for EventBus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EventBus")
      .field("observers", &self.observers.len())
      .finish()
  }
}
