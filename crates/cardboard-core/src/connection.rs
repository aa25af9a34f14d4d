//! Directed links between cards and the two-step connect gesture.

use crate::card::CardId;
use serde::{Deserialize, Serialize};

/// A directed link between two cards.
///
/// Duplicates and self-loops are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: CardId,
    pub to: CardId,
}

impl Connection {
    pub fn new(from: CardId, to: CardId) -> Self {
        Self { from, to }
    }

    /// Check if either endpoint is `id`.
    pub fn touches(&self, id: &CardId) -> bool {
        &self.from == id || &self.to == id
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Selection state of the connect gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectMode {
    /// No source card picked yet.
    #[default]
    Idle,
    /// A source card was picked; the next pick completes the connection.
    Pending(CardId),
}

impl ConnectMode {
    /// Feed a card pick into the state machine.
    ///
    /// Returns the next state and, when a pick completes the gesture, the
    /// connection to create. Picking the pending card again yields a self-loop.
    pub fn select(self, id: CardId) -> (ConnectMode, Option<Connection>) {
        match self {
            ConnectMode::Idle => (ConnectMode::Pending(id), None),
            ConnectMode::Pending(source) => (ConnectMode::Idle, Some(Connection::new(source, id))),
        }
    }

    /// The pending source card, if any.
    pub fn pending(&self) -> Option<&CardId> {
        match self {
            ConnectMode::Idle => None,
            ConnectMode::Pending(id) => Some(id),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ConnectMode::Pending(_))
    }
}
