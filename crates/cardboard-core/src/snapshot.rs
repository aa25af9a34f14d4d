//! Point-in-time board state.

use crate::card::{Card, CardId};
use crate::connection::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The full `(cards, connections)` state at one instant.
///
/// This is the unit stored in history and the unit persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Cards in creation order.
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Connections in creation order.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl BoardSnapshot {
    pub fn new(cards: Vec<Card>, connections: Vec<Connection>) -> Self {
        Self { cards, connections }
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.card(id).is_some()
    }

    /// Check structural invariants: unique card ids and no dangling connection endpoints.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for card in &self.cards {
            if !seen.insert(&card.id) {
                return Err(format!("duplicate card id {}", card.id));
            }
        }

        for (index, conn) in self.connections.iter().enumerate() {
            for endpoint in [&conn.from, &conn.to] {
                if !seen.contains(endpoint) {
                    return Err(format!(
                        "connection {} references missing card {}",
                        index, endpoint
                    ));
                }
            }
        }

        Ok(())
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
