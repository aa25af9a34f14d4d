//! User-facing notices and board events.
//!
//! The board never talks to a toast system directly. It queues
//! [`BoardEvent`]s that the host drains after each operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Styling hint for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Message texts shown after board operations.
pub mod messages {
    pub const CARD_CREATED: &str = "New Note Created Successfully !!";
    pub const SIZE_UPDATED: &str = "Size Updated Successfully !!";
    pub const CARDS_CONNECTED: &str = "Cards Connected Successfully !!";
    pub const CONNECT_CANCELLED: &str = "Connection cancelled.";
    pub const CONNECTION_REMOVED: &str = "Connection Removed Successfully !!";
    pub const CARD_DELETED: &str = "Note Deleted Successfully !!";
    pub const BOARD_SAVED: &str = "Canvas saved to local storage!";
    pub const BOARD_LOADED: &str = "Canvas loaded from local storage!";
    pub const NO_SAVED_BOARD: &str = "No saved canvas found.";
    pub const SAVE_FAILED: &str = "Failed to save canvas.";
    pub const LOAD_FAILED: &str = "Saved canvas could not be read.";
    pub const EXPORTED: &str = "Pdf Downloaded Successfully !!";
}

/// Something the host should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// The snapshot changed; re-render.
    Changed { revision: u64 },
    /// Show a notice to the user.
    Notice(Notice),
}
