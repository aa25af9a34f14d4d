//! Undo/redo history.

use serde::{Deserialize, Serialize};

/// Default maximum number of undo states to keep.
pub const DEFAULT_MAX_UNDO_HISTORY: usize = 100;

/// History behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum undo depth. `None` keeps every state.
    pub max_depth: Option<usize>,
    /// Drop the redo branch when a new change is recorded.
    pub clear_redo_on_edit: bool,
    /// Record an undo point for progress changes.
    pub record_progress: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_UNDO_HISTORY),
            clear_redo_on_edit: true,
            record_progress: false,
        }
    }
}

/// Two stacks of past states.
///
/// Callers push the state they are about to change with [`History::record`],
/// and hand over the current state when stepping with [`History::undo`] or
/// [`History::redo`] so it can be restored from the opposite stack.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    max_depth: Option<usize>,
    clear_redo_on_edit: bool,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl<T> History<T> {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: config.max_depth,
            clear_redo_on_edit: config.clear_redo_on_edit,
        }
    }

    /// Push the pre-change state to the undo stack (call before making changes).
    pub fn record(&mut self, current: T) {
        self.undo_stack.push(current);

        if self.clear_redo_on_edit {
            self.redo_stack.clear();
        }

        if let Some(max) = self.max_depth {
            while self.undo_stack.len() > max {
                self.undo_stack.remove(0);
            }
        }
    }

    /// Step back. Returns the state to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward. Returns the state to restore, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
