//! Board state and the operations that mutate it.

use crate::card::{Card, CardId, CardKind, CardSize, CardType, IdAllocator, Progress};
use crate::config::{BoardConfig, ConfigError};
use crate::connection::{ConnectMode, Connection};
use crate::error::{BoardError, BoardResult};
use crate::export::{ExportRequest, Exporter};
use crate::history::History;
use crate::notice::{BoardEvent, Notice, messages};
use crate::snap::{GridPoint, snap_to_grid};
use crate::snapshot::BoardSnapshot;
use crate::storage::{MemoryStorage, Storage, StorageError};
use kurbo::Point;
use std::sync::Arc;

/// The authoritative board: current snapshot, history, connect gesture state
/// and the storage slot it persists to.
///
/// Every mutation builds new card/connection sequences rather than editing
/// the old ones in place, then commits them. Hosts poll [`Board::drain_events`]
/// after each call to re-render and show notices.
pub struct Board<S: Storage> {
    config: BoardConfig,
    current: BoardSnapshot,
    history: History<BoardSnapshot>,
    connect: ConnectMode,
    ids: IdAllocator,
    revision: u64,
    events: Vec<BoardEvent>,
    storage: Arc<S>,
}

impl Board<MemoryStorage> {
    /// Create an empty board backed by in-memory storage.
    pub fn in_memory(config: BoardConfig) -> Result<Self, ConfigError> {
        Self::new(config, Arc::new(MemoryStorage::new()))
    }
}

impl<S: Storage> Board<S> {
    /// Create an empty board with the given storage backend.
    ///
    /// The config is validated first; a board never runs with a config that
    /// [`BoardConfig::validate`] rejects.
    pub fn new(config: BoardConfig, storage: Arc<S>) -> Result<Self, ConfigError> {
        config.validate()?;
        let history = History::new(&config.history);
        Ok(Self {
            config,
            current: BoardSnapshot::default(),
            history,
            connect: ConnectMode::Idle,
            ids: IdAllocator::new(),
            revision: 0,
            events: Vec::new(),
            storage,
        })
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.current
    }

    pub fn cards(&self) -> &[Card] {
        &self.current.cards
    }

    pub fn connections(&self) -> &[Connection] {
        &self.current.connections
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.current.card(id)
    }

    pub fn connect_mode(&self) -> &ConnectMode {
        &self.connect
    }

    /// Number of commits so far. Bumps on every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the given field(s) of the current snapshot and queue a re-render.
    fn commit(&mut self, cards: Option<Vec<Card>>, connections: Option<Vec<Connection>>) -> &BoardSnapshot {
        if let Some(cards) = cards {
            self.current.cards = cards;
        }
        if let Some(connections) = connections {
            self.current.connections = connections;
        }
        self.revision += 1;
        self.events.push(BoardEvent::Changed {
            revision: self.revision,
        });
        &self.current
    }

    fn record_undo_point(&mut self) {
        self.history.record(self.current.clone());
    }

    fn notify(&mut self, notice: Notice) {
        log::debug!("Notice: {}", notice);
        self.events.push(BoardEvent::Notice(notice));
    }

    fn require_card(&self, id: &CardId) -> BoardResult<&Card> {
        self.current
            .card(id)
            .ok_or_else(|| BoardError::NotFound(id.clone()))
    }

    /// Copy of the cards with `f` applied to the card `id`.
    fn cards_with(&self, id: &CardId, f: impl FnOnce(&mut Card)) -> Vec<Card> {
        let mut f = Some(f);
        self.current
            .cards
            .iter()
            .map(|card| {
                let mut card = card.clone();
                if &card.id == id {
                    if let Some(f) = f.take() {
                        f(&mut card);
                    }
                }
                card
            })
            .collect()
    }

    /// Create a card with default text, position and size.
    pub fn create_card(&mut self, card_type: CardType) -> CardId {
        let id = self.ids.next_id();
        let card = Card::new(
            id.clone(),
            card_type,
            self.config.default_position,
            self.config.default_size,
        );

        self.record_undo_point();
        let mut cards = self.current.cards.clone();
        cards.push(card);
        self.commit(Some(cards), None);

        log::debug!("Created {:?} card {}", card_type, id);
        self.notify(Notice::success(messages::CARD_CREATED));
        id
    }

    /// Move a card to `raw`, snapped to the grid. Returns the stored position.
    pub fn move_card(&mut self, id: &CardId, raw: Point) -> BoardResult<GridPoint> {
        self.require_card(id)?;
        let position = snap_to_grid(raw, self.config.grid_size);

        self.record_undo_point();
        let cards = self.cards_with(id, |card| card.position = position);
        self.commit(Some(cards), None);

        log::debug!("Moved card {} to ({}, {})", id, position.x, position.y);
        Ok(position)
    }

    /// Set a card's box size. The size is stored as given.
    pub fn resize_card(&mut self, id: &CardId, size: CardSize) -> BoardResult<()> {
        self.require_card(id)?;

        self.record_undo_point();
        let cards = self.cards_with(id, |card| card.size = size);
        self.commit(Some(cards), None);

        log::debug!("Resized card {} to {}x{}", id, size.width, size.height);
        self.notify(Notice::success(messages::SIZE_UPDATED));
        Ok(())
    }

    /// Apply a confirmed text edit.
    ///
    /// `None` means the edit was cancelled and leaves the card alone; an empty
    /// string clears the text. Returns whether the text was replaced.
    pub fn edit_text(&mut self, id: &CardId, new_text: Option<String>) -> BoardResult<bool> {
        self.require_card(id)?;
        let Some(text) = new_text else {
            return Ok(false);
        };

        self.record_undo_point();
        let cards = self.cards_with(id, |card| card.text = text);
        self.commit(Some(cards), None);

        log::debug!("Edited text of card {}", id);
        Ok(true)
    }

    /// Set the progress of a task card, clamped to 0..=100.
    ///
    /// Only recorded in history when `history.record_progress` is set, so
    /// slider drags do not flood the undo stack.
    pub fn set_progress(&mut self, id: &CardId, value: i64) -> BoardResult<Progress> {
        if !self.require_card(id)?.is_task() {
            return Err(BoardError::NotATask(id.clone()));
        }
        let progress = Progress::clamped(value);

        if self.config.history.record_progress {
            self.record_undo_point();
        }
        let cards = self.cards_with(id, |card| card.kind = CardKind::Task { progress });
        self.commit(Some(cards), None);

        log::debug!("Progress of card {} set to {}", id, progress.value());
        Ok(progress)
    }

    /// Delete a card along with every connection touching it.
    pub fn delete_card(&mut self, id: &CardId) -> BoardResult<Card> {
        let removed = self.require_card(id)?.clone();

        self.record_undo_point();
        let cards = self
            .current
            .cards
            .iter()
            .filter(|card| &card.id != id)
            .cloned()
            .collect();
        let connections: Vec<Connection> = self
            .current
            .connections
            .iter()
            .filter(|conn| !conn.touches(id))
            .cloned()
            .collect();
        let dropped = self.current.connections.len() - connections.len();
        self.commit(Some(cards), Some(connections));

        if self.connect.pending() == Some(id) {
            self.connect = ConnectMode::Idle;
        }

        log::debug!("Deleted card {} and {} connection(s)", id, dropped);
        self.notify(Notice::error(messages::CARD_DELETED));
        Ok(removed)
    }

    /// Feed a card pick into the connect gesture.
    ///
    /// The first pick remembers the source; the second creates the connection
    /// and returns it.
    pub fn toggle_connect_target(&mut self, id: &CardId) -> BoardResult<Option<Connection>> {
        self.require_card(id)?;

        let mode = std::mem::take(&mut self.connect);
        let (next, connection) = mode.select(id.clone());
        self.connect = next;

        match connection {
            Some(conn) => {
                self.create_connection(conn.from.clone(), conn.to.clone())?;
                Ok(Some(conn))
            }
            None => {
                log::debug!("Connect source picked: {}", id);
                Ok(None)
            }
        }
    }

    /// Abandon a half-finished connect gesture.
    pub fn cancel_connect(&mut self) {
        if let ConnectMode::Pending(source) = std::mem::take(&mut self.connect) {
            log::debug!("Connect from {} cancelled", source);
            self.notify(Notice::info(messages::CONNECT_CANCELLED));
        }
    }

    /// Append a connection. Duplicates and self-loops are allowed.
    pub fn create_connection(&mut self, from: CardId, to: CardId) -> BoardResult<()> {
        self.require_card(&from)?;
        self.require_card(&to)?;

        self.record_undo_point();
        let mut connections = self.current.connections.clone();
        log::debug!("Connected {} -> {}", from, to);
        connections.push(Connection::new(from, to));
        self.commit(None, Some(connections));

        self.notify(Notice::success(messages::CARDS_CONNECTED));
        Ok(())
    }

    /// Remove the connection at `index`.
    pub fn remove_connection(&mut self, index: usize) -> BoardResult<Connection> {
        if index >= self.current.connections.len() {
            return Err(BoardError::ConnectionNotFound(index));
        }

        self.record_undo_point();
        let mut connections = self.current.connections.clone();
        let removed = connections.remove(index);
        self.commit(None, Some(connections));

        log::debug!("Removed connection {} -> {}", removed.from, removed.to);
        self.notify(Notice::success(messages::CONNECTION_REMOVED));
        Ok(removed)
    }

    /// Undo the last recorded change.
    pub fn undo(&mut self) -> BoardResult<()> {
        let previous = self
            .history
            .undo(self.current.clone())
            .ok_or(BoardError::EmptyHistory)?;
        self.restore(previous);
        Ok(())
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> BoardResult<()> {
        let next = self
            .history
            .redo(self.current.clone())
            .ok_or(BoardError::EmptyHistory)?;
        self.restore(next);
        Ok(())
    }

    fn restore(&mut self, snapshot: BoardSnapshot) {
        self.commit(Some(snapshot.cards), Some(snapshot.connections));
        if let Some(pending) = self.connect.pending() {
            if !self.current.contains(pending) {
                self.connect = ConnectMode::Idle;
            }
        }
    }

    /// Write the current cards and connections to the configured slot.
    pub fn save(&mut self) -> BoardResult<()> {
        let key = self.config.storage_key.clone();
        match self.storage.save(&key, &self.current) {
            Ok(()) => {
                log::info!(
                    "Saved board to slot {} ({} cards, {} connections)",
                    key,
                    self.current.cards.len(),
                    self.current.connections.len()
                );
                self.notify(Notice::success(messages::BOARD_SAVED));
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to save board to slot {}: {}", key, e);
                self.notify(Notice::error(messages::SAVE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Replace cards and connections with the contents of the configured slot.
    ///
    /// On any failure the board is left untouched. A successful load is not
    /// undoable: both history stacks are cleared.
    pub fn load(&mut self) -> BoardResult<()> {
        let key = self.config.storage_key.clone();
        let snapshot = match self.storage.load(&key) {
            Ok(snapshot) => snapshot,
            Err(StorageError::NotFound(_)) => {
                log::info!("No saved board in slot {}", key);
                self.notify(Notice::error(messages::NO_SAVED_BOARD));
                return Err(BoardError::PersistenceMiss(key));
            }
            Err(StorageError::Serialization(message)) => {
                log::warn!("Saved board in slot {} is malformed: {}", key, message);
                self.notify(Notice::error(messages::LOAD_FAILED));
                return Err(BoardError::MalformedPersistedState(message));
            }
            Err(e) => {
                log::warn!("Failed to load board from slot {}: {}", key, e);
                self.notify(Notice::error(messages::LOAD_FAILED));
                return Err(e.into());
            }
        };

        if let Err(message) = snapshot.validate() {
            log::warn!("Saved board in slot {} is inconsistent: {}", key, message);
            self.notify(Notice::error(messages::LOAD_FAILED));
            return Err(BoardError::MalformedPersistedState(message));
        }

        self.ids.advance_past(snapshot.cards.iter().map(|card| &card.id));
        self.history.clear();
        self.connect = ConnectMode::Idle;
        self.commit(Some(snapshot.cards), Some(snapshot.connections));

        log::info!(
            "Loaded board from slot {} ({} cards, {} connections)",
            key,
            self.current.cards.len(),
            self.current.connections.len()
        );
        self.notify(Notice::success(messages::BOARD_LOADED));
        Ok(())
    }

    /// Hand the current board to an exporter without waiting for it.
    pub fn export(&mut self, exporter: &mut dyn Exporter) {
        let request = ExportRequest {
            file_name: self.config.export_file_name.clone(),
            snapshot: self.current.clone(),
        };
        log::info!("Exporting board to {}", request.file_name);
        exporter.export(request);
        self.notify(Notice::success(messages::EXPORTED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryConfig;
    use crate::notice::NoticeLevel;
    use crate::snap::GRID_SIZE;

    fn board() -> Board<MemoryStorage> {
        Board::in_memory(BoardConfig::default()).unwrap()
    }

    fn notices(board: &mut Board<MemoryStorage>) -> Vec<Notice> {
        board
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                BoardEvent::Notice(notice) => Some(notice),
                BoardEvent::Changed { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_create_card_defaults() {
        let mut board = board();
        let task = board.create_card(CardType::Task);
        let note = board.create_card(CardType::Note);

        assert_eq!(task.as_str(), "card-0");
        assert_eq!(note.as_str(), "card-1");

        let task = board.card(&task).unwrap();
        assert_eq!(task.position, GridPoint::new(100, 100));
        assert_eq!(task.size, CardSize::new(300, 250));
        assert_eq!(task.progress(), Some(Progress::default()));
        assert_eq!(task.text, "Task: [Add Task]");

        let note = board.card(&note).unwrap();
        assert_eq!(note.progress(), None);
        assert_eq!(note.text, "Note: [Add Note]");
    }

    #[test]
    fn test_create_card_notifies_and_records() {
        let mut board = board();
        board.create_card(CardType::Note);

        assert!(board.can_undo());
        let notices = notices(&mut board);
        assert_eq!(notices, vec![Notice::success(messages::CARD_CREATED)]);
    }

    #[test]
    fn test_commit_emits_changed() {
        let mut board = board();
        board.create_card(CardType::Note);
        let events = board.drain_events();
        assert_eq!(events[0], BoardEvent::Changed { revision: 1 });
        assert_eq!(board.revision(), 1);
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let b = board.create_card(CardType::Note);
        board.delete_card(&a).unwrap();
        let c = board.create_card(CardType::Note);

        assert_ne!(c, b);
        assert_eq!(c.as_str(), "card-2");
    }

    #[test]
    fn test_move_snaps_to_grid() {
        let mut board = board();
        let id = board.create_card(CardType::Note);

        let pos = board.move_card(&id, Point::new(53.0, 97.0)).unwrap();
        assert_eq!(pos, GridPoint::new(50, 100));
        assert_eq!(board.card(&id).unwrap().position, GridPoint::new(50, 100));
    }

    #[test]
    fn test_move_far_off_board_stays_aligned() {
        let mut board = board();
        let id = board.create_card(CardType::Note);

        let pos = board.move_card(&id, Point::new(1e12, 55.0)).unwrap();
        assert!(pos.is_aligned(GRID_SIZE));
        assert_eq!(pos, GridPoint::new(2_147_483_640, 60));

        let pos = board.move_card(&id, Point::new(f64::NAN, -1e12)).unwrap();
        assert!(pos.is_aligned(GRID_SIZE));
        assert_eq!(pos.x, 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let zero_grid = BoardConfig {
            grid_size: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(Board::in_memory(zero_grid), Err(ConfigError::Invalid(_))));

        let no_history = BoardConfig {
            history: HistoryConfig {
                max_depth: Some(0),
                ..HistoryConfig::default()
            },
            ..BoardConfig::default()
        };
        assert!(matches!(Board::in_memory(no_history), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_depth_one_still_undoes() {
        let config = BoardConfig {
            history: HistoryConfig {
                max_depth: Some(1),
                ..HistoryConfig::default()
            },
            ..BoardConfig::default()
        };
        let mut board = Board::in_memory(config).unwrap();
        let id = board.create_card(CardType::Note);
        board.move_card(&id, Point::new(200.0, 200.0)).unwrap();

        board.undo().unwrap();
        assert_eq!(board.card(&id).unwrap().position, GridPoint::new(100, 100));
        assert!(matches!(board.undo(), Err(BoardError::EmptyHistory)));
    }

    #[test]
    fn test_move_uses_configured_grid() {
        let config = BoardConfig {
            grid_size: 25,
            ..BoardConfig::default()
        };
        let mut board = Board::in_memory(config).unwrap();
        let id = board.create_card(CardType::Note);

        let pos = board.move_card(&id, Point::new(60.0, 40.0)).unwrap();
        assert_eq!(pos, GridPoint::new(50, 50));
    }

    #[test]
    fn test_move_unknown_card() {
        let mut board = board();
        let result = board.move_card(&CardId::from("card-9"), Point::new(0.0, 0.0));

        assert!(matches!(result, Err(BoardError::NotFound(_))));
        assert!(!board.can_undo());
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn test_resize_stores_size_as_given() {
        let mut board = board();
        let id = board.create_card(CardType::Note);
        board.drain_events();

        // Outside the default constraints on purpose: the renderer enforces them.
        board.resize_card(&id, CardSize::new(1000, 10)).unwrap();
        assert_eq!(board.card(&id).unwrap().size, CardSize::new(1000, 10));
        assert_eq!(notices(&mut board), vec![Notice::success(messages::SIZE_UPDATED)]);
    }

    #[test]
    fn test_edit_text() {
        let mut board = board();
        let id = board.create_card(CardType::Note);

        assert!(board.edit_text(&id, Some("Buy milk".to_string())).unwrap());
        assert_eq!(board.card(&id).unwrap().text, "Buy milk");

        board.undo().unwrap();
        assert_eq!(board.card(&id).unwrap().text, "Note: [Add Note]");
    }

    #[test]
    fn test_edit_text_cancelled_is_noop() {
        let mut board = board();
        let id = board.create_card(CardType::Note);
        let revision = board.revision();

        assert!(!board.edit_text(&id, None).unwrap());
        assert_eq!(board.card(&id).unwrap().text, "Note: [Add Note]");
        assert_eq!(board.revision(), revision);
    }

    #[test]
    fn test_edit_text_empty_clears() {
        let mut board = board();
        let id = board.create_card(CardType::Note);

        assert!(board.edit_text(&id, Some(String::new())).unwrap());
        assert_eq!(board.card(&id).unwrap().text, "");
    }

    #[test]
    fn test_set_progress_clamps() {
        let mut board = board();
        let id = board.create_card(CardType::Task);

        assert_eq!(board.set_progress(&id, 150).unwrap().value(), 100);
        assert_eq!(board.card(&id).unwrap().progress().unwrap().value(), 100);
        assert_eq!(board.set_progress(&id, -5).unwrap().value(), 0);
        assert_eq!(board.set_progress(&id, 64).unwrap().value(), 64);
    }

    #[test]
    fn test_set_progress_on_note() {
        let mut board = board();
        let id = board.create_card(CardType::Note);

        let result = board.set_progress(&id, 10);
        assert!(matches!(result, Err(BoardError::NotATask(_))));
    }

    #[test]
    fn test_set_progress_skips_history_by_default() {
        let mut board = board();
        let id = board.create_card(CardType::Task);
        board.set_progress(&id, 40).unwrap();

        // The only undo point is the creation.
        board.undo().unwrap();
        assert!(board.cards().is_empty());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_set_progress_recorded_when_configured() {
        let config = BoardConfig {
            history: HistoryConfig {
                record_progress: true,
                ..HistoryConfig::default()
            },
            ..BoardConfig::default()
        };
        let mut board = Board::in_memory(config).unwrap();
        let id = board.create_card(CardType::Task);
        board.set_progress(&id, 40).unwrap();

        board.undo().unwrap();
        assert_eq!(board.card(&id).unwrap().progress().unwrap().value(), 0);
    }

    #[test]
    fn test_delete_cascades_connections() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let b = board.create_card(CardType::Note);
        let c = board.create_card(CardType::Note);
        board.create_connection(a.clone(), b.clone()).unwrap();
        board.create_connection(b.clone(), c.clone()).unwrap();
        board.create_connection(c.clone(), a.clone()).unwrap();
        board.create_connection(c.clone(), c.clone()).unwrap();

        board.delete_card(&a).unwrap();

        assert_eq!(
            board.connections(),
            &[
                Connection::new(b.clone(), c.clone()),
                Connection::new(c.clone(), c.clone())
            ]
        );
        assert!(board.card(&a).is_none());
    }

    #[test]
    fn test_delete_notifies_error_style() {
        let mut board = board();
        let id = board.create_card(CardType::Note);
        board.drain_events();

        board.delete_card(&id).unwrap();
        let notices = notices(&mut board);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_delete_unknown_card() {
        let mut board = board();
        assert!(matches!(
            board.delete_card(&CardId::from("card-3")),
            Err(BoardError::NotFound(_))
        ));
    }

    #[test]
    fn test_connect_toggle() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let b = board.create_card(CardType::Note);

        assert_eq!(board.toggle_connect_target(&a).unwrap(), None);
        assert_eq!(board.connect_mode(), &ConnectMode::Pending(a.clone()));

        let conn = board.toggle_connect_target(&b).unwrap();
        assert_eq!(conn, Some(Connection::new(a.clone(), b.clone())));
        assert_eq!(board.connect_mode(), &ConnectMode::Idle);
        assert_eq!(board.connections(), &[Connection::new(a, b)]);
    }

    #[test]
    fn test_connect_toggle_unknown_card() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        board.toggle_connect_target(&a).unwrap();

        let result = board.toggle_connect_target(&CardId::from("card-42"));
        assert!(matches!(result, Err(BoardError::NotFound(_))));
        assert_eq!(board.connect_mode(), &ConnectMode::Pending(a));
    }

    #[test]
    fn test_cancel_connect() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        board.toggle_connect_target(&a).unwrap();
        board.drain_events();
        board.cancel_connect();

        assert_eq!(board.connect_mode(), &ConnectMode::Idle);
        assert!(board.connections().is_empty());
        let notices = notices(&mut board);
        assert_eq!(notices, vec![Notice::info(messages::CONNECT_CANCELLED)]);
        assert_eq!(notices[0].level, NoticeLevel::Info);
    }

    #[test]
    fn test_cancel_connect_when_idle_is_silent() {
        let mut board = board();
        board.cancel_connect();

        assert_eq!(board.connect_mode(), &ConnectMode::Idle);
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_delete_pending_source_resets_connect() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        board.toggle_connect_target(&a).unwrap();
        board.delete_card(&a).unwrap();

        assert_eq!(board.connect_mode(), &ConnectMode::Idle);
    }

    #[test]
    fn test_duplicate_connections_allowed() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let b = board.create_card(CardType::Note);
        board.create_connection(a.clone(), b.clone()).unwrap();
        board.create_connection(a.clone(), b.clone()).unwrap();

        assert_eq!(board.connections().len(), 2);
    }

    #[test]
    fn test_create_connection_unknown_endpoint() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let result = board.create_connection(a, CardId::from("card-5"));

        assert!(matches!(result, Err(BoardError::NotFound(_))));
        assert!(board.connections().is_empty());
    }

    #[test]
    fn test_remove_connection() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let b = board.create_card(CardType::Note);
        board.create_connection(a.clone(), b.clone()).unwrap();
        board.create_connection(b.clone(), a.clone()).unwrap();

        let removed = board.remove_connection(0).unwrap();
        assert_eq!(removed, Connection::new(a.clone(), b.clone()));
        assert_eq!(board.connections(), &[Connection::new(b, a)]);
        assert!(matches!(
            board.remove_connection(5),
            Err(BoardError::ConnectionNotFound(5))
        ));
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut board = board();
        board.create_card(CardType::Note);
        board.undo().unwrap();
        let before = board.snapshot().clone();

        assert!(matches!(board.undo(), Err(BoardError::EmptyHistory)));
        assert_eq!(board.snapshot(), &before);
    }

    #[test]
    fn test_redo_empty_stack() {
        let mut board = board();
        board.create_card(CardType::Note);
        let before = board.snapshot().clone();

        assert!(matches!(board.redo(), Err(BoardError::EmptyHistory)));
        assert_eq!(board.snapshot(), &before);
    }

    #[test]
    fn test_undo_then_redo_restores() {
        let mut board = board();
        let a = board.create_card(CardType::Task);
        board.move_card(&a, Point::new(203.0, 148.0)).unwrap();
        board.resize_card(&a, CardSize::new(320, 260)).unwrap();
        let after = board.snapshot().clone();

        board.undo().unwrap();
        assert_ne!(board.snapshot(), &after);
        board.redo().unwrap();
        assert_eq!(board.snapshot(), &after);
    }

    #[test]
    fn test_undo_restores_connections() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        let b = board.create_card(CardType::Note);
        board.create_connection(a.clone(), b.clone()).unwrap();
        board.delete_card(&b).unwrap();
        assert!(board.connections().is_empty());

        board.undo().unwrap();
        assert_eq!(board.connections(), &[Connection::new(a.clone(), b.clone())]);

        board.undo().unwrap();
        assert!(board.connections().is_empty());
        assert_eq!(board.cards().len(), 2);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        board.move_card(&a, Point::new(300.0, 300.0)).unwrap();
        board.undo().unwrap();
        assert!(board.can_redo());

        board.resize_card(&a, CardSize::new(280, 240)).unwrap();
        assert!(!board.can_redo());
    }

    #[test]
    fn test_new_edit_keeps_redo_when_configured() {
        let config = BoardConfig {
            history: HistoryConfig {
                clear_redo_on_edit: false,
                ..HistoryConfig::default()
            },
            ..BoardConfig::default()
        };
        let mut board = Board::in_memory(config).unwrap();
        let a = board.create_card(CardType::Note);
        board.move_card(&a, Point::new(300.0, 300.0)).unwrap();
        board.undo().unwrap();

        board.resize_card(&a, CardSize::new(280, 240)).unwrap();
        assert!(board.can_redo());

        // The stale branch restores the moved card at its old size.
        board.redo().unwrap();
        let card = board.card(&a).unwrap();
        assert_eq!(card.position, GridPoint::new(300, 300));
        assert_eq!(card.size, CardSize::new(300, 250));
    }

    #[test]
    fn test_undo_resets_stale_pending_source() {
        let mut board = board();
        let a = board.create_card(CardType::Note);
        board.toggle_connect_target(&a).unwrap();

        board.undo().unwrap();
        assert_eq!(board.connect_mode(), &ConnectMode::Idle);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut board = board();
        let a = board.create_card(CardType::Task);
        let b = board.create_card(CardType::Note);
        board.set_progress(&a, 30).unwrap();
        board.create_connection(a.clone(), b.clone()).unwrap();
        let before = board.snapshot().clone();

        board.save().unwrap();
        board.load().unwrap();

        assert_eq!(board.snapshot(), &before);
    }

    #[test]
    fn test_load_replaces_state_and_clears_history() {
        let storage = Arc::new(MemoryStorage::new());
        let mut first = Board::new(BoardConfig::default(), storage.clone()).unwrap();
        first.create_card(CardType::Note);
        first.create_card(CardType::Task);
        first.save().unwrap();

        let mut second = Board::new(BoardConfig::default(), storage).unwrap();
        let local = second.create_card(CardType::Note);
        second.toggle_connect_target(&local).unwrap();
        second.load().unwrap();

        assert_eq!(second.cards().len(), 2);
        assert!(!second.can_undo());
        assert!(!second.can_redo());
        assert_eq!(second.connect_mode(), &ConnectMode::Idle);

        // Fresh ids continue after the loaded ones.
        let next = second.create_card(CardType::Note);
        assert_eq!(next.as_str(), "card-2");
    }

    #[test]
    fn test_load_missing_slot() {
        let mut board = board();
        let id = board.create_card(CardType::Note);
        board.drain_events();
        let before = board.snapshot().clone();

        let result = board.load();
        assert!(matches!(result, Err(BoardError::PersistenceMiss(_))));
        assert_eq!(board.snapshot(), &before);
        assert!(board.card(&id).is_some());
        assert_eq!(notices(&mut board), vec![Notice::error(messages::NO_SAVED_BOARD)]);
    }

    #[test]
    fn test_load_malformed_blob() {
        let mut board = board();
        board
            .storage()
            .insert_raw("canvasState", r#"{"cards": "nope"}"#)
            .unwrap();

        let result = board.load();
        assert!(matches!(result, Err(BoardError::MalformedPersistedState(_))));
        assert!(board.cards().is_empty());
    }

    #[test]
    fn test_load_dangling_connection() {
        let mut board = board();
        board
            .storage()
            .insert_raw(
                "canvasState",
                r#"{"cards": [], "connections": [{"from": "card-0", "to": "card-1"}]}"#,
            )
            .unwrap();

        assert!(matches!(
            board.load(),
            Err(BoardError::MalformedPersistedState(_))
        ));
        assert!(board.connections().is_empty());
    }

    #[test]
    fn test_load_is_not_undoable() {
        let mut board = board();
        board.save().unwrap();
        board.create_card(CardType::Note);
        board.load().unwrap();

        assert!(board.cards().is_empty());
        assert!(matches!(board.undo(), Err(BoardError::EmptyHistory)));
    }

    #[test]
    fn test_save_uses_configured_slot() {
        let config = BoardConfig {
            storage_key: "sprint-board".to_string(),
            ..BoardConfig::default()
        };
        let mut board = Board::in_memory(config).unwrap();
        board.create_card(CardType::Note);
        board.save().unwrap();

        assert!(board.storage().exists("sprint-board").unwrap());
        assert!(!board.storage().exists("canvasState").unwrap());
    }

    #[test]
    fn test_export_hands_off_snapshot() {
        struct Recorder(Vec<ExportRequest>);
        impl Exporter for Recorder {
            fn export(&mut self, request: ExportRequest) {
                self.0.push(request);
            }
        }

        let mut board = board();
        board.create_card(CardType::Note);
        board.drain_events();
        let mut recorder = Recorder(Vec::new());
        board.export(&mut recorder);

        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].file_name, "canvas.pdf");
        assert_eq!(&recorder.0[0].snapshot, board.snapshot());
        assert_eq!(notices(&mut board), vec![Notice::success(messages::EXPORTED)]);
    }
}
