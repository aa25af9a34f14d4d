//! Cardboard Core Library
//!
//! Board state engine for the Cardboard whiteboard: cards, connections,
//! undo/redo history and persistence. Rendering and gesture handling live
//! with the host, which drives a [`Board`] and drains its events.

pub mod board;
pub mod card;
pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod history;
pub mod notice;
pub mod snap;
pub mod snapshot;
pub mod storage;

pub use board::Board;
pub use card::{Card, CardId, CardKind, CardSize, CardType, Progress, SizeConstraints};
pub use config::{BoardConfig, ConfigError};
pub use connection::{ConnectMode, Connection};
pub use error::{BoardError, BoardResult};
pub use export::{DEFAULT_EXPORT_FILE_NAME, ExportRequest, Exporter};
pub use history::{History, HistoryConfig};
pub use notice::{BoardEvent, Notice, NoticeLevel};
pub use snap::{GRID_SIZE, GridPoint, snap_to_grid};
pub use snapshot::BoardSnapshot;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
