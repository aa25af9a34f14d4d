//! Board configuration.

use crate::card::{CardSize, SizeConstraints};
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use crate::history::HistoryConfig;
use crate::snap::{GRID_SIZE, GridPoint};
use crate::storage::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for a board. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid unit that card positions snap to.
    pub grid_size: i32,
    /// Where new cards appear.
    pub default_position: GridPoint,
    /// Size of new cards.
    pub default_size: CardSize,
    /// Resize bounds handed to the renderer.
    pub size_constraints: SizeConstraints,
    /// Storage slot used by save/load.
    pub storage_key: String,
    /// File name passed to the exporter.
    pub export_file_name: String,
    pub history: HistoryConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            default_position: GridPoint::new(100, 100),
            default_size: CardSize::default(),
            size_constraints: SizeConstraints::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            history: HistoryConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if !self.size_constraints.is_consistent() {
            return Err(ConfigError::Invalid(
                "size_constraints.min exceeds size_constraints.max".to_string(),
            ));
        }
        if !self.size_constraints.contains(self.default_size) {
            return Err(ConfigError::Invalid(
                "default_size lies outside size_constraints".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key is empty".to_string()));
        }
        if self.history.max_depth == Some(0) {
            return Err(ConfigError::Invalid("history.max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}
