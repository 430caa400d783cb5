//! Evaluation settings
//!
//! [`EvalConfig`] is read from a JSON file. Missing fields take their default
//! values, and a missing file yields the default configuration.
//!
//! ```json
//! { "pawn_table_entries": 16384, "log_filter": "info" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ChessEngineError, ChessEngineResult};

pub const DEFAULT_PAWN_TABLE_ENTRIES: usize = 16384;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Slots per pawn table, must be a power of two
    pub pawn_table_entries: usize,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            pawn_table_entries: DEFAULT_PAWN_TABLE_ENTRIES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EvalConfig {
    /// Parse and validate a configuration from JSON text
    pub fn from_json(text: &str) -> ChessEngineResult<Self> {
        let config: EvalConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid JSON, or holds
    /// invalid values.
    pub fn load(path: &Path) -> ChessEngineResult<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!("[CONFIG] Loaded settings from {:?}", path);
        Ok(config)
    }

    /// Like [`EvalConfig::load`], but a missing file gives the defaults
    pub fn load_or_default(path: &Path) -> ChessEngineResult<Self> {
        if !path.exists() {
            tracing::info!("[CONFIG] No settings file found at {:?}. Using defaults.", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> ChessEngineResult<()> {
        if self.pawn_table_entries == 0 || !self.pawn_table_entries.is_power_of_two() {
            return Err(ChessEngineError::InvalidConfig {
                message: format!(
                    "pawn_table_entries must be a power of two, got {}",
                    self.pawn_table_entries
                ),
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> ChessEngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
