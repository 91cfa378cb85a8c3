//! Runtime configuration for hosts embedding the note widget.
//!
//! The widget itself takes no options; hosts decide where notes and logs live.

use crate::logging::default_log_level;
use crate::store::NOTES_STORAGE_KEY;
use log::LevelFilter;
use std::path::PathBuf;

/// File logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl LogConfig {
    pub fn new(level: LevelFilter, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level,
            log_dir: log_dir.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file backing the key-value store; `None` keeps notes in memory.
    pub db_path: Option<PathBuf>,
    /// Key the note list is persisted under.
    pub storage_key: String,
    /// File logging; `None` leaves logging uninitialized.
    pub logging: Option<LogConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            storage_key: NOTES_STORAGE_KEY.to_string(),
            logging: None,
        }
    }
}

impl AppConfig {
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    /// Enables file logging at `level`, or the build-mode default.
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>, level: Option<LevelFilter>) -> Self {
        self.logging = Some(LogConfig::new(
            level.unwrap_or_else(default_log_level),
            log_dir,
        ));
        self
    }
}
