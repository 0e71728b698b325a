use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default database location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./Data/AgDataAPI.db";

/// Default time a connection waits on a locked database.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// SQLite journal mode. Values map 1:1 to the `journal_mode` pragma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
}

impl JournalMode {
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// Configuration for [`SqliteRecordStore`](crate::SqliteRecordStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteStoreConfig {
    /// Path to the database file. Created, with its parent directory, if missing.
    pub path: PathBuf,
    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
    pub journal_mode: JournalMode,
}

impl SqliteStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: JournalMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = SqliteStoreConfig::default();
        assert_eq!(c.path, PathBuf::from("./Data/AgDataAPI.db"));
        assert_eq!(c.busy_timeout(), Duration::from_secs(5));
        assert_eq!(c.journal_mode, JournalMode::Wal);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c: SqliteStoreConfig = toml::from_str(r#"path = "/tmp/records.db""#).unwrap();
        assert_eq!(c.path, PathBuf::from("/tmp/records.db"));
        assert_eq!(c.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }

    #[test]
    fn journal_mode_from_toml() {
        let c: SqliteStoreConfig = toml::from_str(r#"journal_mode = "delete""#).unwrap();
        assert_eq!(c.journal_mode.pragma_value(), "delete");
    }
}
