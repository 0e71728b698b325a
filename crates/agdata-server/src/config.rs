use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use agdata_store::SqliteStoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database: SqliteStoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            database: SqliteStoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.database.path, PathBuf::from("./Data/AgDataAPI.db"));
    }

    #[test]
    fn parse_partial_toml() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"

            [database]
            path = "/var/lib/agdata/records.db"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.database.path, PathBuf::from("/var/lib/agdata/records.db"));
        assert_eq!(c.database.busy_timeout_ms, 5_000);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn toml_round_trip() {
        let c = ServerConfig::default();
        let text = c.to_toml_string().unwrap();
        assert_eq!(ServerConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("agdata.toml");
        std::fs::write(&path, "bind_addr = \"127.0.0.1:6000\"\n").unwrap();
        assert_eq!(ServerConfig::load(&path).unwrap().bind_addr.port(), 6000);
    }
}
