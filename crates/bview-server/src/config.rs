use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Gzip responses for clients that accept it.
    pub compression: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3333)),
            db_path: PathBuf::from("bview.redb"),
            compression: true,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> ServerResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(ServerError::Config("request_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3333".parse::<SocketAddr>().unwrap());
        assert_eq!(c.db_path, PathBuf::from("bview.redb"));
        assert!(c.compression);
        assert_eq!(c.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            compression = false
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert!(!c.compression);
        assert_eq!(c.request_timeout_secs, 30);
        assert_eq!(c.db_path, PathBuf::from("bview.redb"));
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 42").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = ServerConfig::from_toml_str("request_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, ServerError::Config(ref msg) if msg.contains("request_timeout_secs")));
        assert!(ServerConfig::from_toml_str("request_timeout_secs = 1").is_ok());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bview.toml");
        std::fs::write(&path, "db_path = \"/var/lib/bview/data.redb\"\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.db_path, PathBuf::from("/var/lib/bview/data.redb"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ServerConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
