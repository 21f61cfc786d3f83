//! Service configuration
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults
//! 2. JSON config file (`--config`), if given
//! 3. Environment variables:
//!    `CATERING_HOST`, `CATERING_PORT`, `CATERING_STORE`,
//!    `CATERING_DATA_DIR`, `CATERING_LOG_FORMAT`
//!
//! `RUST_LOG`, when set, takes precedence over `log_level`.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::storage::{DocumentStore, FileStore, MemoryStore, StorageError};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

/// Which store backend to open at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process-local; contents are lost on exit
    Memory,
    /// Durable log under `data_dir`
    #[default]
    File,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(format!("unknown store '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(flatten)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreKind,

    /// Directory of the durable store (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default tracing filter (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            store: StoreKind::default(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads defaults, the optional file, then process env overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies overrides from `lookup` (the process environment in
    /// production).
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CATERING_HOST") {
            self.http.host = host;
        }
        if let Some(port) = lookup("CATERING_PORT") {
            self.http.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "CATERING_PORT",
                value: port,
            })?;
        }
        if let Some(store) = lookup("CATERING_STORE") {
            self.store = store.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "CATERING_STORE",
                value: store,
            })?;
        }
        if let Some(dir) = lookup("CATERING_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup("CATERING_LOG_FORMAT") {
            self.log_format = format.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "CATERING_LOG_FORMAT",
                value: format,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.store == StoreKind::File && self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "data_dir is required for the file store".to_string(),
            ));
        }
        Ok(())
    }

    /// Opens the configured store backend.
    pub fn open_store(&self) -> Result<Arc<dyn DocumentStore>, StorageError> {
        match self.store {
            StoreKind::Memory => {
                info!("using in-memory store; records will not survive a restart");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreKind::File => Ok(Arc::new(FileStore::open(&self.data_dir)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.store, StoreKind::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_is_flat_and_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 9100, "store": "memory", "log_format": "json"}}"#).unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http.port, 9100);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ServiceConfig::from_file(Path::new("/nonexistent/catering.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ServiceConfig::default();
        config
            .apply_env(env(&[
                ("CATERING_PORT", "9200"),
                ("CATERING_STORE", "MEMORY"),
                ("CATERING_DATA_DIR", "/var/lib/catering"),
            ]))
            .unwrap();

        assert_eq!(config.http.port, 9200);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/catering"));
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let mut config = ServiceConfig::default();
        let err = config
            .apply_env(env(&[("CATERING_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("CATERING_PORT"));

        let err = config
            .apply_env(env(&[("CATERING_STORE", "mongo")]))
            .unwrap_err();
        assert!(err.to_string().contains("mongo"));
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let mut config = ServiceConfig::default();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_open_memory_store() {
        let config = ServiceConfig {
            store: StoreKind::Memory,
            ..Default::default()
        };
        let store = config.open_store().unwrap();
        assert!(store.flush().is_ok());
    }
}
