//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("CATERING_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// The store could not be opened or flushed
    #[error("CATERING_CLI_STORE_ERROR: {0}")]
    Store(#[from] StorageError),

    /// Runtime, bind or serve failure
    #[error("CATERING_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("CATERING_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    const CONFIG: &'static str = "CATERING_CLI_CONFIG_ERROR";
    const STORE: &'static str = "CATERING_CLI_STORE_ERROR";
    const IO: &'static str = "CATERING_CLI_IO_ERROR";

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => Self::CONFIG,
            Self::Store(_) => Self::STORE,
            Self::Io(_) | Self::Json(_) => Self::IO,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::from(ConfigError::Invalid("port must be > 0".into()));
        assert_eq!(err.code(), "CATERING_CLI_CONFIG_ERROR");
        assert_eq!(
            err.to_string(),
            "CATERING_CLI_CONFIG_ERROR: port must be > 0"
        );
    }

    #[test]
    fn test_store_error_code() {
        let err = CliError::from(StorageError::Poisoned);
        assert_eq!(err.code(), "CATERING_CLI_STORE_ERROR");
    }
}
