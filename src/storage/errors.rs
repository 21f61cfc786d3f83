//! Storage error types

use std::io;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures of the document store.
///
/// None of these carry "not found": a missing document is an `Ok(None)` or a
/// zero count, never an error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Disk I/O failed
    #[error("Storage I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The log failed framing or checksum validation
    #[error("Data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A document body could not be encoded or decoded
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Returns whether the on-disk state can no longer be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corruption { .. })
    }
}
