//! Append-only log writer
//!
//! Records are appended and `sync_data`'d before the caller applies the
//! change in memory, so an acknowledged write survives a restart.
//!
//! A failed append is cut back off the file, so the log never holds a torn
//! record or one the caller was told had failed. If the cut itself fails the
//! writer refuses every later append.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use super::errors::{StorageError, StorageResult};
use super::record::LogRecord;

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "catering.log";

pub struct LogWriter {
    path: PathBuf,
    file: File,
    current_offset: u64,
    failed: bool,
}

impl LogWriter {
    /// Opens or creates `<data_dir>/catering.log`, creating the directory if
    /// needed.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                StorageError::io(
                    format!("Failed to create data directory: {}", data_dir.display()),
                    e,
                )
            })?;
        }

        let path = data_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StorageError::io(format!("Failed to open log file: {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::io("Failed to read log metadata", e))?
            .len();

        Ok(Self {
            path,
            file,
            current_offset,
            failed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Whether an earlier rollback failed and appends are refused.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Appends a record and syncs it to disk.
    ///
    /// Returns the offset the record was written at. On error nothing of the
    /// record remains in the log.
    pub fn append(&mut self, record: &LogRecord) -> StorageResult<u64> {
        if self.failed {
            return Err(StorageError::io(
                format!("Log writer for {} is failed", self.path.display()),
                io::Error::other("an earlier append could not be rolled back"),
            ));
        }

        let bytes = record.serialize();
        let offset = self.current_offset;

        if let Err(e) = self.write_synced(&bytes) {
            warn!(offset, error = %e, "append failed, rolling back");
            // a failed rollback marks the writer failed; report the append error
            let _ = self.truncate_to(offset);
            return Err(StorageError::io(
                format!("Failed to append record for {}/{}", record.collection, record.id),
                e,
            ));
        }

        self.current_offset += bytes.len() as u64;
        Ok(offset)
    }

    pub fn sync(&mut self) -> StorageResult<()> {
        self.file
            .sync_data()
            .map_err(|e| StorageError::io("fsync of log file failed", e))
    }

    fn write_synced(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)?;
        self.file.sync_data()
    }

    /// Cuts the log back to `offset` and syncs the new length.
    fn truncate_to(&mut self, offset: u64) -> StorageResult<()> {
        match self.file.set_len(offset).and_then(|_| self.file.sync_data()) {
            Ok(()) => {
                self.current_offset = offset;
                Ok(())
            }
            Err(e) => {
                self.failed = true;
                error!(path = %self.path.display(), offset, error = %e, "log rollback failed");
                Err(StorageError::io("Failed to roll back log", e))
            }
        }
    }
}
