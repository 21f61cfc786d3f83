//! Durable document store
//!
//! State lives in memory and is rebuilt on open by replaying
//! `<data_dir>/catering.log`:
//!
//! - Put records replace the document for their id (latest wins)
//! - Delete records remove it
//! - Any checksum or framing failure aborts the open
//!
//! Writes hold the table lock across append + apply, so the log order is the
//! order in which readers observe changes.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use super::errors::{StorageError, StorageResult};
use super::filter::Filter;
use super::object_id::ObjectId;
use super::reader::LogReader;
use super::record::{LogRecord, RecordKind};
use super::table::Tables;
use super::writer::LogWriter;
use super::{Document, DocumentStore, UpdateResult};

struct Inner {
    tables: Tables,
    log: LogWriter,
}

pub struct FileStore {
    data_dir: PathBuf,
    inner: RwLock<Inner>,
}

impl FileStore {
    /// Opens the store in `data_dir`, replaying any existing log.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let log = LogWriter::open(data_dir)?;
        let tables = Self::replay(log.path())?;

        info!(
            path = %log.path().display(),
            documents = tables.document_count(),
            bytes = log.current_offset(),
            "document log replayed"
        );

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            inner: RwLock::new(Inner { tables, log }),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Number of live documents across all collections.
    pub fn document_count(&self) -> StorageResult<usize> {
        Ok(self.read()?.tables.document_count())
    }

    fn replay(path: &Path) -> StorageResult<Tables> {
        let mut tables = Tables::default();
        let mut reader = LogReader::open(path)?;

        loop {
            let offset = reader.current_offset();
            let Some(record) = reader.read_next()? else {
                break;
            };

            match record.kind {
                RecordKind::Put => {
                    let document = record.document().map_err(|e| {
                        StorageError::corruption(offset, format!("Undecodable document: {}", e))
                    })?;
                    tables.put(&record.collection, record.id, document);
                }
                RecordKind::Delete => {
                    tables.remove(&record.collection, &record.id);
                }
            }
        }

        Ok(tables)
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StorageError::Poisoned)
    }
}

impl DocumentStore for FileStore {
    fn insert(&self, collection: &str, document: Document) -> StorageResult<ObjectId> {
        let (id, document) = Tables::stamp(document);
        let record = LogRecord::put(collection, id, &document)?;

        let mut inner = self.write()?;
        let offset = inner.log.append(&record)?;
        inner.tables.put(collection, id, document);

        debug!(collection, %id, offset, "put appended");
        Ok(id)
    }

    fn find(&self, collection: &str, filter: &Filter) -> StorageResult<Vec<Document>> {
        Ok(self.read()?.tables.scan(collection, filter))
    }

    fn find_by_id(&self, collection: &str, id: &ObjectId) -> StorageResult<Option<Document>> {
        Ok(self.read()?.tables.get(collection, id).cloned())
    }

    fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        set: Document,
    ) -> StorageResult<UpdateResult> {
        let mut inner = self.write()?;
        let Some((merged, changed)) = inner.tables.merged(collection, id, &set) else {
            return Ok(UpdateResult::default());
        };

        if changed {
            let offset = inner.log.append(&LogRecord::put(collection, *id, &merged)?)?;
            inner.tables.put(collection, *id, merged);
            debug!(collection, %id, offset, "put appended");
        }

        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    fn delete_by_id(&self, collection: &str, id: &ObjectId) -> StorageResult<u64> {
        let mut inner = self.write()?;
        if inner.tables.get(collection, id).is_none() {
            return Ok(0);
        }

        let offset = inner.log.append(&LogRecord::delete(collection, *id))?;
        inner.tables.remove(collection, id);

        debug!(collection, %id, offset, "tombstone appended");
        Ok(1)
    }

    fn flush(&self) -> StorageResult<()> {
        self.write()?.log.sync()
    }
}
