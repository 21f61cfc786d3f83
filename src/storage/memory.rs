//! Process-local document store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use super::errors::{StorageError, StorageResult};
use super::filter::Filter;
use super::object_id::ObjectId;
use super::table::Tables;
use super::{Document, DocumentStore, UpdateResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    pub fn document_count(&self) -> StorageResult<usize> {
        Ok(self.read()?.document_count())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StorageError::Poisoned)
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, collection: &str, document: Document) -> StorageResult<ObjectId> {
        let (id, document) = Tables::stamp(document);
        self.write()?.put(collection, id, document);
        trace!(collection, %id, "inserted");
        Ok(id)
    }

    fn find(&self, collection: &str, filter: &Filter) -> StorageResult<Vec<Document>> {
        Ok(self.read()?.scan(collection, filter))
    }

    fn find_by_id(&self, collection: &str, id: &ObjectId) -> StorageResult<Option<Document>> {
        Ok(self.read()?.get(collection, id).cloned())
    }

    fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        set: Document,
    ) -> StorageResult<UpdateResult> {
        let mut tables = self.write()?;
        let Some((merged, changed)) = tables.merged(collection, id, &set) else {
            return Ok(UpdateResult::default());
        };

        if changed {
            tables.put(collection, *id, merged);
        }

        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    fn delete_by_id(&self, collection: &str, id: &ObjectId) -> StorageResult<u64> {
        Ok(u64::from(self.write()?.remove(collection, id).is_some()))
    }
}
