//! Document storage
//!
//! The store is an opaque collection-of-documents engine. Repositories talk
//! to it only through [`DocumentStore`], receiving a shared handle at
//! construction time.
//!
//! Two backends:
//!
//! - [`MemoryStore`]: process-local, lost on exit
//! - [`FileStore`]: replayed from an append-only, checksummed log on open
//!
//! Both keep documents as JSON objects with the id stored under `_id` in its
//! hex form. Single-document operations are atomic; nothing spans documents.

mod checksum;
mod errors;
mod file;
mod filter;
mod memory;
mod object_id;
mod reader;
mod record;
mod table;
mod writer;

pub use checksum::compute_checksum;
pub use errors::{StorageError, StorageResult};
pub use file::FileStore;
pub use filter::Filter;
pub use memory::MemoryStore;
pub use object_id::{InvalidIdentifier, ObjectId, OBJECT_ID_HEX_LEN, OBJECT_ID_LEN};
pub use reader::LogReader;
pub use record::{LogRecord, RecordKind};
pub use writer::{LogWriter, LOG_FILE_NAME};

/// A stored document: a JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Key under which every document carries its id.
pub const ID_FIELD: &str = "_id";

/// Outcome of an update-by-id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Documents whose id matched (0 or 1)
    pub matched: u64,
    /// Documents whose stored values changed (0 or 1)
    pub modified: u64,
}

/// Collection store used by the repositories.
pub trait DocumentStore: Send + Sync {
    /// Inserts a document and returns the id the store assigned to it.
    /// Any `_id` already present in `document` is replaced.
    fn insert(&self, collection: &str, document: Document) -> StorageResult<ObjectId>;

    /// Returns every document matching `filter`, in id order.
    fn find(&self, collection: &str, filter: &Filter) -> StorageResult<Vec<Document>>;

    fn find_by_id(&self, collection: &str, id: &ObjectId) -> StorageResult<Option<Document>>;

    /// Merges the fields of `set` into the document with the given id.
    fn update_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
        set: Document,
    ) -> StorageResult<UpdateResult>;

    /// Deletes the document with the given id and returns how many were
    /// removed (0 or 1).
    fn delete_by_id(&self, collection: &str, id: &ObjectId) -> StorageResult<u64>;

    /// Makes every acknowledged write durable. Called once at shutdown.
    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }
}
