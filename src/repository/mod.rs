//! # Data-access layer
//!
//! One repository per entity family. Each holds a shared store handle
//! injected at construction; none holds state of its own.
//!
//! | Family   | create | list | get | update | delete | by month |
//! |----------|--------|------|-----|--------|--------|----------|
//! | Company  | yes    | yes  |     |        |        |          |
//! | Employee | yes    | yes  |     |        |        |          |
//! | Meal     | yes    | yes  | yes | yes    | yes    | yes      |
//!
//! Identifier strings are decoded through [`ObjectId::parse`] before any
//! store call, so a malformed id never reaches the store.

mod company;
mod employee;
mod meal;

pub use company::{CompanyRepository, COMPANIES};
pub use employee::{EmployeeRepository, EMPLOYEES};
pub use meal::{MealRepository, MEALS};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::schema;
use crate::storage::{Document, DocumentStore, Filter, InvalidIdentifier, ObjectId, StorageError};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures of a repository call.
///
/// "Not found" is not here: it is a normal outcome (`None`, `false`,
/// [`UpdateOutcome::NotFound`]).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The id string is not a well-formed identifier
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    /// The store call failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    /// The record just inserted could not be read back
    #[error("{collection} record could not be created")]
    CreateFailed { collection: &'static str },

    /// A stored document no longer matches its output schema
    #[error("Stored {collection} document {id} is unreadable: {source}")]
    Decode {
        collection: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Whether the failure lies with the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidIdentifier(_))
    }
}

/// Result of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome<T> {
    /// The payload carried no fields; the store was not touched
    NoFieldsSupplied,
    /// No record has the given id
    NotFound,
    /// The record exists but already held every supplied value
    Unchanged,
    /// The merge was applied; carries the record as stored afterwards
    Updated(T),
}

impl<T> UpdateOutcome<T> {
    /// Collapses to the two-way outcome exposed over HTTP, where "nothing to
    /// apply", "nothing changed" and "no such record" look the same.
    pub fn into_updated(self) -> Option<T> {
        match self {
            Self::Updated(record) => Some(record),
            Self::NoFieldsSupplied | Self::NotFound | Self::Unchanged => None,
        }
    }
}

/// The three repositories over one store.
#[derive(Clone)]
pub struct Repositories {
    pub companies: CompanyRepository,
    pub employees: EmployeeRepository,
    pub meals: MealRepository,
}

impl Repositories {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            companies: CompanyRepository::new(store.clone()),
            employees: EmployeeRepository::new(store.clone()),
            meals: MealRepository::new(store),
        }
    }
}

/// Shared store access for one collection.
#[derive(Clone)]
pub(crate) struct Collection {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
}

impl Collection {
    pub(crate) fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self { store, name }
    }

    /// Inserts `document` and returns the authoritative stored record.
    pub(crate) fn create<T: DeserializeOwned>(&self, document: Document) -> RepositoryResult<T> {
        let id = self.store.insert(self.name, document)?;
        info!(collection = self.name, %id, "record created");

        match self.store.find_by_id(self.name, &id)? {
            Some(stored) => self.decode(stored),
            None => Err(RepositoryError::CreateFailed {
                collection: self.name,
            }),
        }
    }

    pub(crate) fn find<T: DeserializeOwned>(&self, filter: &Filter) -> RepositoryResult<Vec<T>> {
        self.store
            .find(self.name, filter)?
            .into_iter()
            .map(|document| self.decode(document))
            .collect()
    }

    pub(crate) fn find_by_id<T: DeserializeOwned>(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        self.store
            .find_by_id(self.name, id)?
            .map(|document| self.decode(document))
            .transpose()
    }

    pub(crate) fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    fn decode<T: DeserializeOwned>(&self, document: Document) -> RepositoryResult<T> {
        let id = document
            .get(crate::storage::ID_FIELD)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        schema::from_document(document).map_err(|source| RepositoryError::Decode {
            collection: self.name,
            id,
            source,
        })
    }
}
