//! Company records: create and list.

use std::sync::Arc;

use super::{Collection, RepositoryResult};
use crate::schema::{Company, CompanyCreate};
use crate::storage::{DocumentStore, Filter};

pub const COMPANIES: &str = "companies";

#[derive(Clone)]
pub struct CompanyRepository {
    collection: Collection,
}

impl CompanyRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection: Collection::new(store, COMPANIES),
        }
    }

    /// Stores a new company with status `Active` and no employees.
    pub fn create(&self, input: CompanyCreate) -> RepositoryResult<Company> {
        self.collection.create(input.into_document())
    }

    pub fn list(&self) -> RepositoryResult<Vec<Company>> {
        self.collection.find(&Filter::all())
    }
}
