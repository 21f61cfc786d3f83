//! Employee records: create and list.

use std::sync::Arc;

use super::{Collection, RepositoryResult};
use crate::schema::{Employee, EmployeeCreate};
use crate::storage::{DocumentStore, Filter};

pub const EMPLOYEES: &str = "employees";

#[derive(Clone)]
pub struct EmployeeRepository {
    collection: Collection,
}

impl EmployeeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection: Collection::new(store, EMPLOYEES),
        }
    }

    /// Stores a new employee with shift `N/A`.
    pub fn create(&self, input: EmployeeCreate) -> RepositoryResult<Employee> {
        self.collection.create(input.into_document())
    }

    pub fn list(&self) -> RepositoryResult<Vec<Employee>> {
        self.collection.find(&Filter::all())
    }
}
