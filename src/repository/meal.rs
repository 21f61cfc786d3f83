//! Meal records: the only family with read-by-id, update and delete.

use std::sync::Arc;

use tracing::{debug, info};

use super::{Collection, RepositoryResult, UpdateOutcome};
use crate::schema::{Meal, MealCreate, MealUpdate, MonthFilter};
use crate::storage::{DocumentStore, Filter, ObjectId};

pub const MEALS: &str = "meals";

#[derive(Clone)]
pub struct MealRepository {
    collection: Collection,
}

impl MealRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection: Collection::new(store, MEALS),
        }
    }

    pub fn create(&self, input: MealCreate) -> RepositoryResult<Meal> {
        self.collection.create(input.into_document())
    }

    pub fn list(&self) -> RepositoryResult<Vec<Meal>> {
        self.collection.find(&Filter::all())
    }

    /// Meals whose year and month both equal the filter's.
    pub fn list_by_month(&self, filter: MonthFilter) -> RepositoryResult<Vec<Meal>> {
        self.collection.find(&filter.to_filter())
    }

    pub fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Meal>> {
        let id = ObjectId::parse(id)?;
        self.collection.find_by_id(&id)
    }

    /// Merges the supplied fields into the meal.
    ///
    /// Only a merge that modifies the record is `Updated`; a matched record
    /// whose values already equal the supplied ones is `Unchanged`.
    pub fn update(&self, id: &str, input: MealUpdate) -> RepositoryResult<UpdateOutcome<Meal>> {
        let id = ObjectId::parse(id)?;

        if input.is_empty() {
            debug!(collection = MEALS, %id, "update with no fields");
            return Ok(UpdateOutcome::NoFieldsSupplied);
        }

        let result = self
            .collection
            .store()
            .update_by_id(self.collection.name(), &id, input.to_document())?;
        if result.matched == 0 {
            return Ok(UpdateOutcome::NotFound);
        }
        if result.modified == 0 {
            debug!(collection = MEALS, %id, "update left record unchanged");
            return Ok(UpdateOutcome::Unchanged);
        }

        info!(
            collection = MEALS,
            %id,
            fields = ?input.supplied().iter().collect::<Vec<_>>(),
            "record updated"
        );

        Ok(match self.collection.find_by_id(&id)? {
            Some(meal) => UpdateOutcome::Updated(meal),
            // deleted between the merge and the re-read
            None => UpdateOutcome::NotFound,
        })
    }

    /// Returns true iff a meal was deleted.
    pub fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let id = ObjectId::parse(id)?;
        let deleted = self
            .collection
            .store()
            .delete_by_id(self.collection.name(), &id)?
            == 1;

        if deleted {
            info!(collection = MEALS, %id, "record deleted");
        }
        Ok(deleted)
    }
}
