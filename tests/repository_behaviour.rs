//! Repository Behaviour Tests
//!
//! Create/list/get/update/delete over a shared in-memory store, including the
//! update outcomes that the HTTP layer collapses into one 404.

use std::collections::HashSet;
use std::sync::Arc;

use catering::repository::{Repositories, RepositoryError, UpdateOutcome};
use catering::schema::{self, CompanyCreate, EmployeeCreate, MealCreate, MealUpdate, MonthFilter};
use catering::storage::{MemoryStore, ObjectId};
use serde_json::json;

// =============================================================================
// Test Utilities
// =============================================================================

fn repositories() -> Repositories {
    Repositories::new(Arc::new(MemoryStore::new()))
}

fn meal(day: i64, month: i64, year: i64, meal_type: &str, count: i64) -> MealCreate {
    MealCreate {
        day,
        month,
        year,
        meal_type: meal_type.to_string(),
        menu: "Rice, beans".to_string(),
        count,
    }
}

// =============================================================================
// Companies and employees
// =============================================================================

#[test]
fn test_company_create_resolves_defaults() {
    let repos = repositories();
    let input: CompanyCreate = schema::parse(json!({
        "name": "Acme",
        "email": "info@acme.com",
        "address": "1 Main St"
    }))
    .unwrap();

    let company = repos.companies.create(input).unwrap();
    assert_eq!(company.status, "Active");
    assert_eq!(company.employees_count, 0);

    let listed = repos.companies.list().unwrap();
    assert_eq!(listed, vec![company]);
}

#[test]
fn test_employee_company_id_is_optional() {
    let repos = repositories();
    let without: EmployeeCreate = schema::parse(json!({
        "name": "Ana",
        "email": "ana@acme.com",
        "position": "Cook"
    }))
    .unwrap();
    let with: EmployeeCreate = schema::parse(json!({
        "name": "Bo",
        "email": "bo@acme.com",
        "position": "Driver",
        "company_id": "not-checked-against-companies"
    }))
    .unwrap();

    let a = repos.employees.create(without).unwrap();
    let b = repos.employees.create(with).unwrap();

    assert_eq!(a.shift, "N/A");
    assert_eq!(a.company_id, None);
    assert_eq!(b.company_id.as_deref(), Some("not-checked-against-companies"));
    assert_eq!(repos.employees.list().unwrap().len(), 2);
}

#[test]
fn test_families_do_not_share_records() {
    let repos = repositories();
    repos.meals.create(meal(1, 3, 2024, "Lunch", 10)).unwrap();

    assert!(repos.companies.list().unwrap().is_empty());
    assert!(repos.employees.list().unwrap().is_empty());
}

// =============================================================================
// Meals
// =============================================================================

#[test]
fn test_meal_get_after_create() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();

    let fetched = repos.meals.get_by_id(&created.id.to_hex()).unwrap();
    assert_eq!(fetched, Some(created));
}

#[test]
fn test_meal_get_unknown_and_malformed_ids() {
    let repos = repositories();

    assert_eq!(repos.meals.get_by_id(&ObjectId::new().to_hex()).unwrap(), None);

    let err = repos.meals.get_by_id("abc").unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidIdentifier(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_meal_update_single_field_leaves_others() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();
    let id = created.id.to_hex();

    let outcome = repos
        .meals
        .update(&id, MealUpdate::new().with_count(55))
        .unwrap();

    let updated = match outcome {
        UpdateOutcome::Updated(meal) => meal,
        other => panic!("expected an update, got {:?}", other),
    };
    assert_eq!(updated.count, 55);
    assert_eq!(updated.meal_type, "Lunch");
    assert_eq!(updated.menu, created.menu);
    assert_eq!(updated.day, 5);
    assert_eq!(repos.meals.get_by_id(&id).unwrap(), Some(updated));
}

#[test]
fn test_meal_update_with_same_values_is_unchanged() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();
    let id = created.id.to_hex();

    let outcome = repos
        .meals
        .update(&id, MealUpdate::new().with_type("Lunch").with_count(40))
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Unchanged);
    assert_eq!(outcome.into_updated(), None);
    assert_eq!(repos.meals.get_by_id(&id).unwrap(), Some(created));
}

#[test]
fn test_meal_update_with_one_new_value_is_updated() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();

    let outcome = repos
        .meals
        .update(
            &created.id.to_hex(),
            MealUpdate::new().with_type("Lunch").with_count(41),
        )
        .unwrap();
    match outcome {
        UpdateOutcome::Updated(meal) => assert_eq!(meal.count, 41),
        other => panic!("expected an update, got {:?}", other),
    }
}

#[test]
fn test_meal_update_outcomes_are_distinguished_internally() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();

    let empty = repos
        .meals
        .update(&created.id.to_hex(), MealUpdate::new())
        .unwrap();
    assert_eq!(empty, UpdateOutcome::NoFieldsSupplied);

    let missing = repos
        .meals
        .update(&ObjectId::new().to_hex(), MealUpdate::new().with_count(1))
        .unwrap();
    assert_eq!(missing, UpdateOutcome::NotFound);

    // both collapse to the same boundary outcome
    assert_eq!(empty.into_updated(), None);
    assert_eq!(missing.into_updated(), None);
}

#[test]
fn test_meal_update_checks_id_before_payload() {
    let repos = repositories();
    let err = repos.meals.update("zz", MealUpdate::new()).unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidIdentifier(_)));
}

#[test]
fn test_meal_update_ignores_unknown_keys() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();

    let update = MealUpdate::from_json(json!({"menu": "Soup", "day": 9})).unwrap();
    let updated = repos
        .meals
        .update(&created.id.to_hex(), update)
        .unwrap()
        .into_updated()
        .unwrap();

    assert_eq!(updated.menu, "Soup");
    assert_eq!(updated.day, 5);
}

#[test]
fn test_meal_delete_is_not_repeatable() {
    let repos = repositories();
    let created = repos.meals.create(meal(5, 3, 2024, "Lunch", 40)).unwrap();
    let id = created.id.to_hex();

    assert!(repos.meals.delete(&id).unwrap());
    assert!(!repos.meals.delete(&id).unwrap());
    assert_eq!(repos.meals.get_by_id(&id).unwrap(), None);
    assert!(repos.meals.list().unwrap().is_empty());
}

#[test]
fn test_meals_by_month_matches_year_and_month() {
    let repos = repositories();
    let march = repos.meals.create(meal(1, 3, 2024, "Lunch", 10)).unwrap();
    let late_march = repos.meals.create(meal(28, 3, 2024, "Dinner", 12)).unwrap();
    repos.meals.create(meal(1, 4, 2024, "Lunch", 10)).unwrap();
    repos.meals.create(meal(1, 3, 2025, "Lunch", 10)).unwrap();

    let found: HashSet<ObjectId> = repos
        .meals
        .list_by_month(MonthFilter::new(2024, 3))
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(found, HashSet::from([march.id, late_march.id]));

    assert!(repos
        .meals
        .list_by_month(MonthFilter::new(2030, 1))
        .unwrap()
        .is_empty());
}

#[test]
fn test_list_returns_every_created_record() {
    let repos = repositories();
    let ids: HashSet<ObjectId> = (1..=5)
        .map(|day| repos.meals.create(meal(day, 1, 2024, "Lunch", day)).unwrap().id)
        .collect();

    let listed = repos.meals.list().unwrap();
    assert_eq!(listed.len(), ids.len());
    assert_eq!(listed.into_iter().map(|m| m.id).collect::<HashSet<_>>(), ids);
}
