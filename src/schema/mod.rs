//! Entity schemas
//!
//! Each entity family comes in up to three variants:
//!
//! - **Create** (`CompanyCreate`, ...): client-supplied fields only, no id
//! - **Update** (`MealUpdate`): every field optional, presence tracked
//! - **Output** (`Company`, ...): id plus every field, defaults resolved;
//!   the only variant sent back to clients
//!
//! Shape validation (types, email addresses, nulls) happens while parsing a
//! payload, so an invalid body never reaches the store.

mod company;
mod email;
mod employee;
mod errors;
mod fields;
mod meal;

pub use company::{Company, CompanyCreate, DEFAULT_COMPANY_STATUS};
pub use email::EmailAddress;
pub use employee::{Employee, EmployeeCreate, DEFAULT_SHIFT};
pub use errors::{ValidationError, ValidationResult};
pub use fields::FieldSet;
pub use meal::{Meal, MealCreate, MealUpdate, MonthFilter};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::storage::Document;

/// Validates a JSON payload against a schema variant.
pub fn parse<T: DeserializeOwned>(payload: Value) -> ValidationResult<T> {
    if !payload.is_object() {
        return Err(ValidationError::NotAnObject);
    }
    serde_json::from_value(payload).map_err(ValidationError::from)
}

/// Decodes a stored document into its output variant.
pub fn from_document<T: DeserializeOwned>(document: Document) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(document))
}
