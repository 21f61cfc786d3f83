//! Employee schemas

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::email::EmailAddress;
use crate::storage::{Document, ObjectId};

/// Shift given to every new employee.
pub const DEFAULT_SHIFT: &str = "N/A";

/// Body of `POST /employees`.
///
/// `company_id` is stored as given; it is not checked against the
/// companies collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: EmailAddress,
    pub position: String,
    #[serde(default)]
    pub company_id: Option<String>,
}

impl EmployeeCreate {
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        doc.insert("name".into(), Value::String(self.name));
        doc.insert("email".into(), Value::String(self.email.into_inner()));
        doc.insert("position".into(), Value::String(self.position));
        doc.insert("shift".into(), Value::String(DEFAULT_SHIFT.into()));
        doc.insert(
            "company_id".into(),
            self.company_id.map_or(Value::Null, Value::String),
        );
        doc
    }
}

/// A stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: EmailAddress,
    pub position: String,
    #[serde(default = "default_shift")]
    pub shift: String,
    #[serde(default)]
    pub company_id: Option<String>,
}

fn default_shift() -> String {
    DEFAULT_SHIFT.to_string()
}
