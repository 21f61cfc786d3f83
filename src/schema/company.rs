//! Company schemas

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::email::EmailAddress;
use crate::storage::{Document, ObjectId};

/// Status given to every new company.
pub const DEFAULT_COMPANY_STATUS: &str = "Active";

/// Body of `POST /companies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub email: EmailAddress,
    pub address: String,
}

impl CompanyCreate {
    /// Document to insert, with server-assigned defaults resolved.
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        doc.insert("name".into(), Value::String(self.name));
        doc.insert("email".into(), Value::String(self.email.into_inner()));
        doc.insert("address".into(), Value::String(self.address));
        doc.insert("status".into(), Value::String(DEFAULT_COMPANY_STATUS.into()));
        doc.insert("employeesCount".into(), Value::from(0));
        doc
    }
}

/// A stored company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: EmailAddress,
    pub address: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "employeesCount", default)]
    pub employees_count: i64,
}

fn default_status() -> String {
    DEFAULT_COMPANY_STATUS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_document_resolves_defaults() {
        let create: CompanyCreate = serde_json::from_value(json!({
            "name": "Acme",
            "email": "info@acme.com",
            "address": "1 Main St",
        }))
        .unwrap();

        let doc = create.into_document();
        assert_eq!(doc["status"], json!("Active"));
        assert_eq!(doc["employeesCount"], json!(0));
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_create_rejects_bad_email() {
        let result = serde_json::from_value::<CompanyCreate>(json!({
            "name": "Acme",
            "email": "acme",
            "address": "1 Main St",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_ignores_client_status_and_id() {
        let create: CompanyCreate = serde_json::from_value(json!({
            "_id": "507f1f77bcf86cd799439011",
            "name": "Acme",
            "email": "info@acme.com",
            "address": "1 Main St",
            "status": "Closed",
            "employeesCount": 99,
        }))
        .unwrap();

        let doc = create.into_document();
        assert_eq!(doc["status"], json!("Active"));
        assert_eq!(doc["employeesCount"], json!(0));
    }

    #[test]
    fn test_output_fills_missing_defaults() {
        let company: Company = serde_json::from_value(json!({
            "_id": "507f1f77bcf86cd799439011",
            "name": "Acme",
            "email": "info@acme.com",
            "address": "1 Main St",
        }))
        .unwrap();

        assert_eq!(company.status, "Active");
        assert_eq!(company.employees_count, 0);

        let out = serde_json::to_value(&company).unwrap();
        assert_eq!(out["_id"], json!("507f1f77bcf86cd799439011"));
        assert_eq!(out["employeesCount"], json!(0));
    }
}
