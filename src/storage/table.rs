//! In-memory collection tables shared by both store backends.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::filter::Filter;
use super::object_id::ObjectId;
use super::{Document, ID_FIELD};

/// Documents keyed by id; iteration order is id order.
type Collection = BTreeMap<ObjectId, Document>;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    collections: HashMap<String, Collection>,
}

impl Tables {
    /// Stamps a fresh id onto `document`, replacing any client-supplied one.
    pub(crate) fn stamp(mut document: Document) -> (ObjectId, Document) {
        let id = ObjectId::new();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
        (id, document)
    }

    pub(crate) fn get(&self, collection: &str, id: &ObjectId) -> Option<&Document> {
        self.collections.get(collection)?.get(id)
    }

    pub(crate) fn put(&mut self, collection: &str, id: ObjectId, document: Document) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, document);
    }

    pub(crate) fn remove(&mut self, collection: &str, id: &ObjectId) -> Option<Document> {
        self.collections.get_mut(collection)?.remove(id)
    }

    pub(crate) fn scan(&self, collection: &str, filter: &Filter) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.values().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default()
    }

    /// Computes the result of `$set`-merging `set` into a stored document.
    ///
    /// Returns `None` when the id does not exist, otherwise the merged
    /// document and whether any value actually changed. `_id` is never
    /// overwritten.
    pub(crate) fn merged(
        &self,
        collection: &str,
        id: &ObjectId,
        set: &Document,
    ) -> Option<(Document, bool)> {
        let mut document = self.get(collection, id)?.clone();
        let mut changed = false;

        for (field, value) in set {
            if field == ID_FIELD {
                continue;
            }
            if document.get(field) != Some(value) {
                document.insert(field.clone(), value.clone());
                changed = true;
            }
        }

        Some((document, changed))
    }

    pub(crate) fn document_count(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_stamp_replaces_client_id() {
        let (id, document) = Tables::stamp(doc(json!({"_id": "mine", "menu": "pasta"})));
        assert_eq!(document["_id"], json!(id.to_hex()));
        assert_eq!(document["menu"], json!("pasta"));
    }

    #[test]
    fn test_merge_reports_change_and_keeps_id() {
        let mut tables = Tables::default();
        let (id, document) = Tables::stamp(doc(json!({"menu": "pasta", "count": 10})));
        tables.put("meals", id, document);

        let set = doc(json!({"count": 12, "_id": "ffffffffffffffffffffffff"}));
        let (merged, changed) = tables.merged("meals", &id, &set).unwrap();
        assert!(changed);
        assert_eq!(merged["count"], json!(12));
        assert_eq!(merged["menu"], json!("pasta"));
        assert_eq!(merged["_id"], json!(id.to_hex()));

        let (_, changed) = tables.merged("meals", &id, &doc(json!({"count": 10}))).unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_merge_of_missing_id_is_none() {
        let tables = Tables::default();
        assert!(tables
            .merged("meals", &ObjectId::new(), &doc(json!({"count": 1})))
            .is_none());
    }
}
