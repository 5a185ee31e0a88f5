use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use regex::RegexBuilder;
use tokio::sync::RwLock;

use crate::store::{DocumentStore, StoreError};

/// In-memory [`DocumentStore`] used by tests.
///
/// Interprets the query subset the cells actually issue: field equality,
/// `$regex` with `$options`, `$set` updates, and single-field sorts.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &Document, candidate: &Document) -> Result<bool, StoreError> {
    for (field, expected) in filter {
        match expected {
            Bson::Document(spec) if spec.contains_key("$regex") => {
                let pattern = spec.get_str("$regex").map_err(|_| {
                    StoreError::Database("$regex pattern must be a string".to_string())
                })?;
                let options = spec.get_str("$options").unwrap_or("");
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(options.contains('i'))
                    .build()
                    .map_err(|e| StoreError::Database(format!("invalid $regex filter: {}", e)))?;

                match candidate.get(field) {
                    Some(Bson::String(value)) if regex.is_match(value) => {}
                    _ => return Ok(false),
                }
            }
            other => {
                if candidate.get(field) != Some(other) {
                    return Ok(false);
                }
            }
        }
    }

    Ok(true)
}

fn compare_field(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::Int32(x)), Some(Bson::Int32(y))) => x.cmp(y),
        (Some(Bson::Int64(x)), Some(Bson::Int64(y))) => x.cmp(y),
        (Some(Bson::Double(x)), Some(Bson::Double(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn sort_documents(documents: &mut [Document], sort: &Document) {
    if let Some((field, direction)) = sort.iter().next() {
        let descending = match direction {
            Bson::Int32(v) => *v < 0,
            Bson::Int64(v) => *v < 0,
            Bson::Double(v) => *v < 0.0,
            _ => false,
        };

        documents.sort_by(|a, b| {
            let ordering = compare_field(a.get(field), b.get(field));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        let mut results = Vec::new();
        if let Some(documents) = collections.get(collection) {
            for document in documents {
                if matches(&filter, document)? {
                    results.push(document.clone());
                }
            }
        }

        if let Some(sort) = sort {
            sort_documents(&mut results, &sort);
        }

        Ok(results)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;

        if let Some(documents) = collections.get(collection) {
            for document in documents {
                if matches(&filter, document)? {
                    return Ok(Some(document.clone()));
                }
            }
        }

        Ok(None)
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Bson, StoreError> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let id = document.get("_id").cloned().ok_or(StoreError::NoInsertId)?;

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError> {
        let set = update
            .get_document("$set")
            .map_err(|_| StoreError::Database("only $set updates are supported".to_string()))?
            .clone();

        let mut collections = self.collections.write().await;
        let documents = match collections.get_mut(collection) {
            Some(documents) => documents,
            None => return Ok(0),
        };

        for document in documents.iter_mut() {
            if matches(&filter, document)? {
                let before = document.clone();
                for (field, value) in &set {
                    document.insert(field.clone(), value.clone());
                }
                // Mirrors MongoDB's modified_count, which skips no-op writes.
                return Ok(u64::from(*document != before));
            }
        }

        Ok(0)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;

        if let Some(documents) = collections.get_mut(collection) {
            for index in 0..documents.len() {
                if matches(&filter, &documents[index])? {
                    documents.remove(index);
                    return Ok(1);
                }
            }
        }

        Ok(0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn object_id(id: Bson) -> ObjectId {
        match id {
            Bson::ObjectId(oid) => oid,
            other => panic!("expected an object id, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn insert_assigns_an_object_id() {
        let store = MemoryStore::new();

        let id = store
            .insert_one("doctors", doc! {"name": "Dr. Adams"})
            .await
            .unwrap();
        let oid = object_id(id);

        let found = store.find_one("doctors", doc! {"_id": oid}).await.unwrap();
        assert_eq!(found.unwrap().get_str("name").unwrap(), "Dr. Adams");
    }

    #[tokio::test]
    async fn regex_filter_matches_case_insensitively() {
        let store = MemoryStore::new();
        store
            .insert_one("services", doc! {"department": "Cardiology"})
            .await
            .unwrap();
        store
            .insert_one("services", doc! {"department": "Neurology"})
            .await
            .unwrap();

        let matched = store
            .find(
                "services",
                doc! {"department": {"$regex": "cardio", "$options": "i"}},
                None,
            )
            .await
            .unwrap();

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get_str("department").unwrap(), "Cardiology");
    }

    #[tokio::test]
    async fn sorts_descending_by_date() {
        let store = MemoryStore::new();
        store
            .insert_one(
                "appointments",
                doc! {"patient_name": "early", "created_at": bson::DateTime::from_millis(1_000)},
            )
            .await
            .unwrap();
        store
            .insert_one(
                "appointments",
                doc! {"patient_name": "late", "created_at": bson::DateTime::from_millis(2_000)},
            )
            .await
            .unwrap();

        let sorted = store
            .find("appointments", doc! {}, Some(doc! {"created_at": -1}))
            .await
            .unwrap();

        assert_eq!(sorted[0].get_str("patient_name").unwrap(), "late");
        assert_eq!(sorted[1].get_str("patient_name").unwrap(), "early");
    }

    #[tokio::test]
    async fn update_reports_whether_anything_changed() {
        let store = MemoryStore::new();
        let id = store
            .insert_one("doctors", doc! {"name": "Dr. Brown", "fee": 30.0})
            .await
            .unwrap();
        let oid = object_id(id);

        let modified = store
            .update_one("doctors", doc! {"_id": oid}, doc! {"$set": {"fee": 50.0}})
            .await
            .unwrap();
        assert_eq!(modified, 1);

        let unchanged = store
            .update_one("doctors", doc! {"_id": oid}, doc! {"$set": {"fee": 50.0}})
            .await
            .unwrap();
        assert_eq!(unchanged, 0);
    }

    #[tokio::test]
    async fn delete_of_missing_document_returns_zero() {
        let store = MemoryStore::new();

        let deleted = store
            .delete_one("doctors", doc! {"_id": ObjectId::new()})
            .await
            .unwrap();

        assert_eq!(deleted, 0);
    }
}
