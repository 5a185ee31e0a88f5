use async_trait::async_trait;
use bson::{Bson, Document};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Failure reported by the backing database driver.
    #[error("{0}")]
    Database(String),

    /// A stored document no longer matches the shape the caller expects.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// An insert acknowledged without handing back an object id.
    #[error("insert did not return an object id")]
    NoInsertId,
}

/// The document operations the cells are written against.
///
/// Filters and updates use the MongoDB query shapes (`_id` equality,
/// `$regex` with `$options`, `$set`) because that is the wire contract the
/// production store speaks. [`crate::memory::MemoryStore`] interprets the
/// same subset for tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document matching `filter`, optionally sorted by a
    /// single-field sort document such as `{"created_at": -1}`.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Returns the first document matching `filter`, if any.
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Inserts `document` and returns the id the store assigned to it.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError>;

    /// Applies `update` to the first document matching `filter` and returns
    /// how many documents actually changed.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError>;

    /// Deletes the first document matching `filter` and returns how many
    /// documents were removed.
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Round-trips to the database to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
