use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{Client, Database};
use shared_config::AppConfig;
use tracing::info;

use crate::store::{DocumentStore, StoreError};

/// [`DocumentStore`] backed by a MongoDB deployment.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to the deployment named by the configuration.
    ///
    /// The driver connects lazily, so this succeeding does not guarantee the
    /// server is up. Callers that care should follow with [`DocumentStore::ping`].
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.mongodb_uri)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let database = client.database(&config.database_name);

        info!("Using MongoDB database '{}'", config.database_name);

        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let coll = self.collection(collection);
        let mut query = coll.find(filter);
        if let Some(sort) = sort {
            query = query.sort(sort);
        }

        let cursor = query
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.collection(collection)
            .find_one(filter)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, update)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.modified_count)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
