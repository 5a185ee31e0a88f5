use std::sync::Arc;

use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::Utc;
use tracing::debug;

use shared_database::{AppState, DocumentStore, StoreError};

use crate::models::{CreateServiceRequest, Service, ServiceError, UpdateServiceRequest};

const COLLECTION: &str = "services";

pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Fetch every service, in insertion order.
    pub async fn list_services(&self) -> Result<Vec<Service>, ServiceError> {
        debug!("Fetching all services");

        let documents = self.store.find(COLLECTION, doc! {}, None).await?;

        documents.into_iter().map(parse_service).collect()
    }

    /// Fetch the services whose department contains `department`,
    /// case-insensitively. The segment is used as the pattern verbatim.
    pub async fn list_services_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Service>, ServiceError> {
        debug!("Fetching services for department: {}", department);

        let filter = doc! {"department": {"$regex": department, "$options": "i"}};
        let documents = self.store.find(COLLECTION, filter, None).await?;

        documents.into_iter().map(parse_service).collect()
    }

    /// Fetch a single service by its hex id.
    pub async fn get_service(&self, service_id: &str) -> Result<Service, ServiceError> {
        debug!("Fetching service: {}", service_id);

        let oid = parse_object_id(service_id)?;
        let document = self.store.find_one(COLLECTION, doc! {"_id": oid}).await?;

        match document {
            Some(document) => parse_service(document),
            None => Err(ServiceError::NotFound),
        }
    }

    /// Insert a new service and return the persisted record.
    pub async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<Service, ServiceError> {
        debug!("Creating service: {}", request.name);

        let mut document =
            bson::to_document(&request).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let now = Utc::now();
        document.insert("created_at", bson::DateTime::from_chrono(now));
        document.insert("updated_at", bson::DateTime::from_chrono(now));

        let inserted_id = self.store.insert_one(COLLECTION, document).await?;
        let oid = match inserted_id {
            Bson::ObjectId(oid) => oid,
            _ => return Err(ServiceError::CreateFailed),
        };

        let created = self.store.find_one(COLLECTION, doc! {"_id": oid}).await?;
        match created {
            Some(document) => parse_service(document),
            None => Err(ServiceError::CreateFailed),
        }
    }

    /// Merge-patch a service. Only fields supplied as non-null overwrite the
    /// stored record; an empty patch returns it unchanged.
    pub async fn update_service(
        &self,
        service_id: &str,
        request: UpdateServiceRequest,
    ) -> Result<Service, ServiceError> {
        debug!("Updating service: {}", service_id);

        let oid = parse_object_id(service_id)?;
        let existing = self
            .store
            .find_one(COLLECTION, doc! {"_id": oid})
            .await?
            .ok_or(ServiceError::NotFound)?;

        let payload =
            bson::to_document(&request).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let mut update = Document::new();
        for (field, value) in payload {
            if value != Bson::Null {
                update.insert(field, value);
            }
        }

        if update.is_empty() {
            return parse_service(existing);
        }

        update.insert("updated_at", bson::DateTime::from_chrono(Utc::now()));

        let modified = self
            .store
            .update_one(COLLECTION, doc! {"_id": oid}, doc! {"$set": update})
            .await?;

        if modified > 0 {
            if let Some(document) = self.store.find_one(COLLECTION, doc! {"_id": oid}).await? {
                return parse_service(document);
            }
        }

        parse_service(existing)
    }

    /// Delete a service by id. Deleting an absent record is an error.
    pub async fn delete_service(&self, service_id: &str) -> Result<(), ServiceError> {
        debug!("Deleting service: {}", service_id);

        let oid = parse_object_id(service_id)?;
        let deleted = self.store.delete_one(COLLECTION, doc! {"_id": oid}).await?;

        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }

        Ok(())
    }
}

fn parse_object_id(service_id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(service_id).map_err(|_| ServiceError::InvalidId)
}

fn parse_service(document: Document) -> Result<Service, ServiceError> {
    bson::from_document(document)
        .map_err(|e| StoreError::Malformed(format!("Failed to parse service: {}", e)).into())
}
