use std::sync::Arc;

use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::Utc;
use tracing::debug;

use shared_database::{AppState, DocumentStore, StoreError};

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, UpdateDoctorRequest};

const COLLECTION: &str = "doctors";

pub struct DoctorService {
    store: Arc<dyn DocumentStore>,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Fetch every doctor, in insertion order.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Fetching all doctors");

        let documents = self.store.find(COLLECTION, doc! {}, None).await?;

        documents.into_iter().map(parse_doctor).collect()
    }

    /// Fetch a single doctor by its hex id.
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        let oid = parse_object_id(doctor_id)?;
        let document = self.store.find_one(COLLECTION, doc! {"_id": oid}).await?;

        match document {
            Some(document) => parse_doctor(document),
            None => Err(DoctorError::NotFound),
        }
    }

    /// Insert a new doctor and return the persisted record.
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        debug!("Creating doctor: {}", request.name);

        let mut document =
            bson::to_document(&request).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let now = Utc::now();
        document.insert("created_at", bson::DateTime::from_chrono(now));
        document.insert("updated_at", bson::DateTime::from_chrono(now));

        let inserted_id = self.store.insert_one(COLLECTION, document).await?;
        let oid = match inserted_id {
            Bson::ObjectId(oid) => oid,
            _ => return Err(DoctorError::CreateFailed),
        };

        let created = self.store.find_one(COLLECTION, doc! {"_id": oid}).await?;
        match created {
            Some(document) => parse_doctor(document),
            None => Err(DoctorError::CreateFailed),
        }
    }

    /// Merge-patch a doctor. Only fields supplied as non-null overwrite the
    /// stored record; an empty patch returns it unchanged.
    pub async fn update_doctor(
        &self,
        doctor_id: &str,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        debug!("Updating doctor: {}", doctor_id);

        let oid = parse_object_id(doctor_id)?;
        let existing = self
            .store
            .find_one(COLLECTION, doc! {"_id": oid})
            .await?
            .ok_or(DoctorError::NotFound)?;

        let payload =
            bson::to_document(&request).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let mut update = Document::new();
        for (field, value) in payload {
            if value != Bson::Null {
                update.insert(field, value);
            }
        }

        if update.is_empty() {
            return parse_doctor(existing);
        }

        update.insert("updated_at", bson::DateTime::from_chrono(Utc::now()));

        let modified = self
            .store
            .update_one(COLLECTION, doc! {"_id": oid}, doc! {"$set": update})
            .await?;

        if modified > 0 {
            if let Some(document) = self.store.find_one(COLLECTION, doc! {"_id": oid}).await? {
                return parse_doctor(document);
            }
        }

        parse_doctor(existing)
    }

    /// Delete a doctor by id. Deleting an absent record is an error.
    pub async fn delete_doctor(&self, doctor_id: &str) -> Result<(), DoctorError> {
        debug!("Deleting doctor: {}", doctor_id);

        let oid = parse_object_id(doctor_id)?;
        let deleted = self.store.delete_one(COLLECTION, doc! {"_id": oid}).await?;

        if deleted == 0 {
            return Err(DoctorError::NotFound);
        }

        Ok(())
    }
}

fn parse_object_id(doctor_id: &str) -> Result<ObjectId, DoctorError> {
    ObjectId::parse_str(doctor_id).map_err(|_| DoctorError::InvalidId)
}

fn parse_doctor(document: Document) -> Result<Doctor, DoctorError> {
    bson::from_document(document)
        .map_err(|e| StoreError::Malformed(format!("Failed to parse doctor: {}", e)).into())
}
