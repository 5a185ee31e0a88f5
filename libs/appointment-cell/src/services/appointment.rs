use std::sync::Arc;

use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::Utc;
use tracing::debug;

use shared_database::{AppState, DocumentStore, StoreError};

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};

const COLLECTION: &str = "appointments";

pub struct AppointmentService {
    store: Arc<dyn DocumentStore>,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Fetch appointments, newest first, optionally narrowed to an exact
    /// status. An unknown status value simply matches nothing.
    pub async fn list_appointments(
        &self,
        status_filter: Option<String>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching appointments, status filter: {:?}", status_filter);

        let mut filter = Document::new();
        if let Some(status) = status_filter {
            if !status.is_empty() {
                filter.insert("status", status);
            }
        }

        let documents = self
            .store
            .find(COLLECTION, filter, Some(doc! {"created_at": -1}))
            .await?;

        documents.into_iter().map(parse_appointment).collect()
    }

    /// Fetch the appointments referencing a doctor, newest first. The doctor
    /// itself is never looked up.
    pub async fn list_appointments_by_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching appointments for doctor: {}", doctor_id);

        let oid =
            ObjectId::parse_str(doctor_id).map_err(|_| AppointmentError::InvalidDoctorId)?;
        let documents = self
            .store
            .find(
                COLLECTION,
                doc! {"doctor_id": oid},
                Some(doc! {"created_at": -1}),
            )
            .await?;

        documents.into_iter().map(parse_appointment).collect()
    }

    /// Fetch a single appointment by its hex id.
    pub async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        let oid = parse_object_id(appointment_id)?;
        let document = self.store.find_one(COLLECTION, doc! {"_id": oid}).await?;

        match document {
            Some(document) => parse_appointment(document),
            None => Err(AppointmentError::NotFound),
        }
    }

    /// Book an appointment. The status is forced to pending and the doctor
    /// reference is resolved; a string that is not a valid id is stored as
    /// null rather than rejected.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Creating appointment for: {} {}",
            request.first_name, request.last_name
        );

        let mut document =
            bson::to_document(&request).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let now = Utc::now();
        document.insert("created_at", bson::DateTime::from_chrono(now));
        document.insert("updated_at", bson::DateTime::from_chrono(now));
        document.insert("status", AppointmentStatus::Pending.to_string());

        let doctor_reference = resolve_doctor_reference(document.get("doctor_id"));
        document.insert("doctor_id", doctor_reference);

        let inserted_id = self.store.insert_one(COLLECTION, document).await?;
        let oid = match inserted_id {
            Bson::ObjectId(oid) => oid,
            _ => return Err(AppointmentError::CreateFailed),
        };

        let created = self.store.find_one(COLLECTION, doc! {"_id": oid}).await?;
        match created {
            Some(document) => parse_appointment(document),
            None => Err(AppointmentError::CreateFailed),
        }
    }

    /// Merge-patch an appointment. Only fields supplied as non-null overwrite
    /// the stored record; an empty patch returns it unchanged. A supplied but
    /// invalid doctor reference overwrites the stored one with null.
    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment: {}", appointment_id);

        let oid = parse_object_id(appointment_id)?;
        let existing = self
            .store
            .find_one(COLLECTION, doc! {"_id": oid})
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let payload =
            bson::to_document(&request).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let mut update = Document::new();
        for (field, value) in payload {
            if value != Bson::Null {
                update.insert(field, value);
            }
        }

        if update.is_empty() {
            return parse_appointment(existing);
        }

        if update.contains_key("doctor_id") {
            let doctor_reference = resolve_doctor_reference(update.get("doctor_id"));
            update.insert("doctor_id", doctor_reference);
        }
        update.insert("updated_at", bson::DateTime::from_chrono(Utc::now()));

        let modified = self
            .store
            .update_one(COLLECTION, doc! {"_id": oid}, doc! {"$set": update})
            .await?;

        if modified > 0 {
            if let Some(document) = self.store.find_one(COLLECTION, doc! {"_id": oid}).await? {
                return parse_appointment(document);
            }
        }

        parse_appointment(existing)
    }

    /// Delete an appointment by id. Deleting an absent record is an error.
    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        debug!("Deleting appointment: {}", appointment_id);

        let oid = parse_object_id(appointment_id)?;
        let deleted = self.store.delete_one(COLLECTION, doc! {"_id": oid}).await?;

        if deleted == 0 {
            return Err(AppointmentError::NotFound);
        }

        Ok(())
    }
}

fn parse_object_id(appointment_id: &str) -> Result<ObjectId, AppointmentError> {
    ObjectId::parse_str(appointment_id).map_err(|_| AppointmentError::InvalidId)
}

fn parse_appointment(document: Document) -> Result<Appointment, AppointmentError> {
    bson::from_document(document)
        .map_err(|e| StoreError::Malformed(format!("Failed to parse appointment: {}", e)).into())
}

/// Turns the raw doctor reference into what gets stored: a valid hex string
/// becomes an ObjectId, anything else becomes null.
fn resolve_doctor_reference(value: Option<&Bson>) -> Bson {
    match value {
        Some(Bson::String(id)) => match ObjectId::parse_str(id) {
            Ok(oid) => Bson::ObjectId(oid),
            Err(_) => Bson::Null,
        },
        _ => Bson::Null,
    }
}
