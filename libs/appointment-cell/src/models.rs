// libs/appointment-cell/src/models.rs
use std::fmt;

use bson::oid::ObjectId;
use bson::serde_helpers::{chrono_datetime_as_bson_datetime, serialize_object_id_as_hex_string};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::serde_helpers::serialize_opt_object_id_as_hex_string;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A patient's appointment request, as stored in the `appointments`
/// collection and returned over HTTP.
///
/// `doctor_id` is a loose reference: it may point at a doctor that no longer
/// exists, and the backend never checks. That matches how the public booking
/// form uses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    #[serde(default, serialize_with = "serialize_opt_object_id_as_hex_string")]
    pub doctor_id: Option<ObjectId>,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
    pub status: AppointmentStatus,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Payload for booking an appointment. The doctor reference arrives as a
/// plain string and is resolved by the service; the status is always set to
/// pending server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub doctor_id: Option<String>,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
}

/// Merge-patch payload for updating an appointment. Only the scheduling
/// fields are updatable; patient contact details are fixed at booking time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Invalid appointment ID format")]
    InvalidId,

    #[error("Invalid doctor ID format")]
    InvalidDoctorId,

    #[error("Appointment not found")]
    NotFound,

    #[error("Failed to create appointment")]
    CreateFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}
