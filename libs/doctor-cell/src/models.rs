use bson::oid::ObjectId;
use bson::serde_helpers::{chrono_datetime_as_bson_datetime, serialize_object_id_as_hex_string};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;

// ==============================================================================
// DOCTOR MODELS
// ==============================================================================

fn default_string_list() -> Option<Vec<String>> {
    Some(Vec::new())
}

/// A doctor as stored in the `doctors` collection and returned over HTTP.
///
/// The identifier serializes as its 24-character hex form under `_id`, which
/// is the shape the public UI reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub specialty: String,
    pub qualification: String,
    pub experience: String,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    #[serde(default = "default_string_list")]
    pub available_days: Option<Vec<String>>,
    pub available_hours: Option<String>,
    pub consultation_fee: Option<f64>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a doctor. Carries no id, timestamps, or status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialty: String,
    pub qualification: String,
    pub experience: String,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    #[serde(default = "default_string_list")]
    pub available_days: Option<Vec<String>>,
    pub available_hours: Option<String>,
    pub consultation_fee: Option<f64>,
}

/// Merge-patch payload for updating a doctor. Absent and null fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub available_days: Option<Vec<String>>,
    pub available_hours: Option<String>,
    pub consultation_fee: Option<f64>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Invalid doctor ID format")]
    InvalidId,

    #[error("Doctor not found")]
    NotFound,

    #[error("Failed to create doctor")]
    CreateFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}
