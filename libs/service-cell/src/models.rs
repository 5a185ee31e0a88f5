use bson::oid::ObjectId;
use bson::serde_helpers::{chrono_datetime_as_bson_datetime, serialize_object_id_as_hex_string};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;

// ==============================================================================
// SERVICE MODELS
// ==============================================================================

fn default_string_list() -> Option<Vec<String>> {
    Some(Vec::new())
}

fn default_true() -> bool {
    true
}

/// A medical service offered by the center, as stored in the `services`
/// collection and returned over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default = "default_string_list")]
    pub features: Option<Vec<String>>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a service. `available` defaults to true when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default = "default_string_list")]
    pub features: Option<Vec<String>>,
}

/// Merge-patch payload for updating a service. Absent and null fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub department: Option<String>,
    pub available: Option<bool>,
    pub features: Option<Vec<String>>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid service ID format")]
    InvalidId,

    #[error("Service not found")]
    NotFound,

    #[error("Failed to create service")]
    CreateFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}
