use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{AppointmentError, CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::services::AppointmentService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AppointmentListQuery {
    pub status_filter: Option<String>,
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointments = appointment_service
        .list_appointments(query.status_filter)
        .await
        .map_err(|e| AppError::Internal(format!("Error fetching appointments: {}", e)))?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_appointments_by_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointments = appointment_service
        .list_appointments_by_doctor(&doctor_id)
        .await
        .map_err(|e| match e {
            AppointmentError::InvalidDoctorId => {
                AppError::BadRequest("Invalid doctor ID format".to_string())
            }
            e => AppError::Internal(format!("Error fetching appointments by doctor: {}", e)),
        })?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service
        .get_appointment(&appointment_id)
        .await
        .map_err(|e| match e {
            AppointmentError::InvalidId => {
                AppError::BadRequest("Invalid appointment ID format".to_string())
            }
            AppointmentError::NotFound => {
                AppError::NotFound("Appointment not found".to_string())
            }
            e => AppError::Internal(format!("Error fetching appointment: {}", e)),
        })?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateAppointmentRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service
        .create_appointment(payload)
        .await
        .map_err(|e| match e {
            AppointmentError::CreateFailed => {
                AppError::Internal("Failed to create appointment".to_string())
            }
            e => AppError::Internal(format!("Error creating appointment: {}", e)),
        })?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateAppointmentRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service
        .update_appointment(&appointment_id, payload)
        .await
        .map_err(|e| match e {
            AppointmentError::InvalidId => {
                AppError::BadRequest("Invalid appointment ID format".to_string())
            }
            AppointmentError::NotFound => {
                AppError::NotFound("Appointment not found".to_string())
            }
            e => AppError::Internal(format!("Error updating appointment: {}", e)),
        })?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    appointment_service
        .delete_appointment(&appointment_id)
        .await
        .map_err(|e| match e {
            AppointmentError::InvalidId => {
                AppError::BadRequest("Invalid appointment ID format".to_string())
            }
            AppointmentError::NotFound => {
                AppError::NotFound("Appointment not found".to_string())
            }
            e => AppError::Internal(format!("Error deleting appointment: {}", e)),
        })?;

    Ok(Json(json!({
        "message": "Appointment deleted successfully"
    })))
}
