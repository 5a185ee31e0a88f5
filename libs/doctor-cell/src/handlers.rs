use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError, UpdateDoctorRequest};
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn get_doctors(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service
        .list_doctors()
        .await
        .map_err(|e| AppError::Internal(format!("Error fetching doctors: {}", e)))?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .get_doctor(&doctor_id)
        .await
        .map_err(|e| match e {
            DoctorError::InvalidId => AppError::BadRequest("Invalid doctor ID format".to_string()),
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            e => AppError::Internal(format!("Error fetching doctor: {}", e)),
        })?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateDoctorRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .create_doctor(payload)
        .await
        .map_err(|e| match e {
            DoctorError::CreateFailed => AppError::Internal("Failed to create doctor".to_string()),
            e => AppError::Internal(format!("Error creating doctor: {}", e)),
        })?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateDoctorRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .update_doctor(&doctor_id, payload)
        .await
        .map_err(|e| match e {
            DoctorError::InvalidId => AppError::BadRequest("Invalid doctor ID format".to_string()),
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            e => AppError::Internal(format!("Error updating doctor: {}", e)),
        })?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    doctor_service
        .delete_doctor(&doctor_id)
        .await
        .map_err(|e| match e {
            DoctorError::InvalidId => AppError::BadRequest("Invalid doctor ID format".to_string()),
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            e => AppError::Internal(format!("Error deleting doctor: {}", e)),
        })?;

    Ok(Json(json!({
        "message": "Doctor deleted successfully"
    })))
}
