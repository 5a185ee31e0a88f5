use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{CreateServiceRequest, ServiceError, UpdateServiceRequest};
use crate::services::CatalogService;

#[axum::debug_handler]
pub async fn get_services(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let catalog_service = CatalogService::new(&state);

    let services = catalog_service
        .list_services()
        .await
        .map_err(|e| AppError::Internal(format!("Error fetching services: {}", e)))?;

    Ok(Json(json!(services)))
}

#[axum::debug_handler]
pub async fn get_services_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<Value>, AppError> {
    let catalog_service = CatalogService::new(&state);

    let services = catalog_service
        .list_services_by_department(&department)
        .await
        .map_err(|e| {
            AppError::Internal(format!("Error fetching services by department: {}", e))
        })?;

    Ok(Json(json!(services)))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let catalog_service = CatalogService::new(&state);

    let service = catalog_service
        .get_service(&service_id)
        .await
        .map_err(|e| match e {
            ServiceError::InvalidId => {
                AppError::BadRequest("Invalid service ID format".to_string())
            }
            ServiceError::NotFound => AppError::NotFound("Service not found".to_string()),
            e => AppError::Internal(format!("Error fetching service: {}", e)),
        })?;

    Ok(Json(json!(service)))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateServiceRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let catalog_service = CatalogService::new(&state);

    let service = catalog_service
        .create_service(payload)
        .await
        .map_err(|e| match e {
            ServiceError::CreateFailed => {
                AppError::Internal("Failed to create service".to_string())
            }
            e => AppError::Internal(format!("Error creating service: {}", e)),
        })?;

    Ok(Json(json!(service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateServiceRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let catalog_service = CatalogService::new(&state);

    let service = catalog_service
        .update_service(&service_id, payload)
        .await
        .map_err(|e| match e {
            ServiceError::InvalidId => {
                AppError::BadRequest("Invalid service ID format".to_string())
            }
            ServiceError::NotFound => AppError::NotFound("Service not found".to_string()),
            e => AppError::Internal(format!("Error updating service: {}", e)),
        })?;

    Ok(Json(json!(service)))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let catalog_service = CatalogService::new(&state);

    catalog_service
        .delete_service(&service_id)
        .await
        .map_err(|e| match e {
            ServiceError::InvalidId => {
                AppError::BadRequest("Invalid service ID format".to_string())
            }
            ServiceError::NotFound => AppError::NotFound("Service not found".to_string()),
            e => AppError::Internal(format!("Error deleting service: {}", e)),
        })?;

    Ok(Json(json!({
        "message": "Service deleted successfully"
    })))
}
