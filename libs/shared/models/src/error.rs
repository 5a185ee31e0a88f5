use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors shared across all cells.
///
/// Every variant carries the message that ends up in the response body,
/// so handlers decide the wording and this type decides the shape.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!("{}: {}", status, message);

        let body = Json(json!({
            "detail": message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Schema-level failures (missing/mistyped fields) keep their 422,
        // everything else (syntax errors, wrong content type) is a 400.
        if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
            AppError::Validation(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (
                AppError::BadRequest("bad".to_string()).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("missing".to_string()).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Validation("invalid".to_string()).into_response(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Internal("boom".to_string()).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn display_includes_message() {
        let error = AppError::NotFound("Doctor not found".to_string());
        assert_eq!(error.to_string(), "Not Found: Doctor not found");
    }
}
