use std::any::Any;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Response, StatusCode},
    routing::get,
    Json, Router,
};
use http_body_util::Full;
use serde_json::{json, Value};
use tracing::{error, warn};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use service_cell::router::service_routes;
use shared_database::AppState;

/// Composes the full application: the liveness root plus the resource cells
/// nested under the `/curoo/api` base path the public UI is built against.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check).with_state(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/services", service_routes(state.clone()))
        .nest("/appointments", appointment_routes(state));

    Router::new()
        .route("/", get(root))
        .nest("/curoo/api", api_routes)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Connected to MongoDB Atlas"
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let (status, database) = match state.store.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            warn!("Database ping failed: {}", e);
            ("degraded", "disconnected")
        }
    };

    Json(json!({
        "status": status,
        "database": database,
    }))
}

/// Renders a panic escaping a handler as a plain 500, in the same
/// `{"detail": ..}` shape the error type uses.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unhandled internal error".to_string()
    };

    error!("Request handler panicked: {}", detail);

    let body = json!({
        "detail": detail,
    })
    .to_string();

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn panic_response_carries_the_panic_message() {
        let response = handle_panic(Box::new("boom".to_string()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "boom");
    }

    #[tokio::test]
    async fn panic_response_handles_opaque_payloads() {
        let response = handle_panic(Box::new(42_u32));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Unhandled internal error");
    }
}
