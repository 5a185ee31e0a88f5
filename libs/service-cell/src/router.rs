use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn service_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_services))
        .route("/", post(handlers::create_service))
        .route("/department/{department}", get(handlers::get_services_by_department))
        .route("/{service_id}", get(handlers::get_service))
        .route("/{service_id}", put(handlers::update_service))
        .route("/{service_id}", delete(handlers::delete_service))
        .with_state(state)
}
