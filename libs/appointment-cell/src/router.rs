use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_appointments))
        .route("/", post(handlers::create_appointment))
        .route("/doctor/{doctor_id}", get(handlers::get_appointments_by_doctor))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", put(handlers::update_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .with_state(state)
}
