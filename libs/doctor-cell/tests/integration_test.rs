use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use shared_database::{AppState, MemoryStore};

fn create_test_app() -> Router {
    let config = AppConfig {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        database_name: "curoo_test".to_string(),
        port: 0,
    };
    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    doctor_routes(state)
}

async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_doctor_crud_lifecycle() {
    let app = create_test_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "name": "Dr. Sarah Chen",
                "specialty": "Cardiology",
                "qualification": "MD",
                "experience": "12 years",
                "consultation_fee": 40.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    assert_eq!(created["name"], "Dr. Sarah Chen");
    assert_eq!(created["created_at"], created["updated_at"]);
    // Omitted day list comes back as an empty list, not null.
    assert_eq!(created["available_days"], json!([]));
    let doctor_id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(doctor_id.len(), 24);

    // Read back
    let response = app
        .clone()
        .oneshot(get_request(&format!("/{}", doctor_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json(response).await;
    assert_eq!(fetched, created);

    // Update the fee only
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", doctor_id),
            json!({"consultation_fee": 50.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["consultation_fee"], 50.0);
    assert_eq!(updated["name"], "Dr. Sarah Chen");

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", doctor_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = read_json(response).await;
    assert_eq!(deleted["message"], "Doctor deleted successfully");

    // Fetching it afterwards is a 404
    let response = app
        .clone()
        .oneshot(get_request(&format!("/{}", doctor_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["detail"], "Doctor not found");
}

#[tokio::test]
async fn test_list_returns_created_doctors() {
    let app = create_test_app();

    for name in ["Dr. A", "Dr. B"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "name": name,
                    "specialty": "General",
                    "qualification": "MD",
                    "experience": "5 years"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = read_json(response).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dr. A", "Dr. B"]);
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(get_request("/not-a-hex-id"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["detail"], "Invalid doctor ID format");
}

#[tokio::test]
async fn test_create_with_missing_required_field_is_unprocessable() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({"name": "Dr. Incomplete"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_with_malformed_json_is_bad_request() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
