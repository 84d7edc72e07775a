//! Router tests for the search, update and health endpoints.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use company_directory::{
    server::{create_router, AppState, UPDATE_FAILED},
    settings::Settings,
    Company, CompanyStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn sample() -> Vec<Company> {
    vec![
        Company::new("1", "Company A", "Company A is a tech company."),
        Company::new("2", "Company B", "Company B is an e-commerce platform."),
    ]
}

fn create_test_app(companies: Vec<Company>) -> (TempDir, Arc<CompanyStore>, Router) {
    let dir = tempdir().unwrap();
    let store = Arc::new(CompanyStore::from_companies(
        dir.path().join("companies.json"),
        companies,
    ));
    let app = create_router(AppState::new(store.clone(), Settings::default()));
    (dir, store, app)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

fn update_request(id: &str, body: Value) -> Request<Body> {
    Request::post(format!("/company/update?company_name_id={id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_search_returns_matching_companies() {
    let (_dir, _store, app) = create_test_app(sample());

    let response = app
        .oneshot(Request::get("/company/search?query=A").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let companies: Vec<Company> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id(), Some("1"));
}

#[tokio::test]
async fn test_search_serializes_wire_field_names() {
    let (_dir, _store, app) = create_test_app(sample());

    let response = app
        .oneshot(Request::get("/company/search?query=e-commerce").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body[0]["company_name_id"], json!("2"));
    assert_eq!(body[0]["company_name"], json!("Company B"));
    assert!(body[0]["year_founded"].is_null());
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    let (_dir, _store, app) = create_test_app(sample());

    let response = app
        .oneshot(Request::get("/company/search").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_error_is_internal_server_error() {
    let mut companies = sample();
    companies[0].description = None;
    let (_dir, _store, app) = create_test_app(companies);

    let response = app
        .oneshot(Request::get("/company/search?query=A").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_update_success() {
    let (dir, store, app) = create_test_app(sample());

    let response = app
        .oneshot(update_request("1", json!({"company_name": "Updated Company A"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Company updated successfully.");
    assert_eq!(store.snapshot()[0].name(), Some("Updated Company A"));
    assert!(dir.path().join("companies.json").exists());
}

#[tokio::test]
async fn test_update_applies_fields_in_request_order() {
    let (_dir, store, app) = create_test_app(sample());

    let request = Request::post("/company/update?company_name_id=1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"company_name": "Y", "companyName": "X"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.snapshot()[0].name(), Some("X"));
}

#[tokio::test]
async fn test_update_not_found() {
    let (dir, store, app) = create_test_app(sample());

    let response = app
        .oneshot(update_request("999", json!({"company_name": "X"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(response).await, b"Company not found.");
    assert_eq!(store.snapshot(), sample());
    assert!(!dir.path().join("companies.json").exists());
}

#[tokio::test]
async fn test_update_failure_is_internal_server_error() {
    let (_dir, _store, app) = create_test_app(sample());

    let response = app
        .oneshot(update_request("1", json!({"company_name": ["not", "text"]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_bytes(response).await, UPDATE_FAILED.as_bytes());
}

#[tokio::test]
async fn test_update_persist_failure_is_internal_server_error() {
    let dir = tempdir().unwrap();
    let store = Arc::new(CompanyStore::from_companies(
        dir.path().join("missing").join("companies.json"),
        sample(),
    ));
    let app = create_router(AppState::new(store.clone(), Settings::default()));

    let response = app
        .oneshot(update_request("2", json!({"city": "Lisbon"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // No rollback: memory keeps the change even though the save failed.
    assert_eq!(store.snapshot()[1].city.as_str(), Some("Lisbon"));
}

#[tokio::test]
async fn test_health_reports_company_count() {
    let (_dir, _store, app) = create_test_app(sample());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["companies"], json!(2));
}

#[tokio::test]
async fn test_rate_limit_rejects_excess_requests() {
    let dir = tempdir().unwrap();
    let store = Arc::new(CompanyStore::from_companies(dir.path().join("c.json"), sample()));
    let mut settings = Settings::default();
    settings.server.rate_limit_per_minute = 1;
    let app = create_router(AppState::new(store, settings));

    let first = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}
