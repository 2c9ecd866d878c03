// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP layer tests.
//!
//! Drives the axum router in-process over the mock repository, so the
//! full request/response surface is exercised without a running store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use personapi_server::handlers::{CreatePersonHandler, PersonQueryHandler};
use personapi_server::model::{Address, Person};
use personapi_server::repository::{MockPersonRepository, PersonRepository};
use personapi_server::server::{AppState, router};

/// Build an app over a fresh mock repository, returning both so tests
/// can seed or inspect the store directly.
fn app() -> (Router, Arc<MockPersonRepository>) {
    let repository = Arc::new(MockPersonRepository::new());
    let dyn_repository: Arc<dyn PersonRepository> = repository.clone();
    let state = AppState::new(
        CreatePersonHandler::new(dyn_repository.clone()),
        PersonQueryHandler::new(dyn_repository),
    );
    (router(state), repository)
}

/// App over a repository whose every operation fails.
fn failing_app() -> Router {
    let repository: Arc<dyn PersonRepository> = Arc::new(MockPersonRepository::failing());
    let state = AppState::new(
        CreatePersonHandler::new(repository.clone()),
        PersonQueryHandler::new(repository),
    );
    router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn create_payload() -> Value {
    json!({
        "name": "John Doe",
        "age": 30,
        "street": "Main Street",
        "number": 123,
        "neighbor": "Downtown",
        "city": "Test City",
        "is_pep": false
    })
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn sample_person(id: &str, name: &str) -> Person {
    let address = Address::new(
        format!("{id}-addr"),
        "Main Street".to_string(),
        123,
        "Downtown".to_string(),
        "Test City".to_string(),
    )
    .unwrap();
    Person::new(id.to_string(), name.to_string(), 30, Some(address), false).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "Message": "healthy" }));
}

#[tokio::test]
async fn test_create_person_returns_201_with_person_id() {
    let (app, _) = app();

    let response = app.oneshot(post_json("/person/", &create_payload())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    // A bare UUID string, not the store's 24-char record id
    assert_eq!(body.len(), 36);
}

#[tokio::test]
async fn test_create_person_twice_returns_distinct_ids() {
    let (app, _) = app();
    let payload = create_payload();

    let first = app.clone().oneshot(post_json("/person/", &payload)).await.unwrap();
    let second = app.oneshot(post_json("/person/", &payload)).await.unwrap();

    let first_id = String::from_utf8(body_bytes(first).await).unwrap();
    let second_id = String::from_utf8(body_bytes(second).await).unwrap();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_create_person_validation_failure_is_422() {
    let (app, repository) = app();

    let mut payload = create_payload();
    payload["age"] = json!(151);
    payload["number"] = json!(-10);

    let response = app.oneshot(post_json("/person/", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["age", "number"]);

    // Rejected at the boundary; nothing was persisted
    assert!(repository.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_person_malformed_body_is_422() {
    let (app, _) = app();

    // Missing required fields fails JSON deserialization at the extractor
    let response = app
        .oneshot(post_json("/person/", &json!({ "name": "John" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_person_unknown_id_is_404() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/person/ffffffffffffffffffffffff"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("ffffffffffffffffffffffff"));
    assert!(detail.contains("was not found"));
}

#[tokio::test]
async fn test_get_person_malformed_id_is_404() {
    let (app, _) = app();

    // Malformed record ids are absence, same as unknown ones
    let response = app.oneshot(get("/person/not-a-record-id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_person_round_trip() {
    let (app, repository) = app();

    let record_id = repository.save(&sample_person("p-1", "John Doe")).await.unwrap();

    let response = app.oneshot(get(&format!("/person/{record_id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], "p-1");
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["age"], 30);
    assert_eq!(body["is_pep"], false);
    assert_eq!(body["address"]["street"], "Main Street");
    assert_eq!(body["address"]["number"], 123);
    // The store's record id is dropped during reconstruction
    assert!(body.get("_id").is_none());
}

#[tokio::test]
async fn test_get_all_empty_store_is_empty_array() {
    let (app, _) = app();

    let response = app.oneshot(get("/person/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_get_all_returns_every_person_in_store_order() {
    let (app, repository) = app();

    repository.save(&sample_person("p-1", "John")).await.unwrap();
    repository.save(&sample_person("p-2", "Jane")).await.unwrap();

    let response = app.oneshot(get("/person/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let persons = body.as_array().unwrap();
    assert_eq!(persons.len(), 2);
    assert_eq!(persons[0]["id"], "p-1");
    assert_eq!(persons[1]["id"], "p-2");
}

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let app = failing_app();

    let response = app
        .clone()
        .oneshot(post_json("/person/", &create_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // No driver detail leaks into the body
    let body = body_json(response).await;
    assert_eq!(body, json!({ "detail": "internal server error" }));

    let response = app.oneshot(get("/person/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
