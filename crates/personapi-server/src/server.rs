// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP layer: routes, request validation and response translation.
//!
//! This is the only place where absence becomes a 404 and errors become
//! failure responses. Handlers below it return domain values and let
//! errors propagate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::Error;
use crate::handlers::{
    CreatePersonCommand, CreatePersonHandler, GetAllPersonQuery, GetPersonQuery,
    PersonQueryHandler,
};

/// Shared application state: the two handlers, constructed once at
/// startup and cloned into every request task.
#[derive(Clone)]
pub struct AppState {
    /// Create-command handler.
    pub create_handler: Arc<CreatePersonHandler>,
    /// Query handler.
    pub query_handler: Arc<PersonQueryHandler>,
}

impl AppState {
    /// Bundle the handlers into shared state.
    pub fn new(create_handler: CreatePersonHandler, query_handler: PersonQueryHandler) -> Self {
        Self {
            create_handler: Arc::new(create_handler),
            query_handler: Arc::new(query_handler),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/person/", post(create_person).get(get_all_persons))
        .route("/person/{id}", get(get_person))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Full detail goes to the log; the response body stays generic.
        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "internal server error" })),
        )
            .into_response()
    }
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "Message": "healthy" }))
}

/// `POST /person/` - validate the command, create the person, return the
/// generated person id with 201.
async fn create_person(
    State(state): State<AppState>,
    Json(command): Json<CreatePersonCommand>,
) -> Result<Response, Error> {
    if let Err(errors) = command.validate() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": errors })),
        )
            .into_response());
    }

    let person_id = state.create_handler.handle_create_person(command).await?;
    Ok((StatusCode::CREATED, person_id).into_response())
}

/// `GET /person/{id}` - one person, or 404 naming the requested id.
async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    let query = GetPersonQuery { id: id.clone() };
    match state.query_handler.handle_get_person(query).await? {
        Some(person) => Ok(Json(person).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("person {id} was not found") })),
        )
            .into_response()),
    }
}

/// `GET /person/` - every person, possibly an empty array.
async fn get_all_persons(State(state): State<AppState>) -> Result<Response, Error> {
    let persons = state
        .query_handler
        .handle_get_all_person(GetAllPersonQuery)
        .await?;
    Ok(Json(persons).into_response())
}
