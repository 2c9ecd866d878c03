// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Person API - a small MongoDB-backed CRUD service with a command/query
//! split.
//!
//! Accepts person records (name, age, address, PEP flag) over HTTP,
//! persists them as documents, and serves them back by record id or as a
//! full listing.
//!
//! # Architecture
//!
//! ```text
//! HTTP request
//!      │  validation at the boundary (422 on violation)
//!      ▼
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ CreatePersonHandler  │     │  PersonQueryHandler  │
//! │ (command: create)    │     │  (get by id / all)   │
//! └──────────┬───────────┘     └──────────┬───────────┘
//!            │        PersonRepository    │
//!            └───────────┬────────────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │   Storage handle    │
//!             │ (MongoDB collection)│
//!             └─────────────────────┘
//! ```
//!
//! Wiring is explicit constructor injection: configuration → storage
//! handle → repository → handlers, each constructed once in `main` and
//! passed down. There is no ambient or global state.
//!
//! # HTTP surface
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | `GET` | `/` | 200, `{"Message": "healthy"}` | - |
//! | `POST` | `/person/` | 201, generated person id | 422 validation errors |
//! | `GET` | `/person/{id}` | 200, person JSON | 404 with detail message |
//! | `GET` | `/person/` | 200, array of person JSON | - |
//!
//! Absence (unknown or malformed record id) maps to 404 at this layer
//! only; storage failures map to a generic 500 with full detail in the
//! log.
//!
//! # Configuration
//!
//! Loaded from environment variables (`.env` supported):
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `PERSONAPI_PROFILE` | No | `development` | `development` or `production` |
//! | `PERSONAPI_PROD_DB_URL` | Production | - | MongoDB connection string |
//! | `PERSONAPI_DATABASE` | No | `personapi_db` | Database name |
//! | `PERSONAPI_COLLECTION` | No | `persons` | Collection name |
//! | `PERSONAPI_HTTP_PORT` | No | `8000` | HTTP server port |
//!
//! The development profile uses the hardcoded docker-compose connection
//! string. A production profile without `PERSONAPI_PROD_DB_URL` loads
//! fine; constructing the storage handle is what fails.
//!
//! # Modules
//!
//! - [`config`]: Profile-tagged configuration from environment variables
//! - [`db`]: MongoDB storage handle (client, database, collection)
//! - [`error`]: Error types for person API operations
//! - [`model`]: `Person` aggregate and embedded `Address` value object
//! - [`repository`]: Domain ↔ document translation and persistence
//! - [`handlers`]: Create command and read query handlers
//! - [`server`]: axum router and HTTP response translation

#![deny(missing_docs)]

/// Profile-tagged configuration from environment variables.
pub mod config;

/// MongoDB storage handle.
pub mod db;

/// Error types for person API operations.
pub mod error;

/// Domain model: person aggregate and address value object.
pub mod model;

/// Person repository: domain ↔ document translation and persistence.
pub mod repository;

/// Command and query handlers.
pub mod handlers;

/// HTTP router and response translation.
pub mod server;

pub use config::Config;
pub use error::Error;
