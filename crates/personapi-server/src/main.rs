// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Person API - HTTP server entrypoint.
//!
//! Wires the layers together explicitly: configuration, then the storage
//! handle, then the repository, then the command/query handlers, then the
//! HTTP router. Nothing is resolved ambiently.

use std::sync::Arc;
use tracing::{info, warn};

use personapi_server::config::Config;
use personapi_server::db::Storage;
use personapi_server::handlers::{CreatePersonHandler, PersonQueryHandler};
use personapi_server::repository::MongoPersonRepository;
use personapi_server::server::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let dotenv = dotenvy::dotenv();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging; the development profile defaults to debug
    let default_filter = if config.profile.debug() {
        "personapi_server=debug,tower_http=debug"
    } else {
        "personapi_server=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    if let Err(e) = dotenv {
        warn!("No .env file loaded: {}", e);
    }

    info!(
        profile = config.profile.name(),
        debug = config.profile.debug(),
        database = %config.database,
        collection = %config.collection,
        "Starting Person API"
    );

    // Open the storage handle; the driver connects lazily, so a dead
    // server surfaces at the first operation
    let storage = Storage::connect(&config).await?;
    info!("Storage handle ready");

    // Repository and handlers, constructed once and passed down
    let repository = Arc::new(MongoPersonRepository::new(storage.persons()));
    let create_handler = CreatePersonHandler::new(repository.clone());
    let query_handler = PersonQueryHandler::new(repository);

    let app = router(AppState::new(create_handler, query_handler));

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "Person API server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Graceful shutdown: release the storage connection
    storage.close().await;
    info!("Person API shut down");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
