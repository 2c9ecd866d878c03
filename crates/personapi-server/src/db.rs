// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! MongoDB storage handle.
//!
//! Opens one client per process and exposes the persons collection to the
//! repository. The driver connects lazily and pools internally, so a dead
//! server surfaces at the first operation, and no reconnection or retry
//! logic lives here.

use mongodb::{Client, Collection, Database};

use crate::config::{Config, ConfigError};
use crate::error::{Error, Result};
use crate::repository::PersonDocument;

/// Handle to the document store: one client, the configured database and
/// the persons collection within it.
#[derive(Debug)]
pub struct Storage {
    client: Client,
    database: Database,
    collection: String,
}

impl Storage {
    /// Open a client for the configured connection string and select the
    /// named database.
    ///
    /// A production profile without a connection string fails here (the
    /// config layer carries the absence through, see
    /// [`Profile::Production`](crate::config::Profile)).
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config
            .profile
            .mongo_url()
            .ok_or(Error::Config(ConfigError::Missing("PERSONAPI_PROD_DB_URL")))?;

        let client = Client::with_uri_str(url).await?;
        let database = client.database(&config.database);

        Ok(Self {
            client,
            database,
            collection: config.collection.clone(),
        })
    }

    /// Typed handle to the persons collection.
    pub fn persons(&self) -> Collection<PersonDocument> {
        self.database.collection(&self.collection)
    }

    /// Release the client connection. Callers on the shutdown path are
    /// responsible for invoking this.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}
