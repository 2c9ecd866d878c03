// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for the person API.

use thiserror::Error;

/// Person API errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A domain constraint was violated.
    #[error("Domain error: {0}")]
    Domain(#[from] crate::model::DomainError),

    /// Document store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] mongodb::error::Error),

    /// A stored record could not be mapped back to a person.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Result type using the person API [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
