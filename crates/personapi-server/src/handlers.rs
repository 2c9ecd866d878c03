// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command and query handlers.
//!
//! The command side creates persons (generating identifiers) and persists
//! them through the repository; the query side reads them back verbatim.
//! Input validation happens at the HTTP boundary before a handler runs,
//! and repository errors propagate through unmodified.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{
    AGE_MAX, Address, CITY_MAX, NAME_MAX, NEIGHBOR_MAX, Person, STREET_MAX,
};
use crate::repository::PersonRepository;

// ============================================================================
// Create command
// ============================================================================

/// Input payload for creating a person. All fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersonCommand {
    /// Person name (1 to 100 characters).
    pub name: String,
    /// Age in years (0 to 150).
    pub age: i64,
    /// Street name (1 to 200 characters).
    pub street: String,
    /// House number (at least 1).
    pub number: i64,
    /// Neighborhood (1 to 100 characters).
    pub neighbor: String,
    /// City (1 to 100 characters).
    pub city: String,
    /// Politically-exposed-person flag.
    pub is_pep: bool,
}

/// A single field constraint violation, reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The constraint that was violated.
    pub constraint: String,
}

impl CreatePersonCommand {
    /// Validate every field against the domain bounds, collecting all
    /// violations rather than stopping at the first.
    pub fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > NAME_MAX {
            errors.push(FieldError {
                field: "name",
                constraint: format!("must be between 1 and {NAME_MAX} characters"),
            });
        }
        if !(0..=AGE_MAX).contains(&self.age) {
            errors.push(FieldError {
                field: "age",
                constraint: format!("must be between 0 and {AGE_MAX}"),
            });
        }
        let street_len = self.street.chars().count();
        if street_len == 0 || street_len > STREET_MAX {
            errors.push(FieldError {
                field: "street",
                constraint: format!("must be between 1 and {STREET_MAX} characters"),
            });
        }
        if self.number < 1 {
            errors.push(FieldError {
                field: "number",
                constraint: "must be at least 1".to_string(),
            });
        }
        let neighbor_len = self.neighbor.chars().count();
        if neighbor_len == 0 || neighbor_len > NEIGHBOR_MAX {
            errors.push(FieldError {
                field: "neighbor",
                constraint: format!("must be between 1 and {NEIGHBOR_MAX} characters"),
            });
        }
        let city_len = self.city.chars().count();
        if city_len == 0 || city_len > CITY_MAX {
            errors.push(FieldError {
                field: "city",
                constraint: format!("must be between 1 and {CITY_MAX} characters"),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Handles [`CreatePersonCommand`]s: generates fresh identifiers, builds
/// the domain objects and persists them in a single save.
pub struct CreatePersonHandler {
    repository: Arc<dyn PersonRepository>,
}

impl CreatePersonHandler {
    /// Create a handler over the given repository.
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    /// Create and persist a person, returning the person's own id (not
    /// the store's record id). If the save fails, the failure propagates
    /// unmodified; there is nothing to roll back within a single insert.
    pub async fn handle_create_person(&self, command: CreatePersonCommand) -> Result<String> {
        let address = Address::new(
            Uuid::new_v4().to_string(),
            command.street,
            command.number,
            command.neighbor,
            command.city,
        )?;
        let person = Person::new(
            Uuid::new_v4().to_string(),
            command.name,
            command.age,
            Some(address),
            command.is_pep,
        )?;

        let record_id = self.repository.save(&person).await?;
        debug!(person_id = %person.id(), record_id = %record_id, "Person persisted");

        Ok(person.id().to_string())
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Input payload identifying a single-person read.
#[derive(Debug, Clone)]
pub struct GetPersonQuery {
    /// Record id to look up.
    pub id: String,
}

/// Input payload for the full listing.
#[derive(Debug, Clone)]
pub struct GetAllPersonQuery;

/// Handles person reads by delegating to the repository verbatim.
pub struct PersonQueryHandler {
    repository: Arc<dyn PersonRepository>,
}

impl PersonQueryHandler {
    /// Create a handler over the given repository.
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    /// Fetch one person; absence is a value, not an error.
    pub async fn handle_get_person(&self, query: GetPersonQuery) -> Result<Option<Person>> {
        self.repository.get_by_id(&query.id).await
    }

    /// Fetch every person, in store iteration order.
    pub async fn handle_get_all_person(&self, _query: GetAllPersonQuery) -> Result<Vec<Person>> {
        self.repository.get_all().await
    }
}
