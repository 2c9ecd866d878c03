// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Domain model: `Person` aggregate and its embedded `Address`.
//!
//! Field bounds are enforced by the constructors. A violating value fails
//! construction with a [`DomainError`] instead of being clamped, so a
//! `Person` or `Address` that exists is always valid.

use serde::Serialize;
use thiserror::Error;

/// Maximum length of a person name, in characters.
pub const NAME_MAX: usize = 100;
/// Maximum age, inclusive.
pub const AGE_MAX: i64 = 150;
/// Maximum length of a street, in characters.
pub const STREET_MAX: usize = 200;
/// Maximum length of a neighborhood, in characters.
pub const NEIGHBOR_MAX: usize = 100;
/// Maximum length of a city, in characters.
pub const CITY_MAX: usize = 100;

/// Domain constraint violations.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomainError {
    /// Name is empty or longer than [`NAME_MAX`] characters.
    #[error("name must be between 1 and {NAME_MAX} characters, got {0}")]
    NameLength(usize),

    /// Age is outside 0..=[`AGE_MAX`].
    #[error("age must be between 0 and {AGE_MAX}, got {0}")]
    AgeOutOfRange(i64),

    /// Street is empty or longer than [`STREET_MAX`] characters.
    #[error("street must be between 1 and {STREET_MAX} characters, got {0}")]
    StreetLength(usize),

    /// House number is below 1.
    #[error("number must be at least 1, got {0}")]
    NumberOutOfRange(i64),

    /// Neighborhood is empty or longer than [`NEIGHBOR_MAX`] characters.
    #[error("neighbor must be between 1 and {NEIGHBOR_MAX} characters, got {0}")]
    NeighborLength(usize),

    /// City is empty or longer than [`CITY_MAX`] characters.
    #[error("city must be between 1 and {CITY_MAX} characters, got {0}")]
    CityLength(usize),
}

/// Postal address, owned by exactly one [`Person`].
///
/// Created only as part of person creation and immutable afterwards; it
/// has no identity or lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    id: String,
    street: String,
    number: i64,
    neighbor: String,
    city: String,
}

impl Address {
    /// Build an address, validating every field bound.
    pub fn new(
        id: String,
        street: String,
        number: i64,
        neighbor: String,
        city: String,
    ) -> Result<Self, DomainError> {
        let street_len = street.chars().count();
        if street_len == 0 || street_len > STREET_MAX {
            return Err(DomainError::StreetLength(street_len));
        }
        if number < 1 {
            return Err(DomainError::NumberOutOfRange(number));
        }
        let neighbor_len = neighbor.chars().count();
        if neighbor_len == 0 || neighbor_len > NEIGHBOR_MAX {
            return Err(DomainError::NeighborLength(neighbor_len));
        }
        let city_len = city.chars().count();
        if city_len == 0 || city_len > CITY_MAX {
            return Err(DomainError::CityLength(city_len));
        }

        Ok(Self {
            id,
            street,
            number,
            neighbor,
            city,
        })
    }

    /// Opaque address identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Street name.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// House number (>= 1).
    pub fn number(&self) -> i64 {
        self.number
    }

    /// Neighborhood.
    pub fn neighbor(&self) -> &str {
        &self.neighbor
    }

    /// City.
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// The person aggregate root.
///
/// The id is assigned once at construction and never changes. Within this
/// service a person is read-only after creation; there are no update or
/// delete operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    id: String,
    name: String,
    age: u8,
    address: Option<Address>,
    is_pep: bool,
}

impl Person {
    /// Build a person, validating name and age bounds.
    pub fn new(
        id: String,
        name: String,
        age: i64,
        address: Option<Address>,
        is_pep: bool,
    ) -> Result<Self, DomainError> {
        let name_len = name.chars().count();
        if name_len == 0 || name_len > NAME_MAX {
            return Err(DomainError::NameLength(name_len));
        }
        if !(0..=AGE_MAX).contains(&age) {
            return Err(DomainError::AgeOutOfRange(age));
        }

        Ok(Self {
            id,
            name,
            age: age as u8,
            address,
            is_pep,
        })
    }

    /// Globally unique person identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Person name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years.
    pub fn age(&self) -> u8 {
        self.age
    }

    /// Embedded address, if any.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Politically-exposed-person flag.
    pub fn is_pep(&self) -> bool {
        self.is_pep
    }
}
