// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Person repository: the sole translation layer between the domain model
//! and persisted documents.
//!
//! The store assigns every inserted document its own record id (`_id`),
//! distinct from the person's `id` field. `save` returns the record id;
//! reads look documents up by it and drop it when reconstructing the
//! domain object. The two identifiers are never reconciled.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Address, Person};

// ============================================================================
// Storage documents
// ============================================================================

/// Embedded address sub-document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDocument {
    /// Address identifier.
    pub id: String,
    /// Street name.
    pub street: String,
    /// House number.
    pub number: i64,
    /// Neighborhood.
    pub neighbor: String,
    /// City.
    pub city: String,
}

/// Person document as persisted in the collection.
///
/// `record_id` is the store's own addressing field; the person's `id` is
/// stored alongside it as ordinary data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDocument {
    /// Store-assigned record id. Absent until inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<ObjectId>,
    /// Person identifier.
    pub id: String,
    /// Person name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Embedded address, if any.
    pub address: Option<AddressDocument>,
    /// Politically-exposed-person flag.
    pub is_pep: bool,
}

impl PersonDocument {
    /// Serialize a person into its document form. The record id is left
    /// unset; the store assigns it on insert.
    pub fn from_person(person: &Person) -> Self {
        Self {
            record_id: None,
            id: person.id().to_string(),
            name: person.name().to_string(),
            age: i32::from(person.age()),
            address: person.address().map(|address| AddressDocument {
                id: address.id().to_string(),
                street: address.street().to_string(),
                number: address.number(),
                neighbor: address.neighbor().to_string(),
                city: address.city().to_string(),
            }),
            is_pep: person.is_pep(),
        }
    }

    /// Reconstruct the domain object, dropping the store's record id.
    ///
    /// A document that violates the domain bounds (written by an older
    /// revision or by hand) surfaces as [`Error::InvalidRecord`].
    pub fn into_person(self) -> Result<Person> {
        let address = self
            .address
            .map(|a| Address::new(a.id, a.street, a.number, a.neighbor, a.city))
            .transpose()
            .map_err(|e| Error::InvalidRecord(e.to_string()))?;

        Person::new(self.id, self.name, i64::from(self.age), address, self.is_pep)
            .map_err(|e| Error::InvalidRecord(e.to_string()))
    }
}

// ============================================================================
// Repository trait
// ============================================================================

/// Persistence operations for persons.
///
/// Implementations must be safe for concurrent use; every in-flight
/// request shares one repository.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a person as a new record and return the store-assigned
    /// record id. Insert failures propagate untouched.
    async fn save(&self, person: &Person) -> Result<String>;

    /// Look up a person by record id.
    ///
    /// Returns `Ok(None)` both when no record matches and when the
    /// supplied string is not a well-formed record id; the public
    /// contract makes no distinction between absent and unaddressable.
    async fn get_by_id(&self, id: &str) -> Result<Option<Person>>;

    /// Return every person in the collection, in store iteration order.
    async fn get_all(&self) -> Result<Vec<Person>>;
}

// ============================================================================
// MongoDB implementation
// ============================================================================

/// MongoDB-backed person repository.
pub struct MongoPersonRepository {
    collection: Collection<PersonDocument>,
}

impl MongoPersonRepository {
    /// Create a repository over the given collection handle.
    pub fn new(collection: Collection<PersonDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl PersonRepository for MongoPersonRepository {
    async fn save(&self, person: &Person) -> Result<String> {
        let document = PersonDocument::from_person(person);
        let result = self.collection.insert_one(document).await?;

        let record_id = match result.inserted_id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => result.inserted_id.to_string(),
        };
        Ok(record_id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Person>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            debug!(id = %id, "Not a well-formed record id, treating as absent");
            return Ok(None);
        };

        match self.collection.find_one(doc! { "_id": oid }).await? {
            Some(document) => Ok(Some(document.into_person()?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Person>> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut persons = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            persons.push(document.into_person()?);
        }
        Ok(persons)
    }
}

// ============================================================================
// Mock implementation
// ============================================================================

/// In-memory person repository for tests.
///
/// Mirrors the MongoDB implementation's behavior, including record id
/// assignment and the malformed-id-as-absent policy, without a running
/// store.
pub struct MockPersonRepository {
    documents: Mutex<Vec<PersonDocument>>,
    /// If true, every operation fails with a storage error.
    pub fail: bool,
}

impl Default for MockPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPersonRepository {
    /// Create an empty mock repository.
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Create a mock repository whose operations always fail.
    pub fn failing() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn storage_failure() -> Error {
        Error::Storage(mongodb::error::Error::custom("mock storage failure".to_string()))
    }
}

#[async_trait]
impl PersonRepository for MockPersonRepository {
    async fn save(&self, person: &Person) -> Result<String> {
        if self.fail {
            return Err(Self::storage_failure());
        }

        let mut document = PersonDocument::from_person(person);
        let oid = ObjectId::new();
        document.record_id = Some(oid);
        self.documents.lock().unwrap().push(document);
        Ok(oid.to_hex())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Person>> {
        if self.fail {
            return Err(Self::storage_failure());
        }

        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.record_id == Some(oid))
            .cloned();
        match document {
            Some(document) => Ok(Some(document.into_person()?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Person>> {
        if self.fail {
            return Err(Self::storage_failure());
        }

        let documents: Vec<PersonDocument> = self.documents.lock().unwrap().clone();
        documents.into_iter().map(|d| d.into_person()).collect()
    }
}
