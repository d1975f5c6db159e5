use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

/// A stored document plus the metadata the store maintains for it.
///
/// `version` starts at 1 on insert and increments on every successful
/// replace; `doc_id` is an internal identifier and is never serialized into
/// API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub doc_id: Uuid,
    pub version: u64,
    pub doc: T,
}

/// Store operation error.
///
/// These are infrastructure errors (duplicate keys, stale versions, backend
/// failures) as opposed to domain errors; the service layer translates them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("key '{0}' already exists")]
    DuplicateKey(String),

    #[error("version check failed for '{key}': expected {expected}, found {found}")]
    VersionMismatch {
        key: String,
        expected: u64,
        found: u64,
    },

    #[error("key '{0}' does not exist")]
    MissingKey(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Keyed document collection.
///
/// Implementations must:
/// - reject `insert` for an existing key atomically (closing the
///   create/create race),
/// - apply `replace` only when the stored version still equals
///   `expected_version` (closing the lost-update race),
/// - hand out clones, never references into shared state.
pub trait Collection<T>: Send + Sync {
    /// Fetch one document by key.
    fn get(&self, key: &str) -> Result<Option<Versioned<T>>, StoreError>;

    /// All documents, in insertion order.
    fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Insert a new document at version 1. Fails with `DuplicateKey` if the
    /// key is already present.
    fn insert(&self, key: &str, doc: T) -> Result<Versioned<T>, StoreError>;

    /// Conditionally overwrite an existing document.
    ///
    /// Succeeds only when the stored version equals `expected_version`,
    /// returning the new version. A concurrent writer that got there first
    /// surfaces as `VersionMismatch`; callers re-read and retry.
    fn replace(&self, key: &str, expected_version: u64, doc: T) -> Result<u64, StoreError>;
}

impl<T, S> Collection<T> for Arc<S>
where
    S: Collection<T> + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<Versioned<T>>, StoreError> {
        (**self).get(key)
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        (**self).list()
    }

    fn insert(&self, key: &str, doc: T) -> Result<Versioned<T>, StoreError> {
        (**self).insert(key, doc)
    }

    fn replace(&self, key: &str, expected_version: u64, doc: T) -> Result<u64, StoreError> {
        (**self).replace(key, expected_version, doc)
    }
}
