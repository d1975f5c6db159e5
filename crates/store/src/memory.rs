use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::collection::{Collection, StoreError, Versioned};

#[derive(Debug, Default)]
struct Inner<T> {
    docs: HashMap<String, Versioned<T>>,
    // Keys in insertion order, so `list` is stable across calls.
    order: Vec<String>,
}

/// In-memory keyed collection.
///
/// The whole map sits behind one `RwLock`; `insert` and `replace` perform
/// their existence/version checks under the write lock, which is what makes
/// them atomic with respect to concurrent callers.
#[derive(Debug)]
pub struct InMemoryCollection<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                docs: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> for InMemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Result<Option<Versioned<T>>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(inner.docs.get(key).cloned())
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(inner
            .order
            .iter()
            .filter_map(|key| inner.docs.get(key))
            .map(|versioned| versioned.doc.clone())
            .collect())
    }

    fn insert(&self, key: &str, doc: T) -> Result<Versioned<T>, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        if inner.docs.contains_key(key) {
            return Err(StoreError::DuplicateKey(key.to_string()));
        }

        let stored = Versioned {
            doc_id: Uuid::now_v7(),
            version: 1,
            doc,
        };
        inner.docs.insert(key.to_string(), stored.clone());
        inner.order.push(key.to_string());
        Ok(stored)
    }

    fn replace(&self, key: &str, expected_version: u64, doc: T) -> Result<u64, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let existing = inner
            .docs
            .get_mut(key)
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))?;

        if existing.version != expected_version {
            return Err(StoreError::VersionMismatch {
                key: key.to_string(),
                expected: expected_version,
                found: existing.version,
            });
        }

        existing.version += 1;
        existing.doc = doc;
        Ok(existing.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let collection = InMemoryCollection::new();
        collection.insert("steel", 100i64).unwrap();

        let stored = collection.get("steel").unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.doc, 100);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let collection = InMemoryCollection::new();
        collection.insert("steel", 100i64).unwrap();

        assert_eq!(
            collection.insert("steel", 50),
            Err(StoreError::DuplicateKey("steel".to_string()))
        );
    }

    #[test]
    fn replace_bumps_version() {
        let collection = InMemoryCollection::new();
        collection.insert("steel", 100i64).unwrap();

        assert_eq!(collection.replace("steel", 1, 70).unwrap(), 2);
        let stored = collection.get("steel").unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.doc, 70);
    }

    #[test]
    fn stale_replace_is_rejected_and_changes_nothing() {
        let collection = InMemoryCollection::new();
        collection.insert("steel", 100i64).unwrap();
        collection.replace("steel", 1, 70).unwrap();

        // A writer still holding version 1 lost the race.
        let err = collection.replace("steel", 1, 40).unwrap_err();
        assert!(matches!(err, StoreError::VersionMismatch { found: 2, .. }));
        assert_eq!(collection.get("steel").unwrap().unwrap().doc, 70);
    }

    #[test]
    fn replace_of_missing_key_fails() {
        let collection: InMemoryCollection<i64> = InMemoryCollection::new();
        assert_eq!(
            collection.replace("steel", 1, 70),
            Err(StoreError::MissingKey("steel".to_string()))
        );
    }

    #[test]
    fn list_preserves_insertion_order() {
        let collection = InMemoryCollection::new();
        collection.insert("steel", 1i64).unwrap();
        collection.insert("timber", 2).unwrap();
        collection.insert("concrete", 3).unwrap();

        assert_eq!(collection.list().unwrap(), vec![1, 2, 3]);
    }
}
