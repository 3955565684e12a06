use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::{KvStore, Revision, StoreError};

#[derive(Default)]
struct MemoryState {
    entries: HashMap<String, (Bytes, Revision)>,
    /// High-water revision per key, kept even after a delete so a
    /// recreated key never reuses a prior revision (spec.md §4.1).
    high_water: HashMap<String, Revision>,
}

/// In-memory [`KvStore`], used by unit and scenario tests in place of
/// the NATS JetStream KV backend. Not `#[cfg(test)]`-gated, the same
/// way the teacher's `sea-orm` "mock" feature is a normal build
/// feature rather than a test-only item (see SPEC_FULL.md §4.1).
#[derive(Default)]
pub struct MemoryKvStore {
    state: Mutex<MemoryState>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<(Bytes, Revision), StoreError> {
        let state = self.state.lock().expect("memory store mutex poisoned");
        state
            .entries
            .get(key)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock().expect("memory store mutex poisoned");
        Ok(state.entries.keys().cloned().collect())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<Revision, StoreError> {
        let mut state = self.state.lock().expect("memory store mutex poisoned");
        if state.entries.contains_key(key) {
            return Err(StoreError::AlreadyExists);
        }
        let revision = state.high_water.get(key).copied().unwrap_or(0) + 1;
        state.entries.insert(key.to_string(), (value, revision));
        state.high_water.insert(key.to_string(), revision);
        Ok(revision)
    }

    async fn update(
        &self,
        key: &str,
        value: Bytes,
        expected_revision: Revision,
    ) -> Result<Revision, StoreError> {
        let mut state = self.state.lock().expect("memory store mutex poisoned");
        match state.entries.get(key) {
            None => Err(StoreError::NotFound),
            Some((_, rev)) if *rev != expected_revision => Err(StoreError::RevisionMismatch),
            Some(_) => {
                let revision = state.high_water.get(key).copied().unwrap_or(0) + 1;
                state.entries.insert(key.to_string(), (value, revision));
                state.high_water.insert(key.to_string(), revision);
                Ok(revision)
            }
        }
    }

    async fn delete(&self, key: &str, expected_revision: Revision) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("memory store mutex poisoned");
        match state.entries.get(key) {
            None => Err(StoreError::NotFound),
            Some((_, rev)) if *rev != expected_revision => Err(StoreError::RevisionMismatch),
            Some(_) => {
                state.entries.remove(key);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_update_then_delete_round_trip() {
        let store = MemoryKvStore::new();
        let rev = store.put("k", Bytes::from_static(b"v1")).await.unwrap();
        assert_eq!(rev, 1);

        let rev = store
            .update("k", Bytes::from_static(b"v2"), rev)
            .await
            .unwrap();
        assert_eq!(rev, 2);

        store.delete("k", rev).await.unwrap();
        assert!(matches!(store.get("k").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn put_rejects_existing_key() {
        let store = MemoryKvStore::new();
        store.put("k", Bytes::from_static(b"v1")).await.unwrap();
        assert!(matches!(
            store.put("k", Bytes::from_static(b"v2")).await,
            Err(StoreError::AlreadyExists)
        ));
    }

    #[tokio::test]
    async fn update_with_stale_revision_is_rejected() {
        let store = MemoryKvStore::new();
        let rev = store.put("k", Bytes::from_static(b"v1")).await.unwrap();
        store
            .update("k", Bytes::from_static(b"v2"), rev)
            .await
            .unwrap();

        // retry with the now-stale revision
        assert!(matches!(
            store.update("k", Bytes::from_static(b"v3"), rev).await,
            Err(StoreError::RevisionMismatch)
        ));
    }

    #[tokio::test]
    async fn revision_is_never_reused_after_delete() {
        let store = MemoryKvStore::new();
        let rev1 = store.put("k", Bytes::from_static(b"v1")).await.unwrap();
        store.delete("k", rev1).await.unwrap();

        let rev2 = store.put("k", Bytes::from_static(b"v1-again")).await.unwrap();
        assert!(rev2 > rev1);
    }
}
