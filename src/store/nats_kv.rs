use async_nats::jetstream::{self, kv};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::error;

use super::{KvStore, Revision, StoreError};

/// [`KvStore`] backed by a NATS JetStream Key-Value bucket, one
/// instance per logical bucket (spec.md §4.1, §6 "Persisted state
/// layout"). CAS semantics ride on JetStream's own last-revision
/// check — `Store::update` already takes the expected revision and the
/// server rejects mismatches.
#[derive(Clone)]
pub struct NatsKvStore {
    store: kv::Store,
}

impl NatsKvStore {
    /// Connects to (or creates, with history=1 — only the latest value
    /// per key is ever read) the named bucket.
    pub async fn connect(client: async_nats::Client, bucket: &str) -> Result<Self, StoreError> {
        let jetstream = jetstream::new(client);
        let store = jetstream
            .create_key_value(kv::Config {
                bucket: bucket.to_string(),
                history: 1,
                ..Default::default()
            })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { store })
    }

    /// Classifies an opaque JetStream error by the substring the wire
    /// protocol embeds in its description. async-nats surfaces these as
    /// plain `Error` values rather than a typed "wrong last sequence"
    /// variant, so this is the adapter's best-effort interpretation of
    /// the "or equivalent signal" language in spec.md §4.1 — anything
    /// unrecognized falls through to `Unavailable`.
    fn classify(err: impl std::fmt::Display, not_found_is_revision_mismatch: bool) -> StoreError {
        let msg = err.to_string();
        let lower = msg.to_lowercase();
        if lower.contains("wrong last sequence") || lower.contains("revision mismatch") {
            StoreError::RevisionMismatch
        } else if lower.contains("already exists") || lower.contains("wrong last subject sequence: 0")
        {
            StoreError::AlreadyExists
        } else if lower.contains("not found") {
            if not_found_is_revision_mismatch {
                StoreError::RevisionMismatch
            } else {
                StoreError::NotFound
            }
        } else {
            StoreError::Unavailable(msg)
        }
    }
}

#[async_trait]
impl KvStore for NatsKvStore {
    async fn get(&self, key: &str) -> Result<(Bytes, Revision), StoreError> {
        match self.store.entry(key).await {
            Ok(Some(entry)) => Ok((entry.value, entry.revision)),
            Ok(None) => Err(StoreError::NotFound),
            Err(e) => {
                error!(key, error = %e, "nats kv entry lookup failed");
                Err(StoreError::Unavailable(e.to_string()))
            }
        }
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        use futures::StreamExt;

        let mut keys = self
            .store
            .keys()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(key) = keys.next().await {
            match key {
                Ok(k) => out.push(k),
                Err(e) => return Err(StoreError::Unavailable(e.to_string())),
            }
        }
        Ok(out)
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<Revision, StoreError> {
        self.store
            .create(key, value)
            .await
            .map_err(|e| Self::classify(e, false))
    }

    async fn update(
        &self,
        key: &str,
        value: Bytes,
        expected_revision: Revision,
    ) -> Result<Revision, StoreError> {
        self.store
            .update(key, value, expected_revision)
            .await
            .map_err(|e| Self::classify(e, false))
    }

    async fn delete(&self, key: &str, expected_revision: Revision) -> Result<(), StoreError> {
        // The Store port does not expose a CAS delete directly; confirm
        // the revision with a read first, then delete. This narrows but
        // does not eliminate a race against a concurrent writer between
        // the two calls — acceptable here because the Repository's own
        // CAS update remains the sole correctness boundary for live
        // projects (spec.md §5's "per-key CAS serializes writes").
        let (_, current) = self.get(key).await?;
        if current != expected_revision {
            return Err(StoreError::RevisionMismatch);
        }
        self.store
            .delete(key)
            .await
            .map_err(|e| Self::classify(e, true))
    }
}
