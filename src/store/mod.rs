pub mod memory;
pub mod nats_kv;

pub use memory::MemoryKvStore;
pub use nats_kv::NatsKvStore;

use async_trait::async_trait;
use bytes::Bytes;

/// Opaque, monotonically increasing per-key version assigned by the
/// store on every successful write. Never reused after delete — see
/// spec.md §4.1.
pub type Revision = u64;

/// Failure alphabet a [`KvStore`] backend can raise. The Repository
/// layer is the only place these are translated into domain errors
/// (spec.md §4.2's error-translation table).
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("key not found")]
    NotFound,
    #[error("key already exists")]
    AlreadyExists,
    #[error("revision mismatch")]
    RevisionMismatch,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable, versioned key-value persistence over a single logical
/// bucket. Two bucket instances (`projects`, `project-settings`) are
/// held by the Repository; the Store itself has no notion of buckets
/// beyond "one instance per bucket" (spec.md §4.1).
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<(Bytes, Revision), StoreError>;

    /// May interleave `slug/`-prefixed and raw-UID keys; callers
    /// distinguish them by prefix (spec.md §4.1).
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Creates; fails with [`StoreError::AlreadyExists`] if the key is
    /// already present.
    async fn put(&self, key: &str, value: Bytes) -> Result<Revision, StoreError>;

    async fn update(
        &self,
        key: &str,
        value: Bytes,
        expected_revision: Revision,
    ) -> Result<Revision, StoreError>;

    async fn delete(&self, key: &str, expected_revision: Revision) -> Result<(), StoreError>;
}
