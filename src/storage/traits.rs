//! Storage trait definitions.
//!
//! These traits define the interface for allocation storage backends,
//! enabling swapping between different implementations without changing
//! business logic.

use async_trait::async_trait;

use crate::domain::AllocationRecord;
use crate::error::StorageResult;

/// Allocation record storage.
///
/// Backends own the uniqueness guarantee that closes the concurrent
/// first-request race: two callers inserting the same digest must converge on
/// a single record, decided by the storage engine, not by application-level
/// locking.
#[async_trait]
pub trait AllocationStore: Send + Sync {
    /// Look up the allocation record for a token digest.
    async fn get(&self, token_digest: &str) -> StorageResult<Option<AllocationRecord>>;

    /// Insert a new record for the digest under first-writer-wins semantics.
    ///
    /// Returns `true` if this caller created the record, `false` if a record
    /// already existed (including one created by a concurrently racing
    /// caller). Either way the caller must re-read to obtain the assigned
    /// index.
    async fn try_insert(&self, token_digest: &str) -> StorageResult<bool>;

    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
