//! Shipment numbering allocation.
//!
//! Maps an opaque client-supplied shipment token to a stable pair of sequence
//! numbers, one per direction of travel. The same token always yields the
//! same pair, across calls and across process restarts, because the pair is a
//! pure function of the persisted allocation index.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ShipmentSequences;
use crate::error::{AppError, Result, StorageError};
use crate::storage::traits::AllocationStore;

/// Compute the storage key for a shipment token.
///
/// Arbitrary client-supplied strings are hashed to a fixed-width,
/// collision-resistant hex digest before touching storage.
#[must_use]
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Allocator for shipment sequence number pairs.
pub struct ShipmentAllocator {
    /// Storage backend holding the token-to-index mapping.
    storage: Arc<dyn AllocationStore>,
}

impl ShipmentAllocator {
    /// Create a new allocator.
    pub fn new(storage: Arc<dyn AllocationStore>) -> Self {
        Self { storage }
    }

    /// Allocate the sequence pair for a shipment token.
    ///
    /// First-seen tokens get a fresh record under first-writer-wins
    /// semantics; the insert may lose to a concurrently racing caller, in
    /// which case the re-read picks up the winner's record. Either way the
    /// returned pair comes from the persisted index.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record can neither be read nor
    /// created. A sequence pair is never fabricated outside the persisted
    /// mapping: two different tokens receiving colliding identifiers would
    /// be treated as physically distinct packages downstream.
    pub async fn allocate(&self, token: &str) -> Result<ShipmentSequences> {
        let digest = token_digest(token);

        if let Some(record) = self.storage.get(&digest).await? {
            return Ok(ShipmentSequences::from_index(record.index));
        }

        let created = self.storage.try_insert(&digest).await?;
        debug!(digest = %digest, created, "Allocation record inserted");

        // Re-read unconditionally: a losing insert means a racing caller
        // committed the record, and the winner's index is authoritative.
        let record = self
            .storage
            .get(&digest)
            .await?
            .ok_or(AppError::Storage(StorageError::Unavailable))?;

        Ok(ShipmentSequences::from_index(record.index))
    }
}
