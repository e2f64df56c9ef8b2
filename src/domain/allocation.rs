//! Shipment allocation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted mapping from a request token to a stable numbering index.
///
/// One record exists per distinct token, created exactly once. The index is
/// assigned monotonically by the storage backend and never reused, so each
/// record owns a disjoint block of two sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// SHA-256 hex digest of the client-supplied token.
    pub token_digest: String,

    /// Monotonically assigned allocation index.
    pub index: u64,

    /// Creation timestamp, kept for auditing only.
    pub created_at: DateTime<Utc>,
}

/// The pair of sequence numbers backing one two-way shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentSequences {
    /// Sequence number for the outbound leg (source to destination).
    pub outbound: u64,

    /// Sequence number for the return leg (destination back to source).
    pub inbound: u64,
}

impl ShipmentSequences {
    /// Derive the sequence pair from an allocation index.
    ///
    /// Doubling the index guarantees that the outbound/return pair of one
    /// shipment never collides with the pair of any other shipment.
    #[must_use]
    pub const fn from_index(index: u64) -> Self {
        let base = 2 * index;
        Self {
            outbound: base,
            inbound: base + 1,
        }
    }
}
