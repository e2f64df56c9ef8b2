//! Service layer module.
//!
//! Contains business logic for identifier generation, shipment allocation,
//! and label assembly.

pub mod allocator;
pub mod identifier;
pub mod label;

pub use allocator::{ShipmentAllocator, token_digest};
pub use label::LabelService;
