//! Domain models for labelpress.
//!
//! This module contains the core domain types representing numbering schemes,
//! shipment allocations, and label content.

pub mod allocation;
pub mod label;
pub mod scheme;

pub use allocation::{AllocationRecord, ShipmentSequences};
pub use label::{LabelContent, LabelRequest, LabelSheet, MAX_ADDRESS_LINES};
pub use scheme::NumberingScheme;
