//! Label assembly service.
//!
//! Turns a validated label request into a rendered PDF sheet: allocates the
//! shipment's sequence pair, derives the package identifiers, and hands the
//! resulting label content to the renderer. The return label carries the
//! sender and addressee blocks swapped.

use std::sync::Arc;

use tracing::info;

use crate::domain::{LabelContent, LabelRequest, LabelSheet, NumberingScheme};
use crate::error::Result;
use crate::render::PdfLabelRenderer;
use crate::service::allocator::ShipmentAllocator;
use crate::service::identifier;
use crate::storage::traits::AllocationStore;

/// Service producing shipping label sheets.
pub struct LabelService {
    /// Numbering scheme for package identifiers.
    scheme: NumberingScheme,
    /// Sequence pair allocator.
    allocator: ShipmentAllocator,
    /// PDF renderer.
    renderer: PdfLabelRenderer,
}

impl LabelService {
    /// Create a new label service.
    pub fn new(scheme: NumberingScheme, storage: Arc<dyn AllocationStore>) -> Self {
        Self {
            scheme,
            allocator: ShipmentAllocator::new(storage),
            renderer: PdfLabelRenderer::new(),
        }
    }

    /// Assemble the label sheet for a request without rendering it.
    ///
    /// Allocation always consumes the full sequence pair, even for one-way
    /// sheets, so a later two-way request for the same token yields the same
    /// identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if allocation fails or an identifier cannot be
    /// formed under the configured scheme.
    pub async fn build_sheet(&self, request: &LabelRequest, two_way: bool) -> Result<LabelSheet> {
        let seqs = self.allocator.allocate(&request.id).await?;

        let outbound = LabelContent {
            package_id: identifier::generate(&self.scheme, seqs.outbound)?,
            sender: request.source_address.clone(),
            addressee: request.destination_address.clone(),
        };

        let inbound = if two_way {
            Some(LabelContent {
                package_id: identifier::generate(&self.scheme, seqs.inbound)?,
                sender: request.destination_address.clone(),
                addressee: request.source_address.clone(),
            })
        } else {
            None
        };

        info!(
            outbound_id = %outbound.package_id,
            two_way,
            "Label sheet assembled"
        );

        Ok(LabelSheet { outbound, inbound })
    }

    /// Assemble and render the label sheet as a PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if allocation, identifier generation, or rendering
    /// fails. No partial results: the request either yields a complete PDF
    /// or an error.
    pub async fn create_pdf(&self, request: &LabelRequest, two_way: bool) -> Result<Vec<u8>> {
        let sheet = self.build_sheet(request, two_way).await?;
        let pdf = self.renderer.render(&sheet)?;
        Ok(pdf)
    }
}
