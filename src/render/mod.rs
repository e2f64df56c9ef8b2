//! Label rendering module.
//!
//! Turns assembled label sheets into printable artifacts: a Code 128
//! barcode raster per package identifier, composed onto an A4 PDF page.

pub mod barcode;
pub mod pdf;

use thiserror::Error;

use crate::error::AppError;

pub use pdf::PdfLabelRenderer;

/// Errors produced while rendering a label sheet.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The barcode payload contains a character outside the encodable set.
    #[error("character {0:?} cannot be encoded as Code 128 subset B")]
    UnsupportedCharacter(char),

    /// The barcode payload is empty.
    #[error("barcode payload is empty")]
    EmptyPayload,

    /// The PDF writer rejected the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}
