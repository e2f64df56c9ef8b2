//! PDF label sheet composition.
//!
//! Lays label cells out on an A4 page using `printpdf` 0.8. printpdf 0.8
//! uses a data-oriented API: the page is a `Vec<Op>` operation list and the
//! document is serialised via `PdfDocument::save()`. The outbound label
//! occupies the top-left quarter of the sheet, the return label (when
//! present) the top-right quarter, so a two-way sheet folds into a single
//! dispatch envelope.

use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::debug;

use crate::domain::{LabelContent, LabelSheet};
use crate::render::{RenderError, barcode};

/// A4 page width in millimetres.
const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 page height in millimetres.
const PAGE_HEIGHT_MM: f32 = 297.0;
/// Label cell width, half an A4 page side by side.
const CELL_WIDTH_MM: f32 = 105.0;
/// Inner margin within a label cell.
const CELL_MARGIN_MM: f32 = 8.0;
/// Rendered barcode width.
const BARCODE_WIDTH_MM: f32 = 80.0;
/// Rendered barcode height.
const BARCODE_HEIGHT_MM: f32 = 20.0;

/// Pixels per module when rasterizing the barcode.
const MODULE_PX: usize = 2;
/// Barcode raster height in pixels.
const BARCODE_HEIGHT_PX: usize = 120;
/// Quiet zone width in modules on each side of the symbol.
const QUIET_MODULES: usize = 10;
/// Raster resolution the barcode image is embedded at.
const BARCODE_DPI: f32 = 150.0;

/// Renders label sheets as single-page A4 PDF documents.
pub struct PdfLabelRenderer;

impl PdfLabelRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render a label sheet into PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a package identifier cannot be encoded as a
    /// Code 128 barcode.
    pub fn render(&self, sheet: &LabelSheet) -> Result<Vec<u8>, RenderError> {
        let mut doc = PdfDocument::new("Shipping label");
        let mut ops: Vec<Op> = Vec::new();

        render_cell(&mut doc, &mut ops, &sheet.outbound, 0.0, "B")?;
        if let Some(inbound) = &sheet.inbound {
            render_cell(&mut doc, &mut ops, inbound, CELL_WIDTH_MM, "A")?;
        }

        let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops);
        doc.with_pages(vec![page]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            bytes = output.len(),
            warnings = warnings.len(),
            two_way = sheet.inbound.is_some(),
            "Label sheet rendered"
        );

        Ok(output)
    }
}

impl Default for PdfLabelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose one label cell at the given horizontal offset.
///
/// The `service_mark` distinguishes the travel direction on the printed
/// label ("B" outbound, "A" return) so sorting staff can tell the two
/// halves of a folded sheet apart.
fn render_cell(
    doc: &mut PdfDocument,
    ops: &mut Vec<Op>,
    content: &LabelContent,
    x_offset_mm: f32,
    service_mark: &str,
) -> Result<(), RenderError> {
    let left_pt = Mm(x_offset_mm + CELL_MARGIN_MM).into_pt().0;
    let cell_top_pt = Mm(PAGE_HEIGHT_MM - CELL_MARGIN_MM).into_pt().0;

    // Service mark in the cell's top-left corner.
    push_text(
        ops,
        service_mark,
        BuiltinFont::HelveticaBold,
        28.0,
        left_pt,
        cell_top_pt - mm_to_pt(12.0),
    );

    // Barcode beneath the service mark.
    let modules = barcode::encode(&content.package_id)?;
    let image = barcode::rasterize(&modules, MODULE_PX, BARCODE_HEIGHT_PX, QUIET_MODULES);
    let raw = RawImage {
        pixels: RawImageData::U8(image.pixels),
        width: image.width,
        height: image.height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let xobject_id = doc.add_image(&raw);

    // Native raster size at the embedding DPI, scaled to the target box.
    #[allow(clippy::cast_precision_loss)]
    let native_w_pt = image.width as f32 / BARCODE_DPI * 72.0;
    #[allow(clippy::cast_precision_loss)]
    let native_h_pt = image.height as f32 / BARCODE_DPI * 72.0;
    let target_w_pt = Mm(BARCODE_WIDTH_MM).into_pt().0;
    let target_h_pt = Mm(BARCODE_HEIGHT_MM).into_pt().0;

    let barcode_bottom_pt = cell_top_pt - mm_to_pt(40.0);
    ops.push(Op::UseXobject {
        id: xobject_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(left_pt)),
            translate_y: Some(Pt(barcode_bottom_pt)),
            scale_x: Some(target_w_pt / native_w_pt),
            scale_y: Some(target_h_pt / native_h_pt),
            dpi: Some(BARCODE_DPI),
            rotate: None,
        },
    });

    // Human-readable identifier under the bars.
    push_text(
        ops,
        &content.package_id,
        BuiltinFont::Helvetica,
        12.0,
        left_pt,
        barcode_bottom_pt - mm_to_pt(6.0),
    );

    // Address blocks.
    let sender_top_pt = cell_top_pt - mm_to_pt(62.0);
    push_address_block(ops, "Odesilatel / Sender:", &content.sender, left_pt, sender_top_pt);

    let addressee_top_pt = cell_top_pt - mm_to_pt(100.0);
    push_address_block(
        ops,
        "Adresat / Addressee:",
        &content.addressee,
        left_pt,
        addressee_top_pt,
    );

    Ok(())
}

/// Emit a heading followed by up to five address lines.
fn push_address_block(ops: &mut Vec<Op>, heading: &str, lines: &[String], x_pt: f32, top_pt: f32) {
    push_text(ops, heading, BuiltinFont::HelveticaBold, 11.0, x_pt, top_pt);

    let line_height_pt = 13.0;
    for (i, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let y_pt = top_pt - line_height_pt * (i as f32 + 1.0);
        push_text(ops, line, BuiltinFont::Helvetica, 10.0, x_pt, y_pt);
    }
}

/// Emit a single positioned text run.
fn push_text(ops: &mut Vec<Op>, text: &str, font: BuiltinFont, size_pt: f32, x_pt: f32, y_pt: f32) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(x_pt),
            y: Pt(y_pt),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size_pt),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

fn mm_to_pt(mm: f32) -> f32 {
    Mm(mm).into_pt().0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(package_id: &str) -> LabelContent {
        LabelContent {
            package_id: package_id.to_string(),
            sender: vec!["Library A".to_string(), "Street 1".to_string()],
            addressee: vec!["Library B".to_string(), "Street 2".to_string()],
        }
    }

    #[test]
    fn test_one_way_sheet_renders_pdf() {
        let sheet = LabelSheet {
            outbound: content("DR5412345671M"),
            inbound: None,
        };
        let pdf = PdfLabelRenderer::new().render(&sheet).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_two_way_sheet_is_larger_than_one_way() {
        let one_way = LabelSheet {
            outbound: content("DR5412345671M"),
            inbound: None,
        };
        let two_way = LabelSheet {
            outbound: content("DR5412345671M"),
            inbound: Some(content("DR5412345668M")),
        };
        let renderer = PdfLabelRenderer::new();
        let one = renderer.render(&one_way).unwrap();
        let two = renderer.render(&two_way).unwrap();
        assert!(two.len() > one.len());
    }

    #[test]
    fn test_unencodable_identifier_is_rejected() {
        let sheet = LabelSheet {
            outbound: content("DRč"),
            inbound: None,
        };
        let err = PdfLabelRenderer::new().render(&sheet).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedCharacter('č')));
    }
}
