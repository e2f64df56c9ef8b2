//! Code 128 barcode encoding.
//!
//! Produces the module (bar/space) sequence for a Code 128 subset B symbol
//! and rasterizes it into an RGB8 pixel buffer for PDF embedding. Package
//! identifiers are plain ASCII, so subset B covers the full payload without
//! charset switching.

use crate::render::RenderError;

/// Bar/space width patterns for symbol values 0-105, most significant bar
/// first. Each pattern is three bars and three spaces totalling 11 modules.
const PATTERNS: [&str; 106] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232",
];

/// Stop pattern: four bars and three spaces totalling 13 modules.
const STOP_PATTERN: &str = "2331112";

/// Start symbol value for subset B.
const START_B: usize = 104;

/// Modulus for the symbol check value.
const CHECK_MODULUS: usize = 103;

/// Encode a payload as Code 128 subset B modules.
///
/// Returns the bar/space sequence (`true` = bar) including the start symbol,
/// the symbol check value, and the stop pattern. Quiet zones are added at
/// rasterization time.
///
/// # Errors
///
/// Returns an error if the payload is empty or contains characters outside
/// the printable ASCII range subset B encodes.
pub fn encode(payload: &str) -> Result<Vec<bool>, RenderError> {
    if payload.is_empty() {
        return Err(RenderError::EmptyPayload);
    }

    let mut values = Vec::with_capacity(payload.len() + 2);
    values.push(START_B);
    for c in payload.chars() {
        values.push(symbol_value(c)?);
    }

    let check = values
        .iter()
        .enumerate()
        // The start symbol carries weight 1 alongside the first data symbol.
        .map(|(i, v)| v * i.max(1))
        .sum::<usize>()
        % CHECK_MODULUS;
    values.push(check);

    let mut modules = Vec::new();
    for value in values {
        expand(PATTERNS[value], &mut modules);
    }
    expand(STOP_PATTERN, &mut modules);

    Ok(modules)
}

/// Map a character to its subset B symbol value.
fn symbol_value(c: char) -> Result<usize, RenderError> {
    let code = c as u32;
    if (32..=126).contains(&code) {
        Ok(code as usize - 32)
    } else {
        Err(RenderError::UnsupportedCharacter(c))
    }
}

/// Expand a width pattern into modules, alternating bar/space from a bar.
fn expand(pattern: &str, modules: &mut Vec<bool>) {
    for (i, width) in pattern.bytes().enumerate() {
        let is_bar = i % 2 == 0;
        for _ in 0..(width - b'0') {
            modules.push(is_bar);
        }
    }
}

/// A rasterized barcode as an RGB8 pixel buffer.
pub struct BarcodeImage {
    /// Row-major RGB8 pixel data.
    pub pixels: Vec<u8>,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
}

/// Rasterize a module sequence into black-and-white RGB8 pixels.
///
/// `quiet_modules` light modules are added on both sides; scanners need the
/// quiet zone to lock onto the symbol.
#[must_use]
pub fn rasterize(modules: &[bool], module_px: usize, height_px: usize, quiet_modules: usize) -> BarcodeImage {
    let width = (modules.len() + 2 * quiet_modules) * module_px;

    let mut row = Vec::with_capacity(width * 3);
    for _ in 0..quiet_modules * module_px {
        row.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
    }
    for &is_bar in modules {
        let value = if is_bar { 0x00 } else { 0xFF };
        for _ in 0..module_px {
            row.extend_from_slice(&[value, value, value]);
        }
    }
    for _ in 0..quiet_modules * module_px {
        row.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
    }

    let mut pixels = Vec::with_capacity(row.len() * height_px);
    for _ in 0..height_px {
        pixels.extend_from_slice(&row);
    }

    BarcodeImage {
        pixels,
        width,
        height: height_px,
    }
}
