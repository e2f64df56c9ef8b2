//! Package identifier generation.
//!
//! Pure, deterministic construction of checksum-validated package identifiers
//! from a numbering scheme and a sequence number. No state, no I/O; safe to
//! call from any number of threads.

use crate::domain::NumberingScheme;
use crate::error::{AppError, Result};

/// Weight table for the mod-11 check digit, listed most-significant digit
/// first for a nine-digit field. This is the carrier's S10-style weighting
/// with a leading 1 covering the ninth digit.
const WEIGHTS: [u64; 9] = [1, 8, 6, 4, 2, 3, 5, 9, 7];

/// Compute the check digit for a decimal digit string.
///
/// Digits are walked least-significant-first and paired with the reversed
/// weight table, wrapping cyclically if the string is longer than the table.
/// For the nine-digit production field this assigns weight 1 to the leading
/// digit and weight 7 to the trailing digit.
///
/// Mapping of the weighted sum `s`: `s mod 11 > 1` yields `11 - (s mod 11)`,
/// `s mod 11 == 1` yields `0`, and `s mod 11 == 0` yields `5`. The middle arm
/// is unreachable for the production weight/width combination but is part of
/// the carrier's published rule and is kept.
///
/// # Panics
///
/// Debug-asserts that `digits` contains only ASCII digits; callers construct
/// the input from validated schemes and formatted integers.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn check_digit(digits: &str) -> u8 {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));

    let sum: u64 = digits
        .bytes()
        .rev()
        .zip(WEIGHTS.iter().rev().cycle())
        .map(|(b, weight)| u64::from(b - b'0') * weight)
        .sum();

    match sum % 11 {
        0 => 5,
        1 => 0,
        r => (11 - r) as u8,
    }
}

/// Generate a package identifier for one sequence number.
///
/// Steps:
/// 1. Reduce the sequence into the scheme's numbering space:
///    `(sequence % modulus) + offset`.
/// 2. Zero-pad the reduced value to `padding - len(submitter_id)` digits.
/// 3. Append the check digit computed over `submitter_id + padded`.
/// 4. Wrap the digit field in the scheme's prefix and postfix.
///
/// # Errors
///
/// Returns [`AppError::SequenceOutOfRange`] if the reduced value has more
/// digits than the padding width allows. The value is validated, never
/// silently truncated.
pub fn generate(scheme: &NumberingScheme, sequence: u64) -> Result<String> {
    let width = scheme.number_width();
    let reduced = (sequence % scheme.modulus) + scheme.offset;

    let padded = format!("{reduced:0width$}");
    if padded.len() > width {
        return Err(AppError::SequenceOutOfRange {
            sequence: reduced,
            width,
        });
    }

    let digits = format!("{}{}", scheme.submitter_id, padded);
    let check = check_digit(&digits);

    Ok(format!(
        "{}{}{}{}",
        scheme.prefix, digits, check, scheme.postfix
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> NumberingScheme {
        NumberingScheme {
            prefix: "DR".to_string(),
            postfix: "M".to_string(),
            submitter_id: "54".to_string(),
            modulus: 10_000_000,
            offset: 0,
            padding: 9,
        }
    }

    #[test]
    fn test_reference_identifier() {
        // Pinned against the carrier's worked example: digit string
        // 541234567, weighted sum 197, 197 mod 11 = 10, check digit 1.
        assert_eq!(generate(&scheme(), 1_234_567).unwrap(), "DR5412345671M");
    }

    #[test]
    fn test_companion_identifier() {
        assert_eq!(generate(&scheme(), 1_234_566).unwrap(), "DR5412345668M");
    }

    #[test]
    fn test_check_digit_mapping_arms() {
        // 0 * 7 = 0, sum mod 11 == 0 maps to 5.
        assert_eq!(check_digit("0"), 5);
        // 8 * 7 = 56, 56 mod 11 == 1 maps to 0.
        assert_eq!(check_digit("8"), 0);
        // 1 * 7 = 7, 7 mod 11 == 7 maps to 4.
        assert_eq!(check_digit("1"), 4);
    }

    #[test]
    fn test_check_digit_over_reference_field() {
        assert_eq!(check_digit("541234567"), 1);
        assert_eq!(check_digit("541234566"), 8);
    }

    #[test]
    fn test_deterministic() {
        let scheme = scheme();
        assert_eq!(
            generate(&scheme, 42).unwrap(),
            generate(&scheme, 42).unwrap()
        );
    }

    #[test]
    fn test_modular_wraparound() {
        let scheme = scheme();
        let base = generate(&scheme, 1_234_567).unwrap();
        for k in 1..4u64 {
            assert_eq!(
                generate(&scheme, 1_234_567 + k * scheme.modulus).unwrap(),
                base
            );
        }
    }

    #[test]
    fn test_boundary_sequences_format() {
        let scheme = scheme();
        assert!(generate(&scheme, 0).is_ok());
        assert!(generate(&scheme, scheme.modulus - 1).is_ok());
    }

    #[test]
    fn test_zero_sequence_pads_full_width() {
        let id = generate(&scheme(), 0).unwrap();
        // DR + 54 + 0000000 + check + M
        assert_eq!(id.len(), 2 + 9 + 1 + 1);
        assert!(id.starts_with("DR540000000"));
    }

    #[test]
    fn test_offset_overflows_padding_width() {
        let scheme = NumberingScheme {
            offset: 10_000_000,
            ..scheme()
        };
        let result = generate(&scheme, 1);
        assert!(matches!(
            result,
            Err(AppError::SequenceOutOfRange { width: 7, .. })
        ));
    }

    #[test]
    fn test_checksum_recomputes_from_identifier() {
        let scheme = scheme();
        for sequence in [0, 1, 99, 54_321, 1_234_567, 9_999_999] {
            let id = generate(&scheme, sequence).unwrap();
            let digits = &id[scheme.prefix.len()..id.len() - scheme.postfix.len() - 1];
            let embedded = id.as_bytes()[id.len() - scheme.postfix.len() - 1] - b'0';
            assert_eq!(check_digit(digits), embedded, "sequence {sequence}");
        }
    }

    #[test]
    fn test_identifier_shape() {
        let re = regex::Regex::new(r"^DR54\d{7}\dM$").unwrap();
        let id = generate(&scheme(), 7).unwrap();
        assert!(re.is_match(&id), "unexpected shape: {id}");
    }
}
