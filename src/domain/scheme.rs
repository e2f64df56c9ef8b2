//! Numbering scheme configuration.
//!
//! A `NumberingScheme` describes one carrier numbering space: the fixed
//! prefix/postfix pair, the submitter id of the issuing institution, and the
//! modulus/offset/padding parameters that bound sequence counters into the
//! fixed-width digit field of a package identifier.

use serde::{Deserialize, Serialize};

/// Immutable configuration for one package numbering space.
///
/// Loaded once at startup and passed into the identifier generator by value;
/// there is no process-wide scheme state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingScheme {
    /// Leading service code, e.g. `"DR"` for registered parcels.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Trailing country/service marker, e.g. `"M"`.
    #[serde(default = "default_postfix")]
    pub postfix: String,

    /// Numeric id of the submitting institution, kept as a string because it
    /// is concatenated verbatim into the identifier digit field.
    #[serde(default = "default_submitter_id")]
    pub submitter_id: String,

    /// Modulus bounding arbitrarily large sequence counters.
    #[serde(default = "default_modulus")]
    pub modulus: u64,

    /// Offset added after reduction, reserving a sub-range of the space.
    #[serde(default)]
    pub offset: u64,

    /// Total width of the digit field (submitter id plus padded number).
    #[serde(default = "default_padding")]
    pub padding: usize,
}

fn default_prefix() -> String {
    "DR".to_string()
}

fn default_postfix() -> String {
    "M".to_string()
}

fn default_submitter_id() -> String {
    "54".to_string()
}

const fn default_modulus() -> u64 {
    10_000_000
}

const fn default_padding() -> usize {
    9
}

impl NumberingScheme {
    /// Width of the zero-padded sequence portion of the digit field.
    #[must_use]
    pub fn number_width(&self) -> usize {
        self.padding - self.submitter_id.len()
    }

    /// Validate the scheme.
    ///
    /// Called at configuration load so that a malformed scheme fails the
    /// process fast instead of failing every label request.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme cannot produce valid identifiers.
    pub fn validate(&self) -> Result<(), String> {
        if self.submitter_id.is_empty() {
            return Err("scheme.submitter_id cannot be empty".to_string());
        }
        if !self.submitter_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "scheme.submitter_id must be decimal digits, got '{}'",
                self.submitter_id
            ));
        }
        if self.modulus == 0 {
            return Err("scheme.modulus must be greater than zero".to_string());
        }
        if self.padding <= self.submitter_id.len() {
            return Err(format!(
                "scheme.padding ({}) must exceed the submitter id length ({})",
                self.padding,
                self.submitter_id.len()
            ));
        }
        if !self.prefix.is_ascii() || !self.postfix.is_ascii() {
            return Err("scheme.prefix and scheme.postfix must be ASCII".to_string());
        }
        Ok(())
    }
}

impl Default for NumberingScheme {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            postfix: default_postfix(),
            submitter_id: default_submitter_id(),
            modulus: default_modulus(),
            offset: 0,
            padding: default_padding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme_is_valid() {
        let scheme = NumberingScheme::default();
        assert!(scheme.validate().is_ok());
        assert_eq!(scheme.number_width(), 7);
    }

    #[test]
    fn test_padding_must_exceed_submitter_id() {
        let scheme = NumberingScheme {
            submitter_id: "123456789".to_string(),
            padding: 9,
            ..Default::default()
        };
        let err = scheme.validate().unwrap_err();
        assert!(err.contains("padding"));
    }

    #[test]
    fn test_submitter_id_must_be_digits() {
        let scheme = NumberingScheme {
            submitter_id: "5A".to_string(),
            ..Default::default()
        };
        assert!(scheme.validate().is_err());

        let scheme = NumberingScheme {
            submitter_id: String::new(),
            ..Default::default()
        };
        assert!(scheme.validate().is_err());
    }

    #[test]
    fn test_zero_modulus_rejected() {
        let scheme = NumberingScheme {
            modulus: 0,
            ..Default::default()
        };
        assert!(scheme.validate().is_err());
    }
}
