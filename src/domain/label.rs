//! Label request and content types.

use serde::{Deserialize, Serialize};

/// Maximum number of address lines printed on a label.
pub const MAX_ADDRESS_LINES: usize = 5;

/// Incoming label request.
///
/// The `id` is an opaque client-supplied token identifying the shipment;
/// repeated requests bearing the same token receive the same identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRequest {
    /// Opaque shipment token.
    pub id: String,

    /// Address lines of the requesting institution.
    #[serde(rename = "source-address")]
    pub source_address: Vec<String>,

    /// Address lines of the receiving institution.
    #[serde(rename = "destination-address")]
    pub destination_address: Vec<String>,
}

impl LabelRequest {
    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("id is required".to_string());
        }
        if self.id.len() > 255 {
            return Err("id cannot exceed 255 characters".to_string());
        }
        validate_address("source-address", &self.source_address)?;
        validate_address("destination-address", &self.destination_address)?;
        Ok(())
    }
}

fn validate_address(field: &str, lines: &[String]) -> Result<(), String> {
    if lines.is_empty() {
        return Err(format!("{field} must contain at least one line"));
    }
    if lines.len() > MAX_ADDRESS_LINES {
        return Err(format!("{field} cannot exceed {MAX_ADDRESS_LINES} lines"));
    }
    Ok(())
}

/// Everything printed on one label cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    /// Checksum-validated package identifier, printed and barcoded.
    pub package_id: String,

    /// Sender address lines.
    pub sender: Vec<String>,

    /// Addressee address lines.
    pub addressee: Vec<String>,
}

/// A renderable label sheet.
///
/// Two-way sheets carry a return label with sender and addressee swapped;
/// one-way sheets carry only the outbound label.
#[derive(Debug, Clone)]
pub struct LabelSheet {
    /// Outbound label (source to destination).
    pub outbound: LabelContent,

    /// Return label (destination back to source), if requested.
    pub inbound: Option<LabelContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LabelRequest {
        LabelRequest {
            id: "order-1234".to_string(),
            source_address: vec!["Library A".to_string(), "Street 1".to_string()],
            destination_address: vec!["Library B".to_string(), "Street 2".to_string()],
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut req = request();
        req.id = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_address_rejected() {
        let mut req = request();
        req.destination_address.clear();
        let err = req.validate().unwrap_err();
        assert!(err.contains("destination-address"));
    }

    #[test]
    fn test_oversized_address_rejected() {
        let mut req = request();
        req.source_address = vec!["line".to_string(); MAX_ADDRESS_LINES + 1];
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "id": "t-1",
            "source-address": ["A"],
            "destination-address": ["B"]
        }"#;
        let req: LabelRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.source_address, vec!["A".to_string()]);
    }
}
