//! Apple Wallet (`pass.json`) payloads.

use crate::event::{
    APPLE_PASS_TYPE_IDENTIFIER, EVENT_DISPLAY_NAME, PASS_BACKGROUND_COLOR, PASS_FOREGROUND_COLOR,
    TICKET_TERMS,
};
use crate::payload::{amount_number, TicketPayload};
use serde::{Deserialize, Serialize};

/// Value of a pass field. Apple accepts strings and numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PassFieldValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(serde_json::Number),
}

impl From<String> for PassFieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PassFieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One field on the front or back of a pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassField {
    /// Unique key within the pass
    pub key: String,
    /// Label shown above the value
    pub label: String,
    /// Displayed value
    pub value: PassFieldValue,
    /// ISO 4217 code; present when `value` is a monetary amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

impl PassField {
    fn text(key: &str, label: &str, value: impl Into<PassFieldValue>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: value.into(),
            currency_code: None,
        }
    }

    fn usd(key: &str, label: &str, amount: f64) -> Self {
        match amount_number(amount) {
            Some(number) => Self {
                key: key.to_string(),
                label: label.to_string(),
                value: PassFieldValue::Number(number),
                currency_code: Some("USD".to_string()),
            },
            None => Self::text(key, label, amount.to_string()),
        }
    }
}

/// Barcode symbology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppleBarcodeFormat {
    /// QR code
    #[serde(rename = "PKBarcodeFormatQR")]
    Qr,
}

/// Barcode shown on the pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleBarcode {
    /// Encoded message (the ticket id)
    pub message: String,
    /// Symbology
    pub format: AppleBarcodeFormat,
    /// Text encoding of `message`
    pub message_encoding: String,
}

/// Field groups and barcode for an event ticket pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleWalletFieldSet {
    /// Attendee name
    pub primary_fields: Vec<PassField>,
    /// Ticket type and quantity
    pub secondary_fields: Vec<PassField>,
    /// Email
    pub auxiliary_fields: Vec<PassField>,
    /// Ticket id, total amount, terms
    pub back_fields: Vec<PassField>,
    /// QR barcode carrying the ticket id
    pub barcode: AppleBarcode,
}

/// Map a ticket onto Apple's event ticket field groups.
///
/// Total over well-formed payloads. The quantity is rendered as a string.
#[must_use]
pub fn build_apple_pass_fields(ticket: &TicketPayload) -> AppleWalletFieldSet {
    AppleWalletFieldSet {
        primary_fields: vec![PassField::text("name", "ATTENDEE", ticket.name.as_str())],
        secondary_fields: vec![
            PassField::text("ticketType", "TICKET TYPE", ticket.ticket_type.as_str()),
            PassField::text("tickets", "QUANTITY", ticket.tickets.to_string()),
        ],
        auxiliary_fields: vec![PassField::text("email", "EMAIL", ticket.email.as_str())],
        back_fields: vec![
            PassField::text("ticketId", "Ticket ID", ticket.id.as_str()),
            PassField::usd("totalAmount", "Total Amount", ticket.total_amount),
            PassField::text("terms", "Terms and Conditions", TICKET_TERMS),
        ],
        barcode: AppleBarcode {
            message: ticket.id.clone(),
            format: AppleBarcodeFormat::Qr,
            message_encoding: "iso-8859-1".to_string(),
        },
    }
}

// ============================================================================
// Full pass document
// ============================================================================

/// Issuer settings that go into `pass.json`. None of these are secrets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplePassConfig {
    /// Pass type identifier registered with Apple
    pub pass_type_identifier: String,
    /// Apple developer team identifier
    pub team_identifier: String,
    /// Organization shown on the lock screen
    pub organization_name: String,
}

impl ApplePassConfig {
    /// Config for this event under the given team.
    #[must_use]
    pub fn new(team_identifier: impl Into<String>) -> Self {
        Self {
            pass_type_identifier: APPLE_PASS_TYPE_IDENTIFIER.to_string(),
            team_identifier: team_identifier.into(),
            organization_name: EVENT_DISPLAY_NAME.to_string(),
        }
    }
}

/// Field groups under the `eventTicket` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleEventTicket {
    /// Primary fields
    pub primary_fields: Vec<PassField>,
    /// Secondary fields
    pub secondary_fields: Vec<PassField>,
    /// Auxiliary fields
    pub auxiliary_fields: Vec<PassField>,
    /// Back fields
    pub back_fields: Vec<PassField>,
}

/// Unsigned `pass.json`, ready to be packaged and signed by the pass service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePass {
    /// Always 1
    pub format_version: u8,
    /// Pass type identifier
    pub pass_type_identifier: String,
    /// Serial number (the ticket id)
    pub serial_number: String,
    /// Team identifier
    pub team_identifier: String,
    /// Organization name
    pub organization_name: String,
    /// Accessibility description
    pub description: String,
    /// Text next to the logo
    pub logo_text: String,
    /// Foreground color
    pub foreground_color: String,
    /// Background color
    pub background_color: String,
    /// Field groups
    pub event_ticket: AppleEventTicket,
    /// Barcodes (current key)
    pub barcodes: Vec<AppleBarcode>,
    /// Barcode (legacy key, read by iOS 8 and earlier)
    pub barcode: AppleBarcode,
}

/// Build the complete unsigned `pass.json` for a ticket.
#[must_use]
pub fn build_apple_pass(ticket: &TicketPayload, config: &ApplePassConfig) -> ApplePass {
    let fields = build_apple_pass_fields(ticket);

    ApplePass {
        format_version: 1,
        pass_type_identifier: config.pass_type_identifier.clone(),
        serial_number: ticket.id.clone(),
        team_identifier: config.team_identifier.clone(),
        organization_name: config.organization_name.clone(),
        description: format!("{EVENT_DISPLAY_NAME} Event Ticket"),
        logo_text: EVENT_DISPLAY_NAME.to_string(),
        foreground_color: PASS_FOREGROUND_COLOR.to_string(),
        background_color: PASS_BACKGROUND_COLOR.to_string(),
        event_ticket: AppleEventTicket {
            primary_fields: fields.primary_fields,
            secondary_fields: fields.secondary_fields,
            auxiliary_fields: fields.auxiliary_fields,
            back_fields: fields.back_fields,
        },
        barcodes: vec![fields.barcode.clone()],
        barcode: fields.barcode,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::payload::{build_ticket_payload_at, TicketRequest};
    use crate::types::TicketType;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn ticket() -> TicketPayload {
        let request = TicketRequest::new("Jane Doe", "jane@example.com", TicketType::FamilyPackage)
            .with_tickets(4)
            .with_total_amount(200.0);
        build_ticket_payload_at(
            "abc123",
            &request,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_field_groups() {
        let fields = build_apple_pass_fields(&ticket());

        assert_eq!(fields.barcode.message, "abc123");
        assert_eq!(fields.primary_fields[0].value, PassFieldValue::from("Jane Doe"));
        assert_eq!(fields.secondary_fields[0].value, PassFieldValue::from("family-package"));
        assert_eq!(fields.secondary_fields[1].key, "tickets");
        assert_eq!(fields.secondary_fields[1].value, PassFieldValue::from("4"));
        assert_eq!(fields.auxiliary_fields[0].value, PassFieldValue::from("jane@example.com"));
        assert_eq!(fields.back_fields.len(), 3);
        assert_eq!(fields.back_fields[2].value, PassFieldValue::from(TICKET_TERMS));
    }

    #[test]
    fn test_field_set_json_shape() {
        let value = serde_json::to_value(build_apple_pass_fields(&ticket())).unwrap();

        assert_eq!(value["secondaryFields"][1]["value"], json!("4"));
        assert_eq!(
            value["backFields"][1],
            json!({"key": "totalAmount", "label": "Total Amount", "value": 200, "currencyCode": "USD"})
        );
        assert_eq!(
            value["barcode"],
            json!({"message": "abc123", "format": "PKBarcodeFormatQR", "messageEncoding": "iso-8859-1"})
        );
        assert!(value["primaryFields"][0].get("currencyCode").is_none());
    }

    #[test]
    fn test_full_pass_document() {
        let pass = build_apple_pass(&ticket(), &ApplePassConfig::new("TEAM123"));
        let value = serde_json::to_value(&pass).unwrap();

        assert_eq!(value["formatVersion"], json!(1));
        assert_eq!(value["passTypeIdentifier"], json!("pass.com.spc.easter2026"));
        assert_eq!(value["serialNumber"], json!("abc123"));
        assert_eq!(value["teamIdentifier"], json!("TEAM123"));
        assert_eq!(value["eventTicket"]["primaryFields"][0]["label"], json!("ATTENDEE"));
        assert_eq!(value["barcodes"][0]["message"], json!("abc123"));
        assert_eq!(value["barcode"], value["barcodes"][0]);
    }
}
