//! Google Wallet event ticket payloads.
//!
//! Object and class ids are qualified by the issuer id (`{issuer}.{suffix}`), which
//! Google assigns to the merchant account.

use crate::event::{
    EVENT_DATE, EVENT_DISPLAY_NAME, EVENT_LOCATION, GOOGLE_CLASS_SUFFIX, GOOGLE_EVENT_ID,
    PASS_HEX_BACKGROUND_COLOR, PASS_LANGUAGE,
};
use crate::payload::TicketPayload;
use serde::{Deserialize, Serialize};

/// A string with its language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedString {
    /// BCP 47 language tag
    pub language: String,
    /// Text
    pub value: String,
}

/// Google's `LocalizedString`, populated with the default value only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedString {
    /// Default translation
    pub default_value: TranslatedString,
}

impl LocalizedString {
    /// Localized string in the event's language.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            default_value: TranslatedString {
                language: PASS_LANGUAGE.to_string(),
                value: value.into(),
            },
        }
    }
}

/// Object state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectState {
    /// Usable pass
    #[default]
    Active,
}

/// Barcode symbology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoogleBarcodeType {
    /// QR code
    QrCode,
}

/// Barcode on the pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleBarcode {
    /// Symbology
    #[serde(rename = "type")]
    pub kind: GoogleBarcodeType,
    /// Encoded value (the ticket id)
    pub value: String,
}

/// Seat information; used here for the ticket summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    /// Seat text
    pub seat: LocalizedString,
}

/// An `eventTicketObject` for one registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleWalletObject {
    /// `{issuer}.{ticket id}`
    pub id: String,
    /// `{issuer}.spc-easter-2026-event`
    pub class_id: String,
    /// Always active
    pub state: ObjectState,
    /// Attendee name
    pub ticket_holder_name: String,
    /// Ticket id
    pub ticket_number: String,
    /// QR barcode carrying the ticket id
    pub barcode: GoogleBarcode,
    /// Event name
    pub event_name: LocalizedString,
    /// `"{ticketType} - {tickets} ticket(s)"`
    pub seat_info: SeatInfo,
    /// Ticket type
    pub ticket_type: LocalizedString,
    /// Card color
    pub hex_background_color: String,
}

/// Class id for this event under an issuer.
#[must_use]
pub fn google_class_id(issuer_id: &str) -> String {
    format!("{issuer_id}.{GOOGLE_CLASS_SUFFIX}")
}

/// Map a ticket onto a Google Wallet event ticket object.
#[must_use]
pub fn build_google_pass_object(ticket: &TicketPayload, issuer_id: &str) -> GoogleWalletObject {
    GoogleWalletObject {
        id: format!("{issuer_id}.{}", ticket.id),
        class_id: google_class_id(issuer_id),
        state: ObjectState::Active,
        ticket_holder_name: ticket.name.clone(),
        ticket_number: ticket.id.clone(),
        barcode: GoogleBarcode {
            kind: GoogleBarcodeType::QrCode,
            value: ticket.id.clone(),
        },
        event_name: LocalizedString::new(EVENT_DISPLAY_NAME),
        seat_info: SeatInfo {
            seat: LocalizedString::new(format!(
                "{} - {} ticket(s)",
                ticket.ticket_type, ticket.tickets
            )),
        },
        ticket_type: LocalizedString::new(ticket.ticket_type.as_str()),
        hex_background_color: PASS_HEX_BACKGROUND_COLOR.to_string(),
    }
}

// ============================================================================
// Class and save claims
// ============================================================================

/// Venue of the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventVenue {
    /// Venue name
    pub name: LocalizedString,
    /// Street address
    pub address: LocalizedString,
}

/// Start and end of the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDateTime {
    /// ISO-8601 start
    pub start: String,
    /// ISO-8601 end
    pub end: String,
}

/// The `eventTicketClass` shared by every ticket. Inserted once per issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTicketClass {
    /// `{issuer}.spc-easter-2026-event`
    pub id: String,
    /// Issuer display name
    pub issuer_name: String,
    /// Event id
    pub event_id: String,
    /// Event name
    pub event_name: LocalizedString,
    /// Venue
    pub venue: EventVenue,
    /// Schedule
    pub date_time: EventDateTime,
    /// Review status on insert
    pub review_status: String,
    /// Card color
    pub hex_background_color: String,
}

/// Build the event ticket class for an issuer.
#[must_use]
pub fn build_google_event_class(issuer_id: &str) -> GoogleEventTicketClass {
    let (venue_name, venue_address) = EVENT_LOCATION
        .split_once(", ")
        .unwrap_or((EVENT_LOCATION, EVENT_LOCATION));

    GoogleEventTicketClass {
        id: google_class_id(issuer_id),
        issuer_name: EVENT_DISPLAY_NAME.to_string(),
        event_id: GOOGLE_EVENT_ID.to_string(),
        event_name: LocalizedString::new(EVENT_DISPLAY_NAME),
        venue: EventVenue {
            name: LocalizedString::new(venue_name),
            address: LocalizedString::new(venue_address),
        },
        // Mesquite, TX observes CDT in April
        date_time: EventDateTime {
            start: format!("{EVENT_DATE}T18:00:00-05:00"),
            end: format!("{EVENT_DATE}T22:00:00-05:00"),
        },
        review_status: "UNDER_REVIEW".to_string(),
        hex_background_color: PASS_HEX_BACKGROUND_COLOR.to_string(),
    }
}

/// Objects carried by a save link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    /// Event ticket objects
    pub event_ticket_objects: Vec<GoogleWalletObject>,
}

/// Unsigned "save to wallet" JWT claims. The signing service turns these into
/// `https://pay.google.com/gp/v/save/{jwt}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleSaveClaims {
    /// Service account email
    pub iss: String,
    /// Always `google`
    pub aud: String,
    /// Always `savetowallet`
    pub typ: String,
    /// Origins allowed to show the save button
    pub origins: Vec<String>,
    /// Objects to save
    pub payload: SavePayload,
}

/// Wrap objects in unsigned save claims.
#[must_use]
pub fn build_google_save_claims(
    service_account_email: &str,
    objects: Vec<GoogleWalletObject>,
) -> GoogleSaveClaims {
    GoogleSaveClaims {
        iss: service_account_email.to_string(),
        aud: "google".to_string(),
        typ: "savetowallet".to_string(),
        origins: Vec::new(),
        payload: SavePayload {
            event_ticket_objects: objects,
        },
    }
}
