//! Constants for the single event this site serves.
//!
//! The site is built for one event only, so everything here is fixed at compile time.

/// Full event title.
pub const EVENT_NAME: &str = "The Ultimate Sacrifice On Golgotha";

/// Short name used on passes and download file names.
pub const EVENT_DISPLAY_NAME: &str = "SPC Easter 2026";

/// Event date embedded in every ticket payload (`eventDate`).
pub const EVENT_DATE: &str = "2026-04-04";

/// Doors open.
pub const EVENT_TIME: &str = "6:00 PM";

/// Venue address.
pub const EVENT_LOCATION: &str = "Sharon Event Center, 940 Barnes Bridge Rd, Mesquite, TX 75150";

/// Contact address for attendees.
pub const ORGANIZER_EMAIL: &str = "stpmtcdallas@outlook.com";

/// Terms printed on the back of the Apple pass.
pub const TICKET_TERMS: &str = "Please bring this ticket (digital or printed) to the event";

/// Apple pass type identifier registered for the event.
pub const APPLE_PASS_TYPE_IDENTIFIER: &str = "pass.com.spc.easter2026";

/// Google Wallet class suffix; qualified with the issuer id at build time.
pub const GOOGLE_CLASS_SUFFIX: &str = "spc-easter-2026-event";

/// Google Wallet event id.
pub const GOOGLE_EVENT_ID: &str = "spc-easter-2026";

/// Locale used for Google Wallet localized strings.
pub const PASS_LANGUAGE: &str = "en-US";

/// Pass foreground color.
pub const PASS_FOREGROUND_COLOR: &str = "rgb(255, 255, 255)";

/// Pass background color (Apple notation).
pub const PASS_BACKGROUND_COLOR: &str = "rgb(139, 69, 19)";

/// Pass background color (Google notation).
pub const PASS_HEX_BACKGROUND_COLOR: &str = "#8B4513";

/// File name offered when downloading the ticket image.
#[must_use]
pub fn ticket_image_file_name(ticket_id: &str) -> String {
    format!("spc-easter-2026-ticket-{ticket_id}.png")
}

/// File name of the signed Apple pass produced for a ticket.
#[must_use]
pub fn apple_pass_file_name(ticket_id: &str) -> String {
    format!("spc-easter-2026-{ticket_id}.pkpass")
}
