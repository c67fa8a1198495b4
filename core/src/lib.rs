//! # SPC Easter 2026 Tickets Core
//!
//! Pure ticket logic for the SPC Easter 2026 registration site.
//!
//! A registration is persisted by the document store, which assigns it an id. From
//! that id and the submitted form this crate derives everything an attendee carries
//! to the door:
//!
//! - **Ticket payload**: a canonical record with a SHA-256 checksum ([`payload`])
//! - **QR code**: the payload rendered as a PNG data URL ([`qr`])
//! - **Wallet passes**: the unsigned Apple and Google pass structures ([`wallet`])
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell: nothing in this crate performs I/O
//! - Time is injected through [`environment::Clock`]
//! - Pass construction never touches signing keys; signing happens elsewhere
//!
//! ## Example
//!
//! ```
//! use spc_tickets_core::environment::SystemClock;
//! use spc_tickets_core::payload::{build_ticket_payload, TicketRequest};
//! use spc_tickets_core::qr::encode_qr;
//! use spc_tickets_core::types::TicketType;
//! use spc_tickets_core::wallet::build_apple_pass_fields;
//!
//! # fn main() -> Result<(), spc_tickets_core::TicketError> {
//! let request = TicketRequest::new("Jane Doe", "jane@example.com", TicketType::FamilyPackage)
//!     .with_tickets(4)
//!     .with_total_amount(200.0);
//!
//! let ticket = build_ticket_payload("abc123", &request, &SystemClock)?;
//! let qr = encode_qr(&ticket)?;
//! let fields = build_apple_pass_fields(&ticket);
//!
//! assert_eq!(ticket.checksum.len(), 64);
//! assert!(qr.data_url().starts_with("data:image/png;base64,"));
//! assert_eq!(fields.barcode.message, "abc123");
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod event;
pub mod payload;
pub mod qr;
pub mod registration;
pub mod types;
pub mod wallet;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{TicketError, TicketResult};
pub use payload::{build_ticket_payload, verify_ticket, TicketPayload, TicketRequest};
pub use qr::{encode_qr, QrImage, QrOptions};
pub use registration::{RegistrationForm, ValidationErrors};
pub use types::{PaymentMethod, RegistrationRecord, RegistrationStatus, TicketType};
pub use wallet::{build_apple_pass_fields, build_google_pass_object};
