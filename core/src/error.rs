//! Error types for ticket generation.
//!
//! Every failure here is local and deterministic. Retrying with the same input yields
//! the same error, so callers surface it and let the attendee start over.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type TicketResult<T> = Result<T, TicketError>;

/// Errors raised while building, encoding or checking a ticket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// A required identity field is missing or blank.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field (as it appears in JSON)
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The checksum could not be computed.
    #[error("Checksum unavailable: {0}")]
    ChecksumUnavailable(String),

    /// The serialized ticket does not fit in the largest QR symbol at level H.
    #[error("Ticket payload too large for a QR code ({len} bytes)")]
    PayloadTooLarge {
        /// Length of the serialized payload in bytes
        len: usize,
    },

    /// The QR image could not be written as PNG.
    #[error("QR image encoding failed: {0}")]
    ImageEncoding(String),

    /// The embedded checksum does not match the ticket fields.
    #[error("Checksum mismatch for ticket {id}")]
    ChecksumMismatch {
        /// Ticket id carried by the tampered payload
        id: String,
    },
}

impl TicketError {
    /// Create an [`TicketError::InvalidInput`] error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
