//! Ticket payload construction and checksum verification.
//!
//! A [`TicketPayload`] is the canonical record embedded in a ticket's QR code. Its
//! `checksum` is the lowercase hex SHA-256 of the UTF-8 JSON of every other field,
//! serialized in a fixed order:
//!
//! ```text
//! {"id", "name", "email", "ticketType", "tickets", "totalAmount", "eventDate", "registeredAt"}
//! ```
//!
//! The JSON matches what a browser's `JSON.stringify` produces for the same values
//! (whole amounts as integers, timestamps with millisecond precision), so tickets
//! issued by the web client and by this crate checksum identically.
//!
//! The checksum is tamper evidence only. No secret is involved.

use crate::environment::Clock;
use crate::error::{TicketError, TicketResult};
use crate::event::EVENT_DATE;
use crate::types::TicketType;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

// ============================================================================
// Input
// ============================================================================

/// Builder input: the subset of the registration form a ticket needs.
///
/// `tickets` and `totalAmount` arrive from HTML form fields and may be numbers,
/// numeric strings, garbage, or absent. They are kept raw here and coerced by the
/// builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    /// Attendee full name
    pub name: String,
    /// Attendee email
    pub email: String,
    /// Ticket type
    pub ticket_type: TicketType,
    /// Ticket count, raw
    #[serde(default)]
    pub tickets: Option<Value>,
    /// Total amount in dollars, raw
    #[serde(default)]
    pub total_amount: Option<Value>,
}

impl TicketRequest {
    /// Create a request with no count or amount (they default to 1 and 0).
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, ticket_type: TicketType) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ticket_type,
            tickets: None,
            total_amount: None,
        }
    }

    /// Set the ticket count.
    #[must_use]
    pub fn with_tickets(mut self, tickets: u32) -> Self {
        self.tickets = Some(Value::from(tickets));
        self
    }

    /// Set the total amount.
    #[must_use]
    pub fn with_total_amount(mut self, total_amount: f64) -> Self {
        self.total_amount = Some(amount_value(total_amount));
        self
    }

    /// Set the ticket count from an unparsed form value.
    #[must_use]
    pub fn with_raw_tickets(mut self, tickets: Value) -> Self {
        self.tickets = Some(tickets);
        self
    }

    /// Set the total amount from an unparsed form value.
    #[must_use]
    pub fn with_raw_total_amount(mut self, total_amount: Value) -> Self {
        self.total_amount = Some(total_amount);
        self
    }
}

// ============================================================================
// Payload
// ============================================================================

/// The canonical ticket record, immutable once built.
///
/// Field order is significant: it is the serialization order used for the checksum
/// and for the QR code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    /// Registration id assigned by the document store
    pub id: String,
    /// Attendee full name
    pub name: String,
    /// Attendee email
    pub email: String,
    /// Ticket type, exactly as issued
    pub ticket_type: TicketType,
    /// Ticket count, at least 1
    pub tickets: u64,
    /// Total amount in dollars, never negative
    #[serde(serialize_with = "amount::serialize")]
    pub total_amount: f64,
    /// Event date, always [`EVENT_DATE`]
    pub event_date: String,
    /// When the ticket was built (not when the registration was submitted)
    #[serde(with = "iso_millis")]
    pub registered_at: DateTime<Utc>,
    /// Lowercase hex SHA-256 over the fields above
    pub checksum: String,
}

/// Borrowed view of the checksummed fields, in checksum order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecksumFields<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    ticket_type: TicketType,
    tickets: u64,
    #[serde(serialize_with = "amount::serialize")]
    total_amount: f64,
    event_date: &'a str,
    #[serde(with = "iso_millis")]
    registered_at: DateTime<Utc>,
}

impl ChecksumFields<'_> {
    fn checksum(&self) -> TicketResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| TicketError::ChecksumUnavailable(e.to_string()))?;
        let digest = Sha256::digest(&json);
        Ok(format!("{digest:x}"))
    }
}

impl TicketPayload {
    fn checksum_fields(&self) -> ChecksumFields<'_> {
        ChecksumFields {
            id: &self.id,
            name: &self.name,
            email: &self.email,
            ticket_type: self.ticket_type,
            tickets: self.tickets,
            total_amount: self.total_amount,
            event_date: &self.event_date,
            registered_at: self.registered_at,
        }
    }

    /// Recompute the checksum from the current non-checksum fields.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::ChecksumUnavailable`] if the fields cannot be serialized.
    pub fn compute_checksum(&self) -> TicketResult<String> {
        self.checksum_fields().checksum()
    }

    /// JSON text embedded in the QR code (checksum included).
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::ImageEncoding`] if the payload cannot be serialized.
    pub fn to_qr_text(&self) -> TicketResult<String> {
        serde_json::to_string(self).map_err(|e| TicketError::ImageEncoding(e.to_string()))
    }

    /// Parse the JSON text recovered from a scanned QR code.
    ///
    /// The checksum is not checked here; see [`verify_ticket`].
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidInput`] if the text is not a ticket payload.
    pub fn from_qr_text(text: &str) -> TicketResult<Self> {
        serde_json::from_str(text).map_err(|e| TicketError::invalid_input("ticketData", e.to_string()))
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Build a ticket payload for a persisted registration.
///
/// Reads `clock` once for `registeredAt`. Callers that redisplay a ticket should keep
/// the payload rather than rebuild it, since a rebuild yields a new timestamp and
/// therefore a new checksum.
///
/// # Errors
///
/// - [`TicketError::InvalidInput`] if the id, name or email is blank
/// - [`TicketError::ChecksumUnavailable`] if the checksum cannot be computed
pub fn build_ticket_payload<C: Clock + ?Sized>(
    registration_id: &str,
    request: &TicketRequest,
    clock: &C,
) -> TicketResult<TicketPayload> {
    build_ticket_payload_at(registration_id, request, clock.now())
}

/// Build a ticket payload with an explicit `registeredAt`.
///
/// The instant is truncated to whole milliseconds, the precision it is serialized with.
///
/// # Errors
///
/// Same as [`build_ticket_payload`].
pub fn build_ticket_payload_at(
    registration_id: &str,
    request: &TicketRequest,
    registered_at: DateTime<Utc>,
) -> TicketResult<TicketPayload> {
    require("id", registration_id)?;
    require("name", &request.name)?;
    require("email", &request.email)?;

    let mut payload = TicketPayload {
        id: registration_id.to_string(),
        name: request.name.clone(),
        email: request.email.clone(),
        ticket_type: request.ticket_type.normalized(),
        tickets: coerce_ticket_count(request.tickets.as_ref()),
        total_amount: coerce_total_amount(request.total_amount.as_ref()),
        event_date: EVENT_DATE.to_string(),
        registered_at: registered_at.trunc_subsecs(3),
        checksum: String::new(),
    };
    payload.checksum = payload.compute_checksum()?;

    tracing::debug!(
        ticket_id = %payload.id,
        ticket_type = %payload.ticket_type,
        tickets = payload.tickets,
        "Ticket payload built"
    );

    Ok(payload)
}

/// Check that a ticket's embedded checksum matches its fields.
///
/// # Errors
///
/// - [`TicketError::ChecksumMismatch`] if any field was altered after the ticket was built
/// - [`TicketError::ChecksumUnavailable`] if the checksum cannot be recomputed
pub fn verify_ticket(payload: &TicketPayload) -> TicketResult<()> {
    if payload.compute_checksum()? == payload.checksum {
        Ok(())
    } else {
        tracing::warn!(ticket_id = %payload.id, "Ticket checksum mismatch");
        Err(TicketError::ChecksumMismatch {
            id: payload.id.clone(),
        })
    }
}

fn require(field: &'static str, value: &str) -> TicketResult<()> {
    if value.trim().is_empty() {
        return Err(TicketError::invalid_input(field, "must not be blank"));
    }
    Ok(())
}

// ============================================================================
// Coercion
// ============================================================================

/// Ticket count with browser `parseInt(x) || 1` semantics, floored at 1.
///
/// No upper bound is applied beyond what `i64` holds.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn coerce_ticket_count(raw: Option<&Value>) -> u64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        }),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(n) if n >= 1 => n.unsigned_abs(),
        _ => 1,
    }
}

/// Total amount with browser `parseFloat(x) || 0` semantics, floored at 0.
pub(crate) fn coerce_total_amount(raw: Option<&Value>) -> f64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_decimal(s),
        _ => None,
    };

    parsed.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}

fn split_sign(text: &str) -> (bool, &str) {
    let text = text.trim_start();
    text.strip_prefix('-')
        .map_or_else(|| (false, text.strip_prefix('+').unwrap_or(text)), |rest| (true, rest))
}

fn leading_integer(text: &str) -> Option<i64> {
    let (negative, rest) = split_sign(text);
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn leading_decimal(text: &str) -> Option<f64> {
    let (negative, rest) = split_sign(text);
    let bytes = rest.as_bytes();

    let int_digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let magnitude: f64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// JSON number for an amount, integral when the amount is whole.
///
/// `None` for NaN and infinities, which JSON cannot represent.
pub(crate) fn amount_number(amount: f64) -> Option<serde_json::Number> {
    whole_amount(amount).map_or_else(|| serde_json::Number::from_f64(amount), |whole| Some(whole.into()))
}

fn amount_value(amount: f64) -> Value {
    amount_number(amount).map_or(Value::Null, Value::Number)
}

#[allow(clippy::cast_possible_truncation)]
fn whole_amount(amount: f64) -> Option<i64> {
    // 2^53: beyond this f64 cannot represent every integer
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    (amount.fract() == 0.0 && amount.abs() < MAX_SAFE).then(|| amount as i64)
}

// ============================================================================
// Serde helpers
// ============================================================================

mod amount {
    use serde::Serializer;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        match super::whole_amount(*amount) {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(*amount),
        }
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
