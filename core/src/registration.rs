//! Registration form capture: validation, phone formatting and pricing.
//!
//! Persisting the record is the document store's job. This module only turns what the
//! attendee typed into a clean [`RegistrationRecord`].

use crate::types::{PaymentMethod, RegistrationRecord, RegistrationStatus, TicketType};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email pattern should compile")
});

/// Digits in a North American phone number.
const PHONE_DIGITS: usize = 10;

// ============================================================================
// Form
// ============================================================================

/// The registration form as submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// First name (required)
    pub first_name: String,
    /// Last name (required)
    pub last_name: String,
    /// Email (required)
    pub email: String,
    /// Phone (optional)
    #[serde(default)]
    pub phone: String,
    /// Ticket type
    pub ticket_type: TicketType,
    /// Number of tickets or packages
    #[serde(default = "default_tickets")]
    pub tickets: u32,
    /// Special needs or requests
    #[serde(default)]
    pub special_needs: String,
    /// Intended payment method
    pub payment_method: PaymentMethod,
}

const fn default_tickets() -> u32 {
    1
}

/// A single invalid field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in JSON
    pub field: &'static str,
    /// Message shown next to the field
    pub message: &'static str,
}

/// Every problem found in a form.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize)]
#[error("registration form has {} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    /// Field errors, in form order
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Whether `field` has an error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl RegistrationForm {
    /// Check every field, collecting all errors rather than stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each invalid field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(FieldError { field, message });

        if self.first_name.trim().is_empty() {
            fail("firstName", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            fail("lastName", "Last name is required");
        }
        let email = self.email.trim();
        if email.is_empty() {
            fail("email", "Email is required");
        } else if !is_valid_email(email) {
            fail("email", "Please enter a valid email address");
        }
        let phone_digits = self.phone.chars().filter(char::is_ascii_digit).count();
        if phone_digits > 0 && phone_digits < PHONE_DIGITS {
            fail("phone", "Please enter a 10-digit phone number");
        }
        if self.tickets == 0 {
            fail("tickets", "At least one ticket is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    /// Total due for this form.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        total_amount(self.ticket_type, self.tickets)
    }

    /// Validate and produce the record to persist under `id`.
    ///
    /// Text fields are trimmed, the phone is normalized, and the total is computed
    /// from the price list rather than trusted from the client.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if the form is invalid.
    pub fn into_record(
        self,
        id: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<RegistrationRecord, ValidationErrors> {
        self.validate()?;

        let total_amount = self.total_amount();
        let special_needs = self.special_needs.trim();

        Ok(RegistrationRecord {
            id: id.into(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: format_phone(&self.phone),
            ticket_type: self.ticket_type.normalized(),
            tickets: self.tickets,
            special_needs: (!special_needs.is_empty()).then(|| special_needs.to_string()),
            payment_method: self.payment_method,
            total_amount,
            registered_at: submitted_at,
            status: RegistrationStatus::Confirmed,
        })
    }
}

/// Whether `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Format a phone number as the attendee types it: `214`, `(214) 555`,
/// `(214) 555-0100`. Non-digits are dropped and input past ten digits is ignored.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

// ============================================================================
// Pricing
// ============================================================================

/// Total in dollars for `count` units of `ticket_type`.
#[must_use]
pub fn total_amount(ticket_type: TicketType, count: u32) -> f64 {
    ticket_type.unit_price() * f64::from(count)
}

/// Format dollars as US currency: `$1,234.50`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: " Jane ".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "214.555.0100".to_string(),
            ticket_type: TicketType::FamilyPackage,
            tickets: 2,
            special_needs: "   ".to_string(),
            payment_method: PaymentMethod::Venmo,
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let invalid = RegistrationForm {
            first_name: String::new(),
            last_name: "  ".to_string(),
            email: "jane@example".to_string(),
            phone: "555-01".to_string(),
            tickets: 0,
            ..form()
        };

        let errors = invalid.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 5);
        for field in ["firstName", "lastName", "email", "phone", "tickets"] {
            assert!(errors.has(field), "missing error for {field}");
        }
        assert_eq!(errors.to_string(), "registration form has 5 invalid field(s)");
    }

    #[test]
    fn test_phone_is_optional() {
        let no_phone = RegistrationForm {
            phone: String::new(),
            ..form()
        };
        assert!(no_phone.validate().is_ok());
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("21"), "21");
        assert_eq!(format_phone("2145"), "(214) 5");
        assert_eq!(format_phone("214555"), "(214) 555");
        assert_eq!(format_phone("2145550"), "(214) 555-0");
        assert_eq!(format_phone("+1 (214) 555-0100"), "(121) 455-5010");
        assert_eq!(format_phone("214-555-0100 ext 9"), "(214) 555-0100");
    }

    #[test]
    fn test_pricing() {
        assert_eq!(total_amount(TicketType::GeneralAdmission, 3), 150.0);
        assert_eq!(total_amount(TicketType::VipSingle, 1), 125.0);
        assert_eq!(total_amount(TicketType::FamilyPackage, 2), 300.0);
        assert_eq!(total_amount(TicketType::VipFamilyPackage, 1), 500.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(50.0), "$50.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-12.345), "-$12.35");
    }

    #[test]
    fn test_into_record() {
        let submitted_at = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
        let record = form().into_record("doc-1", submitted_at).unwrap();

        assert_eq!(record.id, "doc-1");
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.phone, "(214) 555-0100");
        assert_eq!(record.total_amount, 300.0);
        assert_eq!(record.special_needs, None);
        assert_eq!(record.status, RegistrationStatus::Confirmed);
        assert_eq!(record.registered_at, submitted_at);
    }

    #[test]
    fn test_form_json_defaults() {
        let json = r#"{
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "ticketType": "vip-experience",
            "paymentMethod": "cash"
        }"#;
        let parsed: RegistrationForm = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tickets, 1);
        assert_eq!(parsed.ticket_type, TicketType::VipExperience);
        assert!(parsed.phone.is_empty());
        assert_eq!(parsed.total_amount(), 125.0);

        let record = parsed.into_record("abc123", Utc::now()).unwrap();
        assert_eq!(record.ticket_type, TicketType::VipSingle);
    }
}
