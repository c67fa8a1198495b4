//! Domain types for SPC Easter 2026 registrations.
//!
//! The registration form went through several revisions. Older values still parse and
//! serialize back unchanged, so tickets issued with them keep their checksum. New
//! registrations and tickets use [`TicketType::normalized`].

use crate::payload::TicketRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// Kind of ticket purchased.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketType {
    /// General admission, one attendee
    GeneralAdmission,
    /// VIP experience, one attendee
    VipSingle,
    /// Family package, priced per family
    FamilyPackage,
    /// VIP family package, priced per family
    VipFamilyPackage,
    /// Earlier form value for [`TicketType::VipSingle`]
    VipExperience,
}

impl TicketType {
    /// Ticket types offered by the current form, in the order it lists them.
    pub const ALL: [Self; 4] = [
        Self::GeneralAdmission,
        Self::VipSingle,
        Self::FamilyPackage,
        Self::VipFamilyPackage,
    ];

    /// Wire value (`general-admission`, `vip-single`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralAdmission => "general-admission",
            Self::VipSingle => "vip-single",
            Self::FamilyPackage => "family-package",
            Self::VipFamilyPackage => "vip-family-package",
            Self::VipExperience => "vip-experience",
        }
    }

    /// Human-readable label used on tickets and in the admin dashboard.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::GeneralAdmission => "General Admission",
            Self::VipSingle => "VIP Experience Single",
            Self::FamilyPackage => "Family Package",
            Self::VipFamilyPackage => "VIP Family Package",
            Self::VipExperience => "VIP Experience",
        }
    }

    /// Price in dollars for one unit of this ticket type.
    ///
    /// Family packages are priced per family, so one unit covers a household.
    #[must_use]
    pub const fn unit_price(&self) -> f64 {
        match self {
            Self::GeneralAdmission => 50.0,
            Self::VipSingle | Self::VipExperience => 125.0,
            Self::FamilyPackage => 150.0,
            Self::VipFamilyPackage => 500.0,
        }
    }

    /// Current-form equivalent of this ticket type.
    #[must_use]
    pub const fn normalized(self) -> Self {
        match self {
            Self::VipExperience => Self::VipSingle,
            other => other,
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the attendee intends to pay. Informational only; nothing is charged here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Zelle transfer
    Zelle,
    /// Venmo transfer
    Venmo,
    /// Cash at the door
    Cash,
    /// Check
    Check,
    /// Card, via an external payment page
    CreditCard,
}

/// Registration status. `confirmed` is the only value ever written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Registration accepted
    #[default]
    Confirmed,
}

// ============================================================================
// Registration record
// ============================================================================

/// A registration as stored in the document database.
///
/// Created once at submission and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Store-assigned identifier
    pub id: String,
    /// Attendee first name
    pub first_name: String,
    /// Attendee last name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone, formatted `(xxx) xxx-xxxx`
    pub phone: String,
    /// Ticket type
    pub ticket_type: TicketType,
    /// Number of tickets (or packages)
    pub tickets: u32,
    /// Free-text accessibility or dietary note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_needs: Option<String>,
    /// Intended payment method
    pub payment_method: PaymentMethod,
    /// Computed total in dollars
    pub total_amount: f64,
    /// Submission time
    pub registered_at: DateTime<Utc>,
    /// Registration status
    #[serde(default)]
    pub status: RegistrationStatus,
}

impl RegistrationRecord {
    /// Attendee name as printed on the ticket.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Input for the ticket builder derived from this record.
    #[must_use]
    pub fn ticket_request(&self) -> TicketRequest {
        TicketRequest::new(self.full_name(), self.email.clone(), self.ticket_type)
            .with_tickets(self.tickets)
            .with_total_amount(self.total_amount)
    }
}
