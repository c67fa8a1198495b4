//! # SPC Easter 2026 Tickets Testing
//!
//! Testing utilities for the ticket crates.
//!
//! This crate provides:
//! - Deterministic [`Clock`] implementations
//! - Fixture builders for requests, forms and records
//! - proptest strategies for the domain types
//!
//! ## Example
//!
//! ```
//! use spc_tickets_core::build_ticket_payload;
//! use spc_tickets_testing::{sample_request, test_clock};
//!
//! let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();
//! assert_eq!(ticket.registered_at, test_clock().time());
//! ```

use chrono::{DateTime, Utc};
use spc_tickets_core::environment::Clock;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use spc_tickets_testing::mocks::FixedClock;
    /// use spc_tickets_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// The instant this clock reports
        #[must_use]
        pub const fn time(&self) -> DateTime<Utc> {
            self.time
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step on every read.
    ///
    /// Used to show that two builds of the same request at different instants differ.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: chrono::Duration,
    }

    impl SteppingClock {
        /// First read returns `start`, each later read adds `step`.
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: chrono::Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self
                .next
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Create a default fixed clock for tests (2026-03-01 12:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Fixture builders.
pub mod fixtures {
    use super::{DateTime, Utc};
    use spc_tickets_core::registration::RegistrationForm;
    use spc_tickets_core::{
        PaymentMethod, RegistrationRecord, RegistrationStatus, TicketRequest, TicketType,
    };

    /// Jane Doe, family package, 4 tickets, $200.
    #[must_use]
    pub fn sample_request() -> TicketRequest {
        TicketRequest::new("Jane Doe", "jane@example.com", TicketType::FamilyPackage)
            .with_tickets(4)
            .with_total_amount(200.0)
    }

    /// A valid form: two general admission tickets paid by Zelle.
    #[must_use]
    pub fn sample_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "2145550100".to_string(),
            ticket_type: TicketType::GeneralAdmission,
            tickets: 2,
            special_needs: String::new(),
            payment_method: PaymentMethod::Zelle,
        }
    }

    /// A persisted record for [`sample_form`].
    #[must_use]
    pub fn sample_record(id: &str, registered_at: DateTime<Utc>) -> RegistrationRecord {
        RegistrationRecord {
            id: id.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(214) 555-0100".to_string(),
            ticket_type: TicketType::GeneralAdmission,
            tickets: 2,
            special_needs: None,
            payment_method: PaymentMethod::Zelle,
            total_amount: 100.0,
            registered_at,
            status: RegistrationStatus::Confirmed,
        }
    }
}

/// proptest strategies for domain types.
pub mod properties {
    use proptest::prelude::*;
    use spc_tickets_core::{TicketRequest, TicketType};

    /// Any ticket type.
    pub fn ticket_type() -> impl Strategy<Value = TicketType> {
        proptest::sample::select(TicketType::ALL.to_vec())
    }

    /// Non-blank printable text, including non-ASCII.
    pub fn non_blank_text() -> impl Strategy<Value = String> {
        "[A-Za-zÀ-ÿ0-9'. -]{0,30}[A-Za-zÀ-ÿ0-9]"
    }

    /// Plausible email addresses.
    pub fn email() -> impl Strategy<Value = String> {
        "[a-z0-9._]{1,12}@[a-z]{1,10}\\.(com|org|net)"
    }

    /// Requests with in-range counts and amounts in whole cents.
    pub fn ticket_request() -> impl Strategy<Value = TicketRequest> {
        (
            non_blank_text(),
            email(),
            ticket_type(),
            1u32..=20,
            0u32..=1_000_000,
        )
            .prop_map(|(name, email, ticket_type, tickets, cents)| {
                TicketRequest::new(name, email, ticket_type)
                    .with_tickets(tickets)
                    .with_total_amount(f64::from(cents) / 100.0)
            })
    }
}

// Re-export commonly used items
pub use fixtures::{sample_form, sample_record, sample_request};
pub use mocks::{FixedClock, SteppingClock, test_clock};
