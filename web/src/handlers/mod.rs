//! HTTP handlers.

pub mod health;
pub mod tickets;
pub mod wallet;

pub use health::health_check;
pub use tickets::issue_ticket;
pub use wallet::{apple_pass, google_save_claims, wallet_platform};
