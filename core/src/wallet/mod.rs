//! Wallet pass payloads.
//!
//! These constructors map a [`TicketPayload`](crate::payload::TicketPayload) onto the
//! structures Apple Wallet and Google Wallet expect. They are pure and key-free.
//!
//! Signing is deliberately not here. An Apple `.pkpass` must be signed with the pass
//! type certificate and a Google save link is a JWT signed with a service-account
//! key; both happen in a trusted service that receives the unsigned output of this
//! module. Keep it that way so this crate never handles private key material.

pub mod apple;
pub mod google;
pub mod platform;

pub use apple::{
    build_apple_pass, build_apple_pass_fields, ApplePass, ApplePassConfig, AppleWalletFieldSet,
    PassField,
};
pub use google::{
    build_google_event_class, build_google_pass_object, build_google_save_claims,
    GoogleEventTicketClass, GoogleSaveClaims, GoogleWalletObject,
};
pub use platform::WalletPlatform;
