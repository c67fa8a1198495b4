//! Configuration for the ticket service.
//!
//! Loads configuration from environment variables with sensible defaults. Only public
//! identifiers are read; signing keys belong to the pass signing service.

use serde::{Deserialize, Serialize};
use spc_tickets_core::event::APPLE_PASS_TYPE_IDENTIFIER;
use spc_tickets_core::qr::{QrOptions, DEFAULT_MARGIN, DEFAULT_WIDTH};
use spc_tickets_core::wallet::ApplePassConfig;
use std::env;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,spc_tickets_web=debug";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Wallet issuer identifiers
    pub wallet: WalletConfig,
    /// QR rendering configuration
    pub qr: QrConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter directives, from `RUST_LOG`
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Wallet issuer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Apple developer team identifier
    pub apple_team_id: String,
    /// Apple pass type identifier
    pub apple_pass_type_identifier: String,
    /// Google Wallet issuer id
    pub google_issuer_id: String,
    /// Service account that the signer uses for Google save links
    pub google_service_account_email: String,
}

/// QR configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QrConfig {
    /// Target image width in pixels
    pub width: u32,
    /// Quiet zone in modules
    pub margin: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Self {
            server: ServerConfig {
                host: string("HOST", "0.0.0.0"),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                log_level: string("RUST_LOG", DEFAULT_LOG_FILTER),
                shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            wallet: WalletConfig {
                apple_team_id: string("APPLE_TEAM_ID", "YOUR_TEAM_ID"),
                apple_pass_type_identifier: string(
                    "APPLE_PASS_TYPE_IDENTIFIER",
                    APPLE_PASS_TYPE_IDENTIFIER,
                ),
                google_issuer_id: string("GOOGLE_WALLET_ISSUER_ID", "YOUR_ISSUER_ID"),
                google_service_account_email: string(
                    "GOOGLE_SERVICE_ACCOUNT_EMAIL",
                    "spc-easter-2026@example.com",
                ),
            },
            qr: QrConfig {
                width: lookup("QR_WIDTH")
                    .and_then(|s| s.parse().ok())
                    .filter(|width| *width > 0)
                    .unwrap_or(DEFAULT_WIDTH),
                margin: lookup("QR_MARGIN")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MARGIN),
            },
        }
    }

    /// Socket address to bind, as `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Tracing filter built from [`ServerConfig::log_level`].
    ///
    /// Directives that fail to parse fall back to `info`.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.server.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// QR rendering options.
    #[must_use]
    pub const fn qr_options(&self) -> QrOptions {
        QrOptions::new(self.qr.width, self.qr.margin)
    }

    /// Issuer settings for `pass.json`.
    #[must_use]
    pub fn apple_pass_config(&self) -> ApplePassConfig {
        ApplePassConfig {
            pass_type_identifier: self.wallet.apple_pass_type_identifier.clone(),
            ..ApplePassConfig::new(self.wallet.apple_team_id.clone())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
