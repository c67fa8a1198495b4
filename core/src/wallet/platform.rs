//! Which wallet to offer, from the browser's User-Agent.

use serde::{Deserialize, Serialize};

/// Device platform as far as wallets are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletPlatform {
    /// iPhone, iPad or iPod: Apple Wallet
    Ios,
    /// Android: Google Wallet
    Android,
    /// Anything else: download the ticket image instead
    Other,
}

impl WalletPlatform {
    /// Classify a User-Agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device))
        {
            Self::Ios
        } else if user_agent.to_ascii_lowercase().contains("android") {
            Self::Android
        } else {
            Self::Other
        }
    }

    /// Whether a wallet pass can be offered.
    #[must_use]
    pub const fn supports_wallet(&self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }
}
