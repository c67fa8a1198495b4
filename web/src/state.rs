//! Application state shared across handlers.

use crate::config::Config;
use spc_tickets_core::environment::{Clock, SystemClock};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Source of `registeredAt` for new tickets
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create state with an explicit clock.
    #[must_use]
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    /// Create state backed by the system clock.
    #[must_use]
    pub fn with_system_clock(config: Config) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
