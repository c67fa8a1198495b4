//! HTTP shell for SPC Easter 2026 tickets.
//!
//! Thin Axum layer over [`spc_tickets_core`]: handlers parse JSON, call the pure core
//! functions and map [`TicketError`](spc_tickets_core::TicketError) to HTTP statuses.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, CORS
//! │  - Request parsing                      │  ← Correlation ids, tracing
//! │  - Response serialization               │
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Ticket payload and checksum          │  ← Clock injected
//! │  - QR rendering                         │  ← No I/O
//! │  - Unsigned wallet pass payloads        │  ← No keys
//! └─────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use extractors::{CorrelationId, UserAgent};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
