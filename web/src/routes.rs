//! Router configuration.

use crate::handlers::{apple_pass, google_save_claims, health_check, issue_ticket, wallet_platform};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /health`
/// - `POST /api/tickets`
/// - `POST /api/wallet/apple`
/// - `POST /api/wallet/google`
/// - `GET /api/wallet/platform`
///
/// Every response carries an `X-Correlation-ID` header and permissive CORS headers,
/// since the registration page is served from a different origin.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/tickets", post(issue_ticket))
        .route("/wallet/apple", post(apple_pass))
        .route("/wallet/google", post(google_save_claims))
        .route("/wallet/platform", get(wallet_platform));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .layer(CorsLayer::permissive())
}
