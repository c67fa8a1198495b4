//! Wallet pass endpoints.
//!
//! Both pass endpoints verify the ticket checksum and answer with the unsigned pass
//! document. Signing happens in the pass signing service, which holds the Apple
//! certificate and the Google service-account key.

use crate::error::AppError;
use crate::extractors::{CorrelationId, UserAgent};
use crate::state::AppState;
use crate::WebResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use spc_tickets_core::event::apple_pass_file_name;
use spc_tickets_core::wallet::{build_apple_pass, build_google_save_claims, WalletPlatform};
use spc_tickets_core::{build_google_pass_object, verify_ticket, TicketPayload};

/// Body of the wallet pass endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPassRequest {
    /// Ticket as issued by `POST /api/tickets`
    #[serde(default)]
    pub ticket_data: Option<TicketPayload>,
}

impl WalletPassRequest {
    /// The ticket, if present and untampered.
    fn into_verified_ticket(self) -> WebResult<TicketPayload> {
        let ticket = self
            .ticket_data
            .ok_or_else(|| AppError::bad_request("Missing required field: ticketData"))?;
        verify_ticket(&ticket)?;
        Ok(ticket)
    }
}

/// Unsigned Apple Wallet `pass.json`.
///
/// `Content-Disposition` names the `.pkpass` the signer should produce.
///
/// # Errors
///
/// - 400 if `ticketData` is missing
/// - 422 if the ticket was tampered with, or its id cannot appear in a file name
pub async fn apple_pass(
    State(state): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    body: Result<Json<WalletPassRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(request) = body?;
    let ticket = request.into_verified_ticket()?;

    let disposition = attachment_disposition(&apple_pass_file_name(&ticket.id))?;
    let pass = build_apple_pass(&ticket, &state.config.apple_pass_config());

    tracing::info!(%correlation_id, ticket_id = %ticket.id, "Apple pass prepared");

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(pass)).into_response())
}

/// `attachment; filename="..."` for a name that needs no quoting.
fn attachment_disposition(file_name: &str) -> WebResult<HeaderValue> {
    if file_name
        .chars()
        .any(|c| c == '"' || c == '\\' || c.is_control() || !c.is_ascii())
    {
        return Err(AppError::validation("Ticket id cannot be used in a file name"));
    }
    HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|_| AppError::validation("Ticket id cannot be used in a file name"))
}

/// Unsigned Google Wallet save-to-wallet claims for one ticket.
///
/// # Errors
///
/// - 400 if `ticketData` is missing
/// - 422 if the ticket was tampered with
pub async fn google_save_claims(
    State(state): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    body: Result<Json<WalletPassRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(request) = body?;
    let ticket = request.into_verified_ticket()?;

    let wallet = &state.config.wallet;
    let object = build_google_pass_object(&ticket, &wallet.google_issuer_id);
    let claims = build_google_save_claims(&wallet.google_service_account_email, vec![object]);

    tracing::info!(%correlation_id, ticket_id = %ticket.id, "Google save claims prepared");

    Ok(Json(claims).into_response())
}

/// Response of `GET /api/wallet/platform`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResponse {
    /// Detected platform
    pub platform: WalletPlatform,
    /// Whether a wallet button should be shown
    pub supports_wallet: bool,
}

/// Which wallet the caller's device supports.
#[allow(clippy::unused_async)]
pub async fn wallet_platform(UserAgent(user_agent): UserAgent) -> Json<PlatformResponse> {
    let platform = WalletPlatform::from_user_agent(&user_agent);
    Json(PlatformResponse {
        platform,
        supports_wallet: platform.supports_wallet(),
    })
}
