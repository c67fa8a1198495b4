//! Ticket issuance.

use crate::extractors::CorrelationId;
use crate::state::AppState;
use crate::WebResult;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use spc_tickets_core::event::ticket_image_file_name;
use spc_tickets_core::qr::encode_qr_with;
use spc_tickets_core::{build_ticket_payload, TicketPayload, TicketRequest};

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTicketRequest {
    /// Id the document store assigned to the registration
    pub registration_id: String,
    /// Attendee and order details
    pub ticket: TicketRequest,
}

/// A freshly issued ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTicket {
    /// Checksummed payload; keep it, rebuilding yields a new checksum
    pub ticket: TicketPayload,
    /// PNG QR code as a data URL
    pub qr_code_data_url: String,
    /// Suggested download name for the QR image
    pub file_name: String,
}

/// Build a ticket and its QR code for a persisted registration.
///
/// ```text
/// POST /api/tickets
/// {"registrationId": "abc123", "ticket": {"name": "...", "email": "...", "ticketType": "...", "tickets": 4, "totalAmount": 200}}
/// ```
///
/// # Errors
///
/// - 400/415/422 if the body cannot be parsed
/// - 422 if the id, name or email is blank
/// - 413 if the ticket does not fit in a QR code
/// - 500 if encoding fails
pub async fn issue_ticket(
    State(state): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    body: Result<Json<IssueTicketRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<IssuedTicket>)> {
    let Json(request) = body?;

    let ticket = build_ticket_payload(&request.registration_id, &request.ticket, &*state.clock)?;
    let qr = encode_qr_with(&ticket, &state.config.qr_options())?;

    tracing::info!(
        %correlation_id,
        ticket_id = %ticket.id,
        ticket_type = %ticket.ticket_type,
        tickets = ticket.tickets,
        "Ticket issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(IssuedTicket {
            file_name: ticket_image_file_name(&ticket.id),
            qr_code_data_url: qr.data_url(),
            ticket,
        }),
    ))
}
