//! HTTP tests for the ticket service router.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use spc_tickets_core::{verify_ticket, TicketPayload, TicketType};
use spc_tickets_testing::test_clock;
use spc_tickets_web::{build_router, AppState, Config, CORRELATION_ID_HEADER};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::from_lookup(|name| match name {
        "APPLE_TEAM_ID" => Some("TEAM123".to_string()),
        "GOOGLE_WALLET_ISSUER_ID" => Some("3388000000022".to_string()),
        "GOOGLE_SERVICE_ACCOUNT_EMAIL" => Some("signer@example.com".to_string()),
        _ => None,
    });
    build_router(AppState::new(config, Arc::new(test_clock())))
}

async fn send(request: Request<Body>) -> Response {
    app().oneshot(request).await.unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn issue(body: &Value) -> Value {
    let response = send(post_json("/api/tickets", body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

fn family_package() -> Value {
    json!({
        "registrationId": "abc123",
        "ticket": {
            "name": "Jane Doe",
            "email": "jane@example.com",
            "ticketType": "family-package",
            "tickets": 4,
            "totalAmount": 200
        }
    })
}

#[tokio::test]
async fn test_health() {
    let response = send(Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    let body = json_body(response).await;
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn test_issue_ticket() {
    let body = issue(&family_package()).await;

    assert_eq!(body["ticket"]["id"], json!("abc123"));
    assert_eq!(body["ticket"]["tickets"], json!(4));
    assert_eq!(body["ticket"]["totalAmount"], json!(200));
    assert_eq!(body["ticket"]["eventDate"], json!("2026-04-04"));
    assert_eq!(body["ticket"]["registeredAt"], json!("2026-03-01T12:00:00.000Z"));
    assert_eq!(body["fileName"], json!("spc-easter-2026-ticket-abc123.png"));
    assert!(
        body["qrCodeDataUrl"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );

    let ticket: TicketPayload = serde_json::from_value(body["ticket"].clone()).unwrap();
    assert!(verify_ticket(&ticket).is_ok());
}

#[tokio::test]
async fn test_issue_ticket_coerces_form_values() {
    let mut request = family_package();
    request["ticket"]["tickets"] = json!("not-a-number");
    request["ticket"]["totalAmount"] = json!("62.50");

    let body = issue(&request).await;
    assert_eq!(body["ticket"]["tickets"], json!(1));
    assert_eq!(body["ticket"]["totalAmount"], json!(62.5));
}

#[tokio::test]
async fn test_issue_ticket_rejects_blank_name() {
    let mut request = family_package();
    request["ticket"]["name"] = json!("   ");

    let response = send(post_json("/api/tickets", &request)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_issue_ticket_rejects_oversized_payload() {
    let mut request = family_package();
    request["ticket"]["name"] = json!("x".repeat(3000));

    let response = send(post_json("/api/tickets", &request)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(response).await["code"], json!("PAYLOAD_TOO_LARGE"));
}

#[tokio::test]
async fn test_malformed_json_gets_json_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tickets")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn test_apple_pass() {
    let issued = issue(&family_package()).await;

    let response = send(post_json(
        "/api/wallet/apple",
        &json!({"ticketData": issued["ticket"]}),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"spc-easter-2026-abc123.pkpass\""
    );
    let pass = json_body(response).await;
    assert_eq!(pass["serialNumber"], json!("abc123"));
    assert_eq!(pass["teamIdentifier"], json!("TEAM123"));
    assert_eq!(pass["barcodes"][0]["message"], json!("abc123"));
    assert_eq!(pass["eventTicket"]["secondaryFields"][1]["value"], json!("4"));
}

#[tokio::test]
async fn test_apple_pass_requires_ticket_data() {
    let response = send(post_json("/api/wallet/apple", &json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn test_wallet_rejects_tampered_ticket() {
    let mut issued = issue(&family_package()).await;
    issued["ticket"]["tickets"] = json!(40);

    for uri in ["/api/wallet/apple", "/api/wallet/google"] {
        let response = send(post_json(uri, &json!({"ticketData": issued["ticket"]}))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(json_body(response).await["code"], json!("TICKET_TAMPERED"));
    }
}

#[tokio::test]
async fn test_apple_pass_rejects_quoted_ticket_id() {
    let mut body = family_package();
    body["registrationId"] = json!("abc\"123");
    let issued = issue(&body).await;

    let response = send(post_json(
        "/api/wallet/apple",
        &json!({"ticketData": issued["ticket"]}),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!response.headers().contains_key(header::CONTENT_DISPOSITION));
    assert_eq!(json_body(response).await["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_wallet_accepts_vip_experience_ticket() {
    let issued = issue(&family_package()).await;
    let mut ticket: TicketPayload = serde_json::from_value(issued["ticket"].clone()).unwrap();
    ticket.ticket_type = TicketType::VipExperience;
    ticket.checksum = ticket.compute_checksum().unwrap();
    let ticket_data = serde_json::to_value(&ticket).unwrap();
    assert_eq!(ticket_data["ticketType"], json!("vip-experience"));

    for uri in ["/api/wallet/apple", "/api/wallet/google"] {
        let response = send(post_json(uri, &json!({"ticketData": ticket_data}))).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_google_save_claims() {
    let issued = issue(&family_package()).await;

    let response = send(post_json(
        "/api/wallet/google",
        &json!({"ticketData": issued["ticket"]}),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let claims = json_body(response).await;
    assert_eq!(claims["iss"], json!("signer@example.com"));
    assert_eq!(claims["typ"], json!("savetowallet"));
    let object = &claims["payload"]["eventTicketObjects"][0];
    assert_eq!(object["id"], json!("3388000000022.abc123"));
    assert_eq!(object["classId"], json!("3388000000022.spc-easter-2026-event"));
    assert_eq!(object["barcode"]["value"], json!("abc123"));
}

#[tokio::test]
async fn test_wallet_platform() {
    let request = Request::get("/api/wallet/platform")
        .header(
            header::USER_AGENT,
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X)",
        )
        .body(Body::empty())
        .unwrap();

    let body = json_body(send(request).await).await;
    assert_eq!(body, json!({"platform": "ios", "supportsWallet": true}));
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tickets")
        .header(header::ORIGIN, "https://spc-easter-2026.web.app")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = send(request).await;
    assert!(response.status().is_success());
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}
