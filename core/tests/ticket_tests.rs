//! End-to-end tests for ticket construction, QR rendering and wallet mapping.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use chrono::Duration;
use proptest::prelude::*;
use serde_json::json;
use spc_tickets_core::event::EVENT_DATE;
use spc_tickets_core::qr::{encode_qr_with, QrOptions};
use spc_tickets_core::{
    build_apple_pass_fields, build_google_pass_object, build_ticket_payload, encode_qr,
    verify_ticket, TicketError, TicketPayload, TicketRequest, TicketType,
};
use spc_tickets_testing::properties;
use spc_tickets_testing::{
    sample_form, sample_record, sample_request, test_clock, FixedClock, SteppingClock,
};

fn is_lower_hex_digest(checksum: &str) -> bool {
    checksum.len() == 64
        && checksum
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Decode the first QR code in a PNG.
fn scan(png: &[u8]) -> String {
    let luma = image::load_from_memory(png).unwrap().to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let (_meta, content) = grids[0].decode().unwrap();
    content
}

#[test]
fn test_family_package_ticket() {
    let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();

    assert_eq!(ticket.id, "abc123");
    assert_eq!(ticket.tickets, 4);
    assert_eq!(ticket.total_amount, 200.0);
    assert_eq!(ticket.event_date, EVENT_DATE);
    assert!(is_lower_hex_digest(&ticket.checksum));
    assert!(verify_ticket(&ticket).is_ok());
}

#[test]
fn test_ticket_from_stored_registration() {
    let clock = test_clock();
    let record = sample_form().into_record("abc123", clock.time()).unwrap();
    assert_eq!(record, sample_record("abc123", clock.time()));

    let ticket = build_ticket_payload(&record.id, &record.ticket_request(), &clock).unwrap();

    assert_eq!(ticket.name, "Jane Doe");
    assert_eq!(ticket.ticket_type, TicketType::GeneralAdmission);
    assert_eq!(ticket.tickets, 2);
    assert_eq!(ticket.total_amount, 100.0);
    assert!(ticket.to_qr_text().unwrap().contains(r#""tickets":2,"totalAmount":100,"#));
    assert!(verify_ticket(&ticket).is_ok());
}

#[test]
fn test_unparseable_count_defaults_to_one() {
    let request = sample_request().with_raw_tickets(json!("not-a-number"));
    let ticket = build_ticket_payload("abc123", &request, &test_clock()).unwrap();
    assert_eq!(ticket.tickets, 1);
}

#[test]
fn test_same_instant_is_deterministic() {
    let clock = test_clock();
    let first = build_ticket_payload("abc123", &sample_request(), &clock).unwrap();
    let second = build_ticket_payload("abc123", &sample_request(), &clock).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_different_instants_differ_only_in_timestamp() {
    let clock = SteppingClock::new(test_clock().time(), Duration::milliseconds(1500));
    let first = build_ticket_payload("abc123", &sample_request(), &clock).unwrap();
    let second = build_ticket_payload("abc123", &sample_request(), &clock).unwrap();

    assert_ne!(first.registered_at, second.registered_at);
    assert_ne!(first.checksum, second.checksum);
    assert_eq!(
        TicketPayload {
            registered_at: first.registered_at,
            checksum: first.checksum.clone(),
            ..second
        },
        first
    );
}

#[test]
fn test_apple_fields_for_family_package() {
    let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();
    let fields = serde_json::to_value(build_apple_pass_fields(&ticket)).unwrap();

    assert_eq!(fields["barcode"]["message"], json!("abc123"));
    assert!(
        fields["secondaryFields"]
            .as_array()
            .unwrap()
            .iter()
            .any(|field| field["value"] == json!("4"))
    );
}

#[test]
fn test_google_object_for_family_package() {
    let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();
    let object = build_google_pass_object(&ticket, "3388000000022");

    assert_eq!(object.id, "3388000000022.abc123");
    assert_eq!(object.ticket_holder_name, "Jane Doe");
    assert_eq!(object.barcode.value, "abc123");
}

#[test]
fn test_qr_code_scans_back_to_the_ticket() {
    let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();
    let image = encode_qr_with(&ticket, &QrOptions::default().with_width(600)).unwrap();

    let scanned = TicketPayload::from_qr_text(&scan(image.png_bytes())).unwrap();
    assert_eq!(scanned, ticket);
    assert!(verify_ticket(&scanned).is_ok());
}

#[test]
fn test_default_qr_is_a_data_url() {
    let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();
    let image = encode_qr(&ticket).unwrap();

    assert!(image.data_url().starts_with("data:image/png;base64,"));
    assert!(image.width() >= image.modules());
}

#[test]
fn test_oversized_name_is_rejected_by_qr() {
    let request = TicketRequest::new("x".repeat(2000), "jane@example.com", TicketType::VipSingle);
    let ticket = build_ticket_payload("abc123", &request, &test_clock()).unwrap();

    assert!(matches!(
        encode_qr(&ticket),
        Err(TicketError::PayloadTooLarge { .. })
    ));
}

#[test]
fn test_tampered_scan_is_detected() {
    let ticket = build_ticket_payload("abc123", &sample_request(), &test_clock()).unwrap();
    let text = ticket
        .to_qr_text()
        .unwrap()
        .replace("\"tickets\":4", "\"tickets\":40");

    let tampered = TicketPayload::from_qr_text(&text).unwrap();
    assert_eq!(tampered.tickets, 40);
    assert_eq!(
        verify_ticket(&tampered),
        Err(TicketError::ChecksumMismatch {
            id: "abc123".to_string()
        })
    );
}

proptest! {
    #[test]
    fn prop_rebuild_is_deterministic(request in properties::ticket_request(), secs in 0i64..100_000_000) {
        let clock = FixedClock::new(test_clock().time() + Duration::seconds(secs));
        let first = build_ticket_payload("reg-1", &request, &clock).unwrap();
        let second = build_ticket_payload("reg-1", &request, &clock).unwrap();

        prop_assert_eq!(&first.checksum, &second.checksum);
        prop_assert!(is_lower_hex_digest(&first.checksum));
        prop_assert!(verify_ticket(&first).is_ok());
    }

    #[test]
    fn prop_any_field_change_breaks_the_checksum(
        request in properties::ticket_request(),
        field in 0usize..7,
    ) {
        let mut ticket = build_ticket_payload("reg-1", &request, &test_clock()).unwrap();
        match field {
            0 => ticket.id.push('x'),
            1 => ticket.name.push('x'),
            2 => ticket.email.push('x'),
            3 => ticket.tickets += 1,
            4 => ticket.total_amount += 1.0,
            5 => ticket.event_date = "2026-04-05".to_string(),
            _ => ticket.registered_at += Duration::milliseconds(1),
        }

        prop_assert!(verify_ticket(&ticket).is_err());
    }

    #[test]
    fn prop_ticket_type_change_breaks_the_checksum(
        request in properties::ticket_request(),
        other in properties::ticket_type(),
    ) {
        prop_assume!(other != request.ticket_type);
        let mut ticket = build_ticket_payload("reg-1", &request, &test_clock()).unwrap();
        ticket.ticket_type = other;

        prop_assert!(verify_ticket(&ticket).is_err());
    }

    #[test]
    fn prop_qr_text_round_trips(request in properties::ticket_request()) {
        let ticket = build_ticket_payload("reg-1", &request, &test_clock()).unwrap();
        let parsed = TicketPayload::from_qr_text(&ticket.to_qr_text().unwrap()).unwrap();

        prop_assert_eq!(&parsed, &ticket);
        prop_assert!(verify_ticket(&parsed).is_ok());
    }
}
