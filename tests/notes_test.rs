//! Integration tests for NotesService.

use chrono::{TimeZone, Utc};
use pinboard::error::{ErrorKind, PinboardError, ResponseError, ValidationError};
use pinboard::mocks::{MockResponse, MockTransport, TestFixtures};
use pinboard::services::NotesService;
use std::sync::Arc;

fn create_test_service_with_transport(transport: Arc<MockTransport>) -> NotesService {
    let config = Arc::new(TestFixtures::config().unwrap());
    NotesService::new(config, transport)
}

#[tokio::test]
async fn test_list_notes() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::notes_xml()),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let notes = service.list().await.unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, "cf73fb9bd3bc0fb4a1e4");
    assert_eq!(notes[0].title, "Shopping list");
    assert_eq!(notes[0].length, 24);
    assert_eq!(
        notes[0].created_at,
        Utc.with_ymd_and_hms(2020, 9, 1, 12, 0, 0).unwrap()
    );
    assert_eq!(
        notes[0].updated_at,
        Utc.with_ymd_and_hms(2020, 9, 2, 8, 30, 0).unwrap()
    );
    assert_eq!(notes[1].title, "Reading");
    assert_eq!(notes[1].length, 0);

    let request = transport.last_request().unwrap();
    assert!(request.url.contains("/v1/notes/list?"));
}

#[tokio::test]
async fn test_get_note() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::note_xml()),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let note = service.get("cf73fb9bd3bc0fb4a1e4").await.unwrap();

    assert_eq!(note.summary.id, "cf73fb9bd3bc0fb4a1e4");
    assert_eq!(note.summary.hash, "0c9a6f1e1b1e6d5ab0c3");
    assert_eq!(note.text, "milk, eggs & bread");

    let request = transport.last_request().unwrap();
    assert!(request
        .url
        .starts_with("https://api.pinboard.in/v1/notes/cf73fb9bd3bc0fb4a1e4?"));
    assert!(request.query_param("auth_token").is_some());
}

#[tokio::test]
async fn test_get_note_rejects_bad_ids() {
    let transport = Arc::new(MockTransport::new());
    let service = create_test_service_with_transport(transport.clone());

    let err = service.get("").await.unwrap_err();
    assert!(matches!(
        err,
        PinboardError::Validation(ValidationError::MissingArgument { name: "id" })
    ));

    let err = service.get("../posts/all").await.unwrap_err();
    assert!(matches!(
        err,
        PinboardError::Validation(ValidationError::InvalidArgument { name: "id", .. })
    ));

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_get_note_missing_fields() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(r#"<note id="abc"><title>t</title></note>"#),
    ]));
    let service = create_test_service_with_transport(transport);

    let err = service.get("abc").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(
        err,
        PinboardError::Response(ResponseError::MissingElement { .. })
    ));
}

#[tokio::test]
async fn test_get_note_keeps_text_verbatim() {
    let body = "<note id=\"abc\">\n  <title> Padded </title>\n  <created_at>2020-09-01 12:00:00</created_at>\n  <updated_at>2020-09-01 12:00:00</updated_at>\n  <length>13</length>\n  <text>  line one\n  </text>\n</note>";
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(body),
    ]));
    let service = create_test_service_with_transport(transport);

    let note = service.get("abc").await.unwrap();
    assert_eq!(note.summary.title, " Padded ");
    assert_eq!(note.text, "  line one\n  ");
    assert_eq!(note.text.chars().count() as u32, note.summary.length);
}
