//! Integration tests for TagsService.

use pinboard::config::PinboardConfig;
use pinboard::error::{ErrorKind, PinboardError, TransportError, ValidationError};
use pinboard::mocks::{MockResponse, MockTransport, TestFixtures};
use pinboard::services::TagsService;
use std::sync::Arc;

fn create_test_service_with_transport(transport: Arc<MockTransport>) -> TagsService {
    let config = Arc::new(TestFixtures::config().unwrap());
    TagsService::new(config, transport)
}

#[tokio::test]
async fn test_get_tags() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::tags_xml()),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    let tags = service.get().await.unwrap();

    assert_eq!(tags.len(), 3);
    assert_eq!(tags["tag1"], 3);
    assert_eq!(tags["tag2"], 1);
    assert_eq!(tags["tag3"], 2);

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "GET");
    assert!(request.url.starts_with("https://api.pinboard.in/v1/tags/get?"));
    assert_eq!(
        request.query_param("auth_token").as_deref(),
        Some(TestFixtures::AUTH_TOKEN)
    );
}

#[tokio::test]
async fn test_get_tags_empty_listing() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body("<tags></tags>"),
    ]));
    let service = create_test_service_with_transport(transport);

    assert!(service.get().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_tag() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::done_xml()),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    service.delete("tag1").await.unwrap();

    let request = transport.last_request().unwrap();
    assert!(request.url.contains("/v1/tags/delete?"));
    assert_eq!(request.query_param("tag").as_deref(), Some("tag1"));
}

#[tokio::test]
async fn test_delete_tag_text_acknowledgment() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body("<result>done</result>"),
    ]));
    let service = create_test_service_with_transport(transport);

    assert!(service.delete("tag1").await.is_ok());
}

#[tokio::test]
async fn test_rename_tag() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::done_xml()),
    ]));
    let service = create_test_service_with_transport(transport.clone());

    service.rename("tag1", "tag4").await.unwrap();

    let request = transport.last_request().unwrap();
    assert!(request.url.contains("/v1/tags/rename?"));
    assert_eq!(request.query_param("old").as_deref(), Some("tag1"));
    assert_eq!(request.query_param("new").as_deref(), Some("tag4"));
    assert!(request.query_param("auth_token").is_some());
}

#[tokio::test]
async fn test_rename_tag_service_error() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::error_xml("tag not found")),
    ]));
    let service = create_test_service_with_transport(transport);

    let err = service.rename("missing", "other").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "tag not found");
}

#[tokio::test]
async fn test_blank_arguments_make_no_request() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok_with_body(
        TestFixtures::done_xml(),
    )));
    let service = create_test_service_with_transport(transport.clone());

    let err = service.delete("  ").await.unwrap_err();
    assert!(matches!(
        err,
        PinboardError::Validation(ValidationError::MissingArgument { name: "tag" })
    ));

    let err = service.rename("", "new").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = service.rename("old", "two words").await.unwrap_err();
    assert!(matches!(
        err,
        PinboardError::Validation(ValidationError::InvalidTag { .. })
    ));

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_get_tags_server_error() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::error(
        500,
        "<html>oops</html>",
    )]));
    let service = create_test_service_with_transport(transport);

    let err = service.get().await.unwrap_err();
    assert!(matches!(
        err,
        PinboardError::Transport(TransportError::HttpStatus { status: 500, .. })
    ));
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_get_tags_custom_base_url() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::tags_xml()),
    ]));
    let config = PinboardConfig::builder()
        .auth_token(TestFixtures::AUTH_TOKEN)
        .base_url("http://localhost:8080/api/v1")
        .build()
        .unwrap();
    let service = TagsService::new(Arc::new(config), transport.clone());

    service.get().await.unwrap();

    let request = transport.last_request().unwrap();
    assert!(request.url.starts_with("http://localhost:8080/api/v1/tags/get?"));
}
