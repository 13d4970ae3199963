//! Streaming availability client tests

use mockito::{Matcher, Server};
use cinelist::api::streaming::{unconfigured_message, NOT_FOUND_MESSAGE, STREAMING_API_HOST};
use cinelist::api::{StreamingClient, StreamingError};

fn client(server: &Server, region: &str) -> StreamingClient {
    StreamingClient::with_base_url(Some("stream-key".to_string()), region, server.url())
}

#[tokio::test]
async fn test_availability_summary() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0468569")
        .match_query(Matcher::UrlEncoded("country".into(), "in".into()))
        .match_header("x-rapidapi-key", "stream-key")
        .match_header("x-rapidapi-host", STREAMING_API_HOST)
        .with_status(200)
        .with_body(
            r#"{
                "title": "The Dark Knight",
                "streamingOptions": {
                    "in": [
                        {"service": {"id": "netflix"}, "type": "subscription"},
                        {"service": {"id": "prime"}, "type": "rent"},
                        {"service": {"id": "prime"}, "type": "buy"}
                    ],
                    "us": [
                        {"service": {"id": "max"}, "type": "subscription"}
                    ]
                }
            }"#,
        )
        .create_async()
        .await;

    let text = client(&server, "in")
        .fetch_availability("tt0468569")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Available in (IN): Netflix, Prime (buy), Prime (rent)");
}

#[tokio::test]
async fn test_region_used_for_request_and_lookup() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0468569")
        .match_query(Matcher::UrlEncoded("country".into(), "us".into()))
        .with_status(200)
        .with_body(
            r#"{"streamingOptions": {
                "in": [{"service": {"id": "netflix"}, "type": "subscription"}],
                "us": [{"service": {"id": "max"}, "type": "subscription"}]
            }}"#,
        )
        .create_async()
        .await;

    let text = client(&server, "US")
        .fetch_availability("tt0468569")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Available in (US): Max");
}

#[tokio::test]
async fn test_nested_result_shape() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0113277")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"result": {"streamingOptions": {
                "in": [{"service": {"id": "apple"}, "type": "rent"}]
            }}}"#,
        )
        .create_async()
        .await;

    let text = client(&server, "in")
        .fetch_availability("tt0113277")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Available in (IN): Apple (rent)");
}

#[tokio::test]
async fn test_region_missing_from_payload() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0113277")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"streamingOptions": {"us": []}}"#)
        .create_async()
        .await;

    let text = client(&server, "in")
        .fetch_availability("tt0113277")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Available in (IN): None found in IN.");
}

#[tokio::test]
async fn test_unrecognized_shape() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0113277")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"something": "else"}"#)
        .create_async()
        .await;

    let text = client(&server, "in")
        .fetch_availability("tt0113277")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        text,
        "Available in (IN): Streaming data structure not recognized."
    );
}

#[tokio::test]
async fn test_not_found_is_informational() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt9999999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "not found"}"#)
        .create_async()
        .await;

    let text = client(&server, "in")
        .fetch_availability("tt9999999")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_unconfigured_makes_no_request() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = StreamingClient::with_base_url(None, "in", server.url());
    let text = client.fetch_availability("tt0468569").await.unwrap();

    mock.assert_async().await;
    assert_eq!(text, unconfigured_message());
    assert!(text.contains(STREAMING_API_HOST));
}

#[tokio::test]
async fn test_server_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0468569")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let err = client(&server, "in")
        .fetch_availability("tt0468569")
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        StreamingError::Status { status, excerpt } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(excerpt, "Internal Server Error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0468569")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client(&server, "in")
        .fetch_availability("tt0468569")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, StreamingError::Parse(_)));
}

#[tokio::test]
async fn test_missing_title_id() {
    let client = StreamingClient::with_base_url(Some("k".to_string()), "in", "http://127.0.0.1:1");
    let err = client.fetch_availability("").await.unwrap_err();
    assert!(matches!(err, StreamingError::MissingTitleId));
}

#[tokio::test]
async fn test_connection_refused() {
    let client =
        StreamingClient::with_base_url(Some("k".to_string()), "in", "http://127.0.0.1:1");
    let err = client.fetch_availability("tt0468569").await.unwrap_err();
    assert!(matches!(err, StreamingError::Transport(_)));
    assert!(err.to_string().starts_with("Connection error (streaming)"));
}

#[tokio::test]
async fn test_region_is_encoded() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/shows/tt0468569")
        .match_query(Matcher::UrlEncoded("country".into(), "us&x=1".into()))
        .with_status(200)
        .with_body(r#"{"streamingOptions": {}}"#)
        .create_async()
        .await;

    let text = client(&server, "us&x=1")
        .fetch_availability("tt0468569")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Available in (US&X=1): None found in US&X=1.");
}
