use kaiwa::core::transcript::Transcript;
use kaiwa::remote::{GeminiReplier, RemoteError, Replier};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates a simple test transcript with a user message
fn create_test_transcript() -> Transcript {
    let mut transcript = Transcript::new();
    transcript.push_user("Hello");
    transcript
}

fn reply_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            }
        }]
    })
}

// ============================================================================
// Gemini Replier Tests
// ============================================================================

#[tokio::test]
async fn test_gemini_successful_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Hi there")))
        .mount(&mock_server)
        .await;

    let replier = GeminiReplier::new("test-key".to_string(), Some(mock_server.uri()));
    let transcript = create_test_transcript();

    let result = replier.reply(&transcript, "gemini-test").await;

    assert_eq!(result.unwrap(), "Hi there");
}

#[tokio::test]
async fn test_gemini_request_carries_credential_and_history() {
    let mock_server = MockServer::start().await;

    // The full conversation is resent each round trip, in order, with the
    // assistant turns under the "model" role.
    let expected_body = serde_json::json!({
        "contents": [
            { "role": "user", "parts": [{ "text": "Hello" }] },
            { "role": "model", "parts": [{ "text": "Hi there" }] },
            { "role": "user", "parts": [{ "text": "How are you?" }] }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "secret-key"))
        .and(body_partial_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Fine, thanks")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut transcript = create_test_transcript();
    transcript.push_assistant("Hi there");
    transcript.push_user("How are you?");

    let replier = GeminiReplier::new("secret-key".to_string(), Some(mock_server.uri()));
    let result = replier.reply(&transcript, "gemini-test").await;

    assert_eq!(result.unwrap(), "Fine, thanks");
}

#[tokio::test]
async fn test_gemini_joins_multi_part_reply() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": "Hello " }, { "text": "world" }]
            }
        }]
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let replier = GeminiReplier::new("test-key".to_string(), Some(mock_server.uri()));
    let result = replier.reply(&create_test_transcript(), "gemini-test").await;

    assert_eq!(result.unwrap(), "Hello world");
}

#[tokio::test]
async fn test_gemini_api_error_preserves_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"error":{"code":429,"message":"quota exceeded"}}"#),
        )
        .mount(&mock_server)
        .await;

    let replier = GeminiReplier::new("test-key".to_string(), Some(mock_server.uri()));
    let result = replier.reply(&create_test_transcript(), "gemini-test").await;

    match result {
        Err(RemoteError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_server_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let replier = GeminiReplier::new("test-key".to_string(), Some(mock_server.uri()));
    let result = replier.reply(&create_test_transcript(), "gemini-test").await;

    assert!(matches!(result, Err(RemoteError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_gemini_undecodable_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let replier = GeminiReplier::new("test-key".to_string(), Some(mock_server.uri()));
    let result = replier.reply(&create_test_transcript(), "gemini-test").await;

    assert!(matches!(result, Err(RemoteError::Parse(_))));
}

#[tokio::test]
async fn test_gemini_empty_candidates_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let replier = GeminiReplier::new("test-key".to_string(), Some(mock_server.uri()));
    let result = replier.reply(&create_test_transcript(), "gemini-test").await;

    assert!(matches!(result, Err(RemoteError::Parse(_))));
}

#[tokio::test]
async fn test_gemini_network_error_when_server_unreachable() {
    // Nothing listens on this port; the connection is refused.
    let replier = GeminiReplier::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:1".to_string()),
    );
    let result = replier.reply(&create_test_transcript(), "gemini-test").await;

    assert!(matches!(result, Err(RemoteError::Network(_))));
}
