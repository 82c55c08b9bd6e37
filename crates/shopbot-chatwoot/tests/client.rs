//! Integration tests for `ChatwootClient` using wiremock HTTP mocks.

use serde_json::json;
use shopbot_chatwoot::{ChatwootClient, ChatwootError, ReplySender};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ChatwootClient {
    ChatwootClient::new(base_url, "cw-token", 5, "shopbot-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn send_reply_posts_outgoing_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/3/conversations/12/messages"))
        .and(header("api_access_token", "cw-token"))
        .and(body_json(json!({
            "content": "Ja, Ripomed 250 ist verfügbar.",
            "message_type": "outgoing"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 991,
            "content": "Ja, Ripomed 250 ist verfügbar.",
            "message_type": 1,
            "conversation_id": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sent = test_client(&server.uri())
        .send_reply(3, 12, "Ja, Ripomed 250 ist verfügbar.")
        .await
        .expect("reply should be accepted");
    assert_eq!(sent.id, Some(991));
    assert_eq!(sent.conversation_id, Some(12));
}

#[tokio::test]
async fn send_reply_keeps_base_url_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chatwoot/api/v1/accounts/1/conversations/2/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let sender: Box<dyn ReplySender> =
        Box::new(test_client(&format!("{}/chatwoot/", server.uri())));
    sender.send_reply(1, 2, "Hallo").await.unwrap();
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/3/conversations/12/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "You need to sign in or sign up before continuing."
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .send_reply(3, 12, "Hallo")
        .await
        .unwrap_err();
    match err {
        ChatwootError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("sign in"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_success_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/accounts/3/conversations/12/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .send_reply(3, 12, "Hallo")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatwootError::Deserialize { .. }), "got: {err:?}");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ChatwootClient::new("app.chatwoot.com", "t", 5, "ua").unwrap_err();
    assert!(matches!(err, ChatwootError::InvalidBaseUrl { .. }));
}

#[test]
fn debug_redacts_access_token() {
    let client = test_client("https://app.chatwoot.com");
    assert!(!format!("{client:?}").contains("cw-token"));
}
