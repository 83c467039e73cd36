//! Integration tests for the verdict library.
//!
//! Most tests drive the client against a local mock backend speaking the
//! VerdictAI wire contract. Tests marked as live require VERDICT_API_URL to
//! point at a running backend and skip themselves otherwise.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use verdict::chat::{ChatController, FALLBACK_ANSWER, GREETING, SubmitOutcome};
use verdict::types::{ChatRole, Credentials};
use verdict::{MemoryTokenStore, TokenStore, Verdict};

/// Builds an unsigned JWT with the given subject, expiring an hour from now.
fn fresh_token(sub: &str) -> String {
    let exp = time::OffsetDateTime::now_utc().unix_timestamp() + 3600;
    token_with_claims(&format!(r#"{{"sub":"{sub}","exp":{exp}}}"#))
}

fn token_with_claims(claims_json: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(claims_json.as_bytes());
    format!("{header}.{claims}.sig")
}

/// Serves the VerdictAI wire contract on an ephemeral port.
///
/// Routes on the request line only; each connection gets one response and
/// is closed.
async fn spawn_mock_backend(token: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let token = token.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let Ok(n) = socket.read(&mut buf).await else {
                    return;
                };
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let first_line = request.lines().next().unwrap_or("");
                let (status, body) = if first_line.starts_with("POST /token") {
                    (
                        "200 OK",
                        format!(r#"{{"access_token":"{token}","token_type":"bearer"}}"#),
                    )
                } else if first_line.starts_with("GET /verify-token/") {
                    ("200 OK", r#"{"message":"Token is valid"}"#.to_string())
                } else if first_line.starts_with("POST /register") {
                    ("200 OK", r#"{"username":"ada","id":1}"#.to_string())
                } else if first_line.starts_with("POST /ask") {
                    if request.to_ascii_lowercase().contains("authorization: bearer") {
                        ("200 OK", r#"{"answer":"A tort is a civil wrong."}"#.to_string())
                    } else {
                        (
                            "401 Unauthorized",
                            r#"{"detail":"Not authenticated"}"#.to_string(),
                        )
                    }
                } else {
                    ("404 Not Found", r#"{"detail":"Not Found"}"#.to_string())
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });
    format!("http://{}/", addr)
}

/// Serves the same fixed response to every request.
async fn spawn_error_backend(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                if socket.read(&mut buf).await.is_err() {
                    return;
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });
    format!("http://{}/", addr)
}

fn client_for(base_url: String, store: Arc<dyn TokenStore>) -> Verdict {
    Verdict::with_options(Some(base_url), Some(Duration::from_secs(5)), Some(store)).unwrap()
}

#[tokio::test]
async fn chat_flow_appends_greeting_question_and_answer() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    store.save(&fresh_token("ada"));
    let base_url = spawn_mock_backend(fresh_token("ada")).await;
    let client = client_for(base_url, store);

    let mut controller = ChatController::new(client);
    assert_eq!(controller.message_count(), 1);
    assert_eq!(controller.messages()[0].content, GREETING);

    let outcome = controller.send("What is a tort?").await;
    assert_eq!(outcome, SubmitOutcome::Answered);

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, ChatRole::Assistant);
    assert_eq!(messages[1].role, ChatRole::User);
    assert_eq!(messages[1].content, "What is a tort?");
    assert_eq!(messages[2].role, ChatRole::Assistant);
    assert_eq!(messages[2].content, "A tort is a civil wrong.");
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn ask_without_token_falls_back() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let base_url = spawn_mock_backend(fresh_token("ada")).await;
    let client = client_for(base_url, store);

    let mut controller = ChatController::new(client);
    let outcome = controller.send("What is a tort?").await;
    assert_eq!(outcome, SubmitOutcome::FellBack);

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].content, FALLBACK_ANSWER);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn sign_in_saves_token_and_derives_session() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let base_url = spawn_mock_backend(fresh_token("ada")).await;
    let client = client_for(base_url, store.clone());

    let session = client
        .sign_in(&Credentials::new("ada", "hunter2"))
        .await
        .unwrap();
    assert_eq!(session.username, "ada");
    assert!(store.get().is_some());

    let current = client.current_user().unwrap();
    assert_eq!(current.username, "ada");
}

#[tokio::test]
async fn register_surfaces_backend_payload() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let base_url = spawn_mock_backend(fresh_token("ada")).await;
    let client = client_for(base_url, store);

    let user = client
        .register(&Credentials::new("ada", "hunter2"))
        .await
        .unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.extra.get("id"), Some(&serde_json::json!(1)));
}

#[tokio::test]
async fn register_failure_surfaces_detail_text() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let base_url = spawn_error_backend(
        "400 Bad Request",
        r#"{"detail":"Username already registered"}"#,
    )
    .await;
    let client = client_for(base_url, store);

    let err = client
        .register(&Credentials::new("ada", "hunter2"))
        .await
        .unwrap_err();
    assert!(err.is_bad_request());
    assert!(err.to_string().contains("Username already registered"));
}

#[tokio::test]
async fn login_failure_surfaces_detail_text() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let base_url = spawn_error_backend(
        "401 Unauthorized",
        r#"{"detail":"Incorrect username or password"}"#,
    )
    .await;
    let client = client_for(base_url, store);

    let err = client
        .login(&Credentials::new("ada", "wrong"))
        .await
        .unwrap_err();
    assert!(err.is_authentication());
    assert!(err.to_string().contains("Incorrect username or password"));
}

#[tokio::test]
async fn empty_error_body_yields_generic_status_message() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let base_url = spawn_error_backend("503 Service Unavailable", "").await;
    let client = client_for(base_url, store);

    let err = client
        .register(&Credentials::new("ada", "hunter2"))
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    assert!(err.to_string().contains("status 503"));
}

#[tokio::test]
async fn expired_token_is_cleared_by_the_guard() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let exp = time::OffsetDateTime::now_utc().unix_timestamp() - 1;
    store.save(&token_with_claims(&format!(r#"{{"sub":"ada","exp":{exp}}}"#)));
    let base_url = spawn_mock_backend(fresh_token("ada")).await;
    let client = client_for(base_url, store.clone());

    // The guard treats the session as unauthenticated and clears storage.
    assert!(client.authenticated().is_none());
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn live_backend_round_trip() {
    // This test requires VERDICT_API_URL to point at a running backend.
    let base_url = std::env::var("VERDICT_API_URL").ok();
    if base_url.is_none() {
        eprintln!("Skipping test: VERDICT_API_URL not set");
        return;
    }

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = Verdict::with_options(base_url, None, Some(store)).expect("Failed to create client");

    let response = client.ask("What is a tort?").await;
    assert!(response.is_ok(), "ask should succeed against a live backend");
}
