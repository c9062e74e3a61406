use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use pokerroom::auth::{SESSION_TOKEN_KEY, USERNAME_KEY};
use pokerroom::platform::memory::{MemoryStore, RecordingPage};
use pokerroom::{AuthClient, AuthError, HttpTransport};

/// Request bodies seen by the mock API, tagged with their path.
type Seen = Arc<Mutex<Vec<(String, Value)>>>;

async fn login(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(("login".into(), body.clone()));
    if body["email"] == "alice" && body["password"] == "pw" {
        (StatusCode::OK, Json(json!({"message": "ok", "token": "abc", "user_id": 1})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        )
    }
}

async fn register(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(("register".into(), body.clone()));
    if body["email"] == "taken@x.io" {
        (StatusCode::BAD_REQUEST, Json(json!({"error": "email taken"})))
    } else {
        (
            StatusCode::CREATED,
            Json(json!({"message": "User registered successfully", "user_id": 7})),
        )
    }
}

async fn verify(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(("verify".into(), body.clone()));
    if body["token"] == "abc" {
        (StatusCode::OK, Json(json!({"user_id": "1"})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid token"})))
    }
}

/// Start the mock API on an OS-assigned port and return its base URL.
async fn spawn_api() -> Result<(String, Seen)> {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/verify", post(verify))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok((format!("http://127.0.0.1:{}", addr.port()), seen))
}

#[tokio::test]
async fn login_stores_session_and_goes_to_landing() -> Result<()> {
    let (base, seen) = spawn_api().await?;
    let mut client = AuthClient::new(
        HttpTransport::new(format!("{}/", base)),
        MemoryStore::new(),
        RecordingPage::new(),
    );

    let outcome = client.submit_login("alice", "pw").await?;

    assert!(outcome.is_accepted());
    assert_eq!(outcome.redirect(), "/main_page");
    assert_eq!(client.page().alerts, vec!["ok".to_string()]);
    assert_eq!(client.page().location(), Some("/main_page"));
    assert_eq!(client.store().get(SESSION_TOKEN_KEY), Some("abc"));
    assert_eq!(client.store().get(USERNAME_KEY), Some("alice"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "login");
    assert_eq!(seen[0].1, json!({"email": "alice", "password": "pw"}));
    Ok(())
}

#[tokio::test]
async fn rejected_login_stores_nothing() -> Result<()> {
    let (base, _seen) = spawn_api().await?;
    let mut client = AuthClient::new(
        HttpTransport::new(base),
        MemoryStore::new(),
        RecordingPage::new(),
    );

    let outcome = client.submit_login("alice", "wrong").await?;

    assert!(!outcome.is_accepted());
    assert_eq!(
        client.page().alerts,
        vec!["Invalid credentials başarısız giriş denemesi".to_string()]
    );
    assert_eq!(client.page().location(), Some("/"));
    assert!(client.store().writes.is_empty());
    Ok(())
}

#[tokio::test]
async fn taken_email_returns_to_register_page() -> Result<()> {
    let (base, seen) = spawn_api().await?;
    let mut client = AuthClient::new(
        HttpTransport::new(base),
        MemoryStore::new(),
        RecordingPage::new(),
    );

    let outcome = client.submit_register("taken@x.io", "pw").await?;
    assert!(!outcome.is_accepted());
    assert_eq!(client.page().alerts, vec!["email taken".to_string()]);
    assert_eq!(client.page().location(), Some("/register.html"));

    let outcome = client.submit_register("new@x.io", "pw").await?;
    assert!(outcome.is_accepted());
    assert_eq!(outcome.message(), "User registered successfully");
    assert_eq!(client.page().location(), Some("/"));
    assert!(client.store().writes.is_empty());

    assert_eq!(seen.lock().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn verify_uses_the_stored_token() -> Result<()> {
    let (base, seen) = spawn_api().await?;
    let mut client = AuthClient::new(
        HttpTransport::new(base),
        MemoryStore::new(),
        RecordingPage::new(),
    );

    assert_eq!(client.verify_session().await?, None);
    assert!(seen.lock().unwrap().is_empty());

    client.submit_login("alice", "pw").await?;
    assert_eq!(client.verify_session().await?, Some("1".to_string()));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last().map(|(p, b)| (p.as_str(), b.clone())), Some(("verify", json!({"token": "abc"}))));
    Ok(())
}

#[tokio::test]
async fn unreachable_api_alerts_and_stays_put() -> Result<()> {
    // Bind then drop so the port is very likely closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let mut client = AuthClient::new(
        HttpTransport::new(format!("http://127.0.0.1:{}", port)),
        MemoryStore::new(),
        RecordingPage::new(),
    );

    let err = client.submit_login("alice", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Transport(_)));
    assert_eq!(client.page().alerts.len(), 1);
    assert!(client.page().alerts[0].starts_with("Network error: "));
    assert_eq!(client.page().location(), None);
    assert!(client.store().writes.is_empty());
    Ok(())
}
