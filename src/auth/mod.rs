//! Login and registration against the authentication API.
//!
//! Each operation issues exactly one request, shows the server's text to the
//! user through the [`Page`] and then navigates according to the outcome. Any
//! non-success status is handled the same way: the message shown is the
//! server's `error` field, verbatim.

pub mod transport;

use serde::de::DeserializeOwned;

use pokerroom_shared::{
    CredentialsBody, ErrorReply, LoginReply, RegisterReply, VerifyReply, VerifyRequest,
    LOGIN_PATH, REGISTER_PATH, VERIFY_PATH,
};

use crate::error::AuthError;
use crate::platform::{Page, SessionStore};
pub use transport::{AuthTransport, HttpReply, HttpTransport};

/// Session store key of the token returned by a successful login.
pub const SESSION_TOKEN_KEY: &str = "token";
/// Session store key of the identifier used for a successful login.
pub const USERNAME_KEY: &str = "username";
/// Appended to the server error after a rejected login ("failed login attempt").
pub const FAILED_LOGIN_SUFFIX: &str = " başarısız giriş denemesi";

/// Pages the client navigates to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routes {
    /// After a successful login.
    pub landing: String,
    /// After a rejected login.
    pub entry: String,
    /// After a successful registration.
    pub login: String,
    /// After a rejected registration.
    pub register: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            landing: "/main_page".into(),
            entry: "/".into(),
            login: "/".into(),
            register: "/register.html".into(),
        }
    }
}

/// What the server decided, and where the page went because of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted { message: String, redirect: String },
    Rejected { message: String, redirect: String },
}

impl AuthOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AuthOutcome::Accepted { .. })
    }

    /// Text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            AuthOutcome::Accepted { message, .. } | AuthOutcome::Rejected { message, .. } => {
                message
            }
        }
    }

    pub fn redirect(&self) -> &str {
        match self {
            AuthOutcome::Accepted { redirect, .. } | AuthOutcome::Rejected { redirect, .. } => {
                redirect
            }
        }
    }
}

pub struct AuthClient<T, S, P> {
    transport: T,
    store: S,
    page: P,
    routes: Routes,
}

impl<T, S, P> AuthClient<T, S, P>
where
    T: AuthTransport,
    S: SessionStore,
    P: Page,
{
    pub fn new(transport: T, store: S, page: P) -> Self {
        Self {
            transport,
            store,
            page,
            routes: Routes::default(),
        }
    }

    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_parts(self) -> (T, S, P) {
        (self.transport, self.store, self.page)
    }

    /// Log in with a username or email.
    ///
    /// On success the token and the identifier are written to the session
    /// store before the message is shown and the page moves to the landing
    /// page. A failed write is returned without alerting or navigating; the
    /// token may already be stored at that point.
    pub async fn submit_login(
        &mut self,
        identifier: &str,
        secret: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let body = credentials(identifier, secret)?;
        let reply = self.post(LOGIN_PATH, &body).await?;

        if reply.is_success() {
            let accepted: LoginReply = decode(&reply)?;
            tracing::info!(identifier, "login accepted");
            self.store.set_item(SESSION_TOKEN_KEY, &accepted.token)?;
            self.store.set_item(USERNAME_KEY, identifier)?;
            self.page.alert(&accepted.message);
            let redirect = self.routes.landing.clone();
            self.page.navigate(&redirect);
            Ok(AuthOutcome::Accepted {
                message: accepted.message,
                redirect,
            })
        } else {
            let rejected: ErrorReply = decode(&reply)?;
            tracing::warn!(identifier, status = reply.status, error = %rejected.error, "login rejected");
            let message = format!("{}{}", rejected.error, FAILED_LOGIN_SUFFIX);
            let redirect = self.routes.entry.clone();
            Ok(self.reject(message, redirect))
        }
    }

    /// Create an account. Nothing is stored, the user still has to log in.
    pub async fn submit_register(
        &mut self,
        email: &str,
        secret: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let body = credentials(email, secret)?;
        let reply = self.post(REGISTER_PATH, &body).await?;

        if reply.is_success() {
            let accepted: RegisterReply = decode(&reply)?;
            tracing::info!(email, user_id = ?accepted.user_id, "registration accepted");
            self.page.alert(&accepted.message);
            let redirect = self.routes.login.clone();
            self.page.navigate(&redirect);
            Ok(AuthOutcome::Accepted {
                message: accepted.message,
                redirect,
            })
        } else {
            let rejected: ErrorReply = decode(&reply)?;
            tracing::warn!(email, status = reply.status, error = %rejected.error, "registration rejected");
            let redirect = self.routes.register.clone();
            Ok(self.reject(rejected.error, redirect))
        }
    }

    /// Ask the server whether the stored token is still valid.
    ///
    /// Returns the user id the token belongs to, or `None` when no token is
    /// stored or the server refuses it. Never alerts or navigates.
    pub async fn verify_session(&mut self) -> Result<Option<String>, AuthError> {
        let Some(token) = self.store.get_item(SESSION_TOKEN_KEY)? else {
            tracing::debug!("no session token stored");
            return Ok(None);
        };
        let body = serde_json::to_value(VerifyRequest { token })?;
        let reply = self.transport.post_json(VERIFY_PATH, &body).await?;

        if reply.is_success() {
            let verified: VerifyReply = decode(&reply)?;
            tracing::info!(user_id = %verified.user_id, "session token valid");
            Ok(Some(verified.user_id))
        } else {
            let rejected: ErrorReply = decode(&reply)?;
            tracing::info!(status = reply.status, error = %rejected.error, "session token refused");
            Ok(None)
        }
    }

    /// Send the request. A missing response is shown to the user but leaves
    /// the page where it is.
    async fn post(&mut self, path: &str, body: &serde_json::Value) -> Result<HttpReply, AuthError> {
        match self.transport.post_json(path, body).await {
            Ok(reply) => Ok(reply),
            Err(AuthError::Transport(detail)) => {
                tracing::error!(path, error = %detail, "auth request failed");
                self.page.alert(&format!("Network error: {}", detail));
                Err(AuthError::Transport(detail))
            }
            Err(other) => Err(other),
        }
    }

    fn reject(&mut self, message: String, redirect: String) -> AuthOutcome {
        self.page.alert(&message);
        self.page.navigate(&redirect);
        AuthOutcome::Rejected { message, redirect }
    }
}

fn credentials(email: &str, password: &str) -> Result<serde_json::Value, AuthError> {
    let body = CredentialsBody {
        email: email.to_string(),
        password: password.to_string(),
    };
    Ok(serde_json::to_value(body)?)
}

fn decode<R: DeserializeOwned>(reply: &HttpReply) -> Result<R, AuthError> {
    serde_json::from_str(&reply.body).map_err(|e| AuthError::Decode {
        status: reply.status,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::*;
    use crate::error::StorageError;
    use crate::platform::memory::{MemoryStore, RecordingPage};

    /// Replies from a script, in order, and remembers every request.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<HttpReply, AuthError>>>,
        requests: RefCell<Vec<(String, serde_json::Value)>>,
    }

    impl ScriptedTransport {
        fn replying(status: u16, body: serde_json::Value) -> Self {
            let t = Self::default();
            t.push(Ok(HttpReply {
                status,
                body: body.to_string(),
            }));
            t
        }

        fn push(&self, reply: Result<HttpReply, AuthError>) {
            self.replies.borrow_mut().push_back(reply);
        }
    }

    #[async_trait(?Send)]
    impl AuthTransport for ScriptedTransport {
        async fn post_json(
            &self,
            path: &str,
            body: &serde_json::Value,
        ) -> Result<HttpReply, AuthError> {
            self.requests
                .borrow_mut()
                .push((path.to_string(), body.clone()));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AuthError::Transport("no scripted reply".into())))
        }
    }

    type TestClient = AuthClient<ScriptedTransport, MemoryStore, RecordingPage>;

    fn client(transport: ScriptedTransport) -> TestClient {
        AuthClient::new(transport, MemoryStore::new(), RecordingPage::new())
    }

    #[tokio::test]
    async fn login_success_stores_session_and_lands() {
        let mut c = client(ScriptedTransport::replying(
            200,
            serde_json::json!({"message": "ok", "token": "abc"}),
        ));

        let outcome = c.submit_login("alice", "pw").await.expect("login");

        assert!(outcome.is_accepted());
        assert_eq!(c.store().get(SESSION_TOKEN_KEY), Some("abc"));
        assert_eq!(c.store().get(USERNAME_KEY), Some("alice"));
        assert_eq!(c.store().writes.len(), 2);
        assert_eq!(c.page().alerts, vec!["ok".to_string()]);
        assert_eq!(c.page().navigations, vec!["/main_page".to_string()]);
    }

    #[tokio::test]
    async fn login_sends_identifier_as_email() {
        let mut c = client(ScriptedTransport::replying(
            200,
            serde_json::json!({"message": "ok", "token": "abc"}),
        ));
        c.submit_login("alice", "secret").await.expect("login");

        let (transport, _, _) = c.into_parts();
        let requests = transport.requests.into_inner();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, LOGIN_PATH);
        assert_eq!(
            requests[0].1,
            serde_json::json!({"email": "alice", "password": "secret"})
        );
    }

    #[tokio::test]
    async fn login_rejection_appends_suffix_and_returns_to_entry() {
        let mut c = client(ScriptedTransport::replying(
            401,
            serde_json::json!({"error": "Invalid password."}),
        ));

        let outcome = c.submit_login("alice", "bad").await.expect("login");

        assert_eq!(
            outcome,
            AuthOutcome::Rejected {
                message: "Invalid password. başarısız giriş denemesi".into(),
                redirect: "/".into(),
            }
        );
        assert_eq!(c.page().alerts, vec![outcome.message().to_string()]);
        assert_eq!(c.page().location(), Some("/"));
        assert!(c.store().writes.is_empty());
    }

    #[tokio::test]
    async fn every_failure_status_is_treated_alike() {
        for status in [400u16, 403, 409, 500, 503] {
            let mut c = client(ScriptedTransport::replying(
                status,
                serde_json::json!({"error": "nope"}),
            ));
            let outcome = c.submit_register("a@b.c", "pw").await.expect("register");
            assert_eq!(outcome.message(), "nope");
            assert_eq!(outcome.redirect(), "/register.html");
        }
    }

    #[tokio::test]
    async fn register_success_goes_to_login_without_storing() {
        let mut c = client(ScriptedTransport::replying(
            200,
            serde_json::json!({"user_id": "mock_id", "message": "User registered successfully."}),
        ));

        let outcome = c.submit_register("a@b.c", "pw").await.expect("register");

        assert!(outcome.is_accepted());
        assert_eq!(c.page().alerts, vec!["User registered successfully.".to_string()]);
        assert_eq!(c.page().location(), Some("/"));
        assert!(c.store().writes.is_empty());
    }

    #[tokio::test]
    async fn register_conflict_shows_error_verbatim() {
        let mut c = client(ScriptedTransport::replying(
            400,
            serde_json::json!({"error": "email taken"}),
        ));

        c.submit_register("a@b.c", "pw").await.expect("register");

        assert_eq!(c.page().alerts, vec!["email taken".to_string()]);
        assert_eq!(c.page().navigations, vec!["/register.html".to_string()]);
    }

    #[tokio::test]
    async fn network_failure_alerts_and_stays() {
        let t = ScriptedTransport::default();
        t.push(Err(AuthError::Transport("connection refused".into())));
        let mut c = client(t);

        let err = c.submit_login("alice", "pw").await.unwrap_err();

        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(
            c.page().alerts,
            vec!["Network error: connection refused".to_string()]
        );
        assert!(c.page().navigations.is_empty());
        assert!(c.store().writes.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let t = ScriptedTransport::default();
        t.push(Ok(HttpReply {
            status: 502,
            body: "<html>bad gateway</html>".into(),
        }));
        let mut c = client(t);

        let err = c.submit_register("a@b.c", "pw").await.unwrap_err();

        assert!(matches!(err, AuthError::Decode { status: 502, .. }));
        assert!(c.page().alerts.is_empty());
        assert!(c.page().navigations.is_empty());
    }

    #[tokio::test]
    async fn custom_routes_are_honoured() {
        let mut c = client(ScriptedTransport::replying(
            200,
            serde_json::json!({"message": "ok", "token": "t"}),
        ))
        .with_routes(Routes {
            landing: "/lobby".into(),
            ..Routes::default()
        });

        let outcome = c.submit_login("bob", "pw").await.expect("login");
        assert_eq!(outcome.redirect(), "/lobby");
    }

    #[tokio::test]
    async fn verify_without_token_skips_the_request() {
        let mut c = client(ScriptedTransport::default());
        assert_eq!(c.verify_session().await.expect("verify"), None);
        let (transport, _, _) = c.into_parts();
        assert!(transport.requests.into_inner().is_empty());
    }

    #[tokio::test]
    async fn verify_sends_stored_token() {
        let t = ScriptedTransport::default();
        t.push(Ok(HttpReply {
            status: 200,
            body: r#"{"message":"ok","token":"abc"}"#.into(),
        }));
        t.push(Ok(HttpReply {
            status: 200,
            body: r#"{"user_id":"mock_id"}"#.into(),
        }));
        let mut c = client(t);
        c.submit_login("alice", "pw").await.expect("login");

        let user = c.verify_session().await.expect("verify");

        assert_eq!(user.as_deref(), Some("mock_id"));
        assert_eq!(c.page().alerts.len(), 1);
        let (transport, _, _) = c.into_parts();
        let requests = transport.requests.into_inner();
        assert_eq!(requests[1].0, VERIFY_PATH);
        assert_eq!(requests[1].1, serde_json::json!({"token": "abc"}));
    }

    /// Accepts the first `allowed` writes, then fails.
    struct FlakyStore {
        inner: MemoryStore,
        allowed: usize,
    }

    impl SessionStore for FlakyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.inner.writes.len() >= self.allowed {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.set_item(key, value)
        }
    }

    #[tokio::test]
    async fn failed_session_write_shows_nothing() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            allowed: 1,
        };
        let mut c = AuthClient::new(
            ScriptedTransport::replying(200, serde_json::json!({"message": "ok", "token": "abc"})),
            store,
            RecordingPage::new(),
        );

        let err = c.submit_login("alice", "pw").await.unwrap_err();

        assert!(matches!(err, AuthError::Storage(StorageError::Unavailable(_))));
        assert!(c.page().alerts.is_empty());
        assert!(c.page().navigations.is_empty());
        assert_eq!(c.store().inner.get(SESSION_TOKEN_KEY), Some("abc"));
        assert_eq!(c.store().inner.get(USERNAME_KEY), None);
    }

    #[tokio::test]
    async fn verify_refused_token() {
        let t = ScriptedTransport::default();
        t.push(Ok(HttpReply {
            status: 401,
            body: r#"{"error":"Token expired."}"#.into(),
        }));
        let mut store = MemoryStore::new();
        store.set_item(SESSION_TOKEN_KEY, "old").expect("store");
        let mut c = AuthClient::new(t, store, RecordingPage::new());

        assert_eq!(c.verify_session().await.expect("verify"), None);
        assert!(c.page().alerts.is_empty());
    }
}
