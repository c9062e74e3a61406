//! HTTP transport used by [`AuthClient`](super::AuthClient).

use async_trait::async_trait;

use crate::error::AuthError;

/// Raw reply of the authentication API: status code and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body to an API path and returns whatever came back.
///
/// Implementations only fail with [`AuthError::Transport`], when no HTTP
/// response arrived. Status codes are reported, not interpreted.
#[async_trait(?Send)]
pub trait AuthTransport {
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply, AuthError>;
}

/// `reqwest` transport against an API base URL such as `http://localhost:5000`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait(?Send)]
impl AuthTransport for HttpTransport {
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply, AuthError> {
        let url = self.url(path);
        tracing::debug!(%url, "auth request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}
