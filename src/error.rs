//! Error types of the client library.

use thiserror::Error;

/// Failures of an authentication call that never produced a usable reply.
///
/// A non-success HTTP status is not an error: it is an
/// [`AuthOutcome::Rejected`](crate::auth::AuthOutcome::Rejected).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request did not get an HTTP response at all.
    #[error("network error: {0}")]
    Transport(String),
    /// The response body was not the JSON the endpoint documents.
    #[error("unexpected response body (status {status}): {reason}")]
    Decode { status: u16, reason: String },
    #[error("encoding request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("reading session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing session file: {0}")]
    Parse(String),
    #[error("serializing session file: {0}")]
    Serialize(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid channel url '{url}': {reason}")]
    Url { url: String, reason: String },
    #[error("connecting to {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("channel socket error: {0}")]
    Socket(String),
    #[error("encoding client event: {0}")]
    Encode(#[from] serde_json::Error),
}
