//! Request and response bodies of the authentication API.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const VERIFY_PATH: &str = "/api/auth/verify";

/// Body of both the login and the registration request.
///
/// Login sends the identifier (username or email) in the `email` field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginReply {
    pub message: String,
    pub token: String,
    #[serde(default, deserialize_with = "optional_user_id")]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterReply {
    pub message: String,
    #[serde(default, deserialize_with = "optional_user_id")]
    pub user_id: Option<String>,
}

/// Body of every non-success response. A server that omits `error` yields an
/// empty message.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorReply {
    #[serde(default)]
    pub error: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyReply {
    #[serde(deserialize_with = "user_id")]
    pub user_id: String,
}

/// Account ids come back as strings or as numbers depending on the backend.
fn user_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid user id: {}", other))),
    }
}

fn optional_user_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => user_id(v).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_reply_without_user_id() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"message":"ok","token":"abc"}"#).expect("parse");
        assert_eq!(reply.token, "abc");
        assert_eq!(reply.user_id, None);
    }

    #[test]
    fn numeric_user_ids_become_text() {
        let reply: RegisterReply =
            serde_json::from_str(r#"{"message":"created","user_id":7}"#).expect("parse");
        assert_eq!(reply.user_id.as_deref(), Some("7"));
        let reply: VerifyReply = serde_json::from_str(r#"{"user_id":"mock_id"}"#).expect("parse");
        assert_eq!(reply.user_id, "mock_id");
        assert!(serde_json::from_str::<VerifyReply>(r#"{"user_id":[1]}"#).is_err());
    }

    #[test]
    fn error_reply_tolerates_missing_field() {
        let reply: ErrorReply = serde_json::from_str("{}").expect("parse");
        assert_eq!(reply.error, "");
    }

    #[test]
    fn credentials_use_email_and_password_keys() {
        let body = CredentialsBody {
            email: "alice".into(),
            password: "pw".into(),
        };
        let v = serde_json::to_value(&body).expect("serialize");
        assert_eq!(v, serde_json::json!({"email": "alice", "password": "pw"}));
    }
}
