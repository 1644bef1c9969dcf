//! Wire DTOs for the identity endpoints.
//!
//! DESIGN
//! ======
//! These mirror the analysis service's `/auth/*` JSON bodies. The session core
//! only ever stores a `User` it was handed; it never builds one itself.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user identifier.
    #[serde(rename = "id")]
    pub user_id: i64,
    pub email: String,
    /// ISO-8601 creation timestamp, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Request body for `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CredentialsPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response body for a successful login or registration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Error body shape: `detail` is either a message or a list of field errors.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: ErrorDetail,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct FieldError {
    pub msg: String,
}

impl ErrorDetail {
    /// First human-readable message in the detail, if any.
    pub(crate) fn message(&self) -> Option<String> {
        match self {
            Self::Message(msg) => Some(msg.clone()).filter(|m| !m.trim().is_empty()),
            Self::Fields(fields) => fields.iter().map(|f| f.msg.clone()).find(|m| !m.trim().is_empty()),
        }
    }
}
