//! Identity-service seam consumed by the session controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! `HttpIdentityClient` is the browser implementation; tests substitute a
//! scripted client. The trait is `?Send` because browser futures are not.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an `AuthError` so pages can render a message without
//! inspecting session internals.

use async_trait::async_trait;

use super::types::User;
use crate::util::credentials::ValidationError;

/// Failure kinds surfaced by identity operations and session verbs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Input rejected locally before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server rejected the email/password pair or the registration.
    #[error("{0}")]
    Credential(String),

    /// Transport failure or an unexpected server response.
    #[error("network error: {0}")]
    Network(String),

    /// The request succeeded but no valid session exists.
    #[error("not authenticated")]
    Unauthenticated,
}

/// Remote identity operations.
#[async_trait(?Send)]
pub trait IdentityClient {
    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Best-effort remote credential invalidation.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Ask the server who the current credential belongs to.
    async fn who_am_i(&self) -> Result<User, AuthError>;
}
