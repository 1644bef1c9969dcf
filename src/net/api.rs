//! HTTP implementation of the identity client.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`, bearer token kept in
//! `localStorage`. Native builds: every call fails with a network error since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses are mapped to `AuthError` from status + body. Only
//! 400/401/409/422 are credential rejections; any other status is a network
//! failure. A `401` on any request that is not a credential exchange clears
//! the stored token and raises the invalidation signal; a `401` from
//! `login`/`register` is just a rejected credential.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::identity::{AuthError, IdentityClient};
use super::invalidation::InvalidationSignal;
use super::types::User;
#[cfg(any(test, feature = "csr"))]
use super::types::ErrorBody;
use crate::config::ClientConfig;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const ME_PATH: &str = "/auth/me";

#[cfg(any(test, feature = "csr"))]
const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[cfg(any(test, feature = "csr"))]
const UNAUTHORIZED: u16 = 401;

#[cfg(any(test, feature = "csr"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a non-success response to a failure kind.
#[cfg(any(test, feature = "csr"))]
fn failure_from_response(status: u16, body: &str) -> AuthError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail.message());
    match status {
        400 | 401 | 409 | 422 => {
            AuthError::Credential(detail.unwrap_or_else(|| GENERIC_FAILURE.to_owned()))
        }
        _ => AuthError::Network(match detail {
            Some(detail) => format!("{detail} (status {status})"),
            None => format!("server responded with status {status}"),
        }),
    }
}

/// Whether a response status should demote the session.
#[cfg(any(test, feature = "csr"))]
fn signals_invalidation(status: u16, credential_exchange: bool) -> bool {
    status == UNAUTHORIZED && !credential_exchange
}

#[cfg(feature = "csr")]
fn network(e: impl std::fmt::Display) -> AuthError {
    AuthError::Network(e.to_string())
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> AuthError {
    AuthError::Network("not available outside the browser".to_owned())
}

/// Identity client backed by the analysis service's `/auth/*` endpoints.
#[derive(Clone, Debug)]
pub struct HttpIdentityClient {
    config: ClientConfig,
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    invalidation: InvalidationSignal,
}

impl HttpIdentityClient {
    pub fn new(config: ClientConfig, invalidation: InvalidationSignal) -> Self {
        Self { config, invalidation }
    }

    #[cfg(feature = "csr")]
    async fn exchange_credentials(&self, path: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let payload = super::types::CredentialsPayload { email, password };
        let resp = gloo_net::http::Request::post(&self.config.endpoint(path))
            .json(&payload)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(failure_from_response(status, &body));
        }
        let body: super::types::AuthResponse = resp.json().await.map_err(network)?;
        token::store(&self.config.token_storage_key, &body.access_token);
        Ok(body.user)
    }

    /// Handle a `401` on an authenticated request.
    #[cfg(feature = "csr")]
    fn reject_credential(&self) {
        log::info!("auth: credential rejected by server");
        token::clear(&self.config.token_storage_key);
        self.invalidation.raise();
    }

    #[cfg(feature = "csr")]
    fn authorized(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match token::load(&self.config.token_storage_key) {
            Some(token) => builder.header("Authorization", &bearer_header(&token)),
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl IdentityClient for HttpIdentityClient {
    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        #[cfg(feature = "csr")]
        {
            self.exchange_credentials(REGISTER_PATH, email, password).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(unavailable())
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        #[cfg(feature = "csr")]
        {
            self.exchange_credentials(LOGIN_PATH, email, password).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(unavailable())
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let builder = self.authorized(gloo_net::http::Request::post(&self.config.endpoint(LOGOUT_PATH)));
            token::clear(&self.config.token_storage_key);
            let resp = builder.send().await.map_err(network)?;
            if resp.ok() {
                return Ok(());
            }
            let status = resp.status();
            if signals_invalidation(status, false) {
                self.invalidation.raise();
            }
            let body = resp.text().await.unwrap_or_default();
            Err(failure_from_response(status, &body))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(unavailable())
        }
    }

    async fn who_am_i(&self) -> Result<User, AuthError> {
        #[cfg(feature = "csr")]
        {
            let builder = self.authorized(gloo_net::http::Request::get(&self.config.endpoint(ME_PATH)));
            let resp = builder.send().await.map_err(network)?;
            let status = resp.status();
            if signals_invalidation(status, false) {
                self.reject_credential();
                return Err(AuthError::Unauthenticated);
            }
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(failure_from_response(status, &body));
            }
            resp.json::<User>().await.map_err(network)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(unavailable())
        }
    }
}

/// Bearer token persistence in `localStorage`. Best-effort: storage errors
/// degrade to "no token".
#[cfg(feature = "csr")]
mod token {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub(super) fn load(key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten().filter(|t| !t.is_empty())
    }

    pub(super) fn store(key: &str, token: &str) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(key, token);
        }
    }

    pub(super) fn clear(key: &str) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
}
