//! Client configuration resolved at build time.
//!
//! A browser bundle has no process environment, so values come from
//! `option_env!` when the WASM artifact is compiled:
//!
//! - `ANALYZER_API_BASE`: API prefix, default `/api`
//! - `ANALYZER_TOKEN_KEY`: `localStorage` key for the bearer token,
//!   default `hybrid_analyzer_token`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "hybrid_analyzer_token";

/// Minimum password length enforced by the auth form.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API prefix without a trailing slash (may be an absolute URL).
    pub api_base: String,
    pub token_storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl ClientConfig {
    /// Build config from the variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("ANALYZER_API_BASE"), option_env!("ANALYZER_TOKEN_KEY"))
    }

    fn from_values(api_base: Option<&str>, token_key: Option<&str>) -> Self {
        let api_base = non_blank(api_base)
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_owned();
        let token_storage_key = non_blank(token_key).unwrap_or(DEFAULT_TOKEN_STORAGE_KEY).to_owned();
        Self { api_base, token_storage_key }
    }

    /// Join an endpoint path (leading `/`) onto the API base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
