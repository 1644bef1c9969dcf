//! Caller-facing validation for the login/register form.
//!
//! Everything here runs before a request is made; a `ValidationError` never
//! reaches the network.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use crate::config::MIN_PASSWORD_LEN;

/// Which form the auth page is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Locally detected form problems.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Form input that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Check form input in display order: presence, confirmation, length.
///
/// `confirm` is only consulted in register mode. The email is trimmed; the
/// password is taken verbatim.
pub fn validate_credentials(
    mode: AuthMode,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if mode == AuthMode::Register && password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}
