use super::*;
use crate::net::invalidation::InvalidationSignal;
use crate::net::types::User;
use crate::state::session::SessionStore;
use crate::util::credentials::ValidationError;
use futures::executor::block_on;
use std::sync::Mutex;

/// Accepts one fixed account and records which verbs ran.
struct OneAccount {
    calls: Mutex<Vec<&'static str>>,
}

impl OneAccount {
    fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()) }
    }

    fn user() -> User {
        User { user_id: 5, email: "a@x.com".to_owned(), created_at: None }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityClient for OneAccount {
    async fn register(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
        self.calls.lock().unwrap().push("register");
        Ok(Self::user())
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.calls.lock().unwrap().push("login");
        if email == "a@x.com" && password == "secret1" {
            Ok(Self::user())
        } else {
            Err(AuthError::Credential("Invalid credentials".to_owned()))
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn who_am_i(&self) -> Result<User, AuthError> {
        Ok(Self::user())
    }
}

fn credentials(password: &str) -> Credentials {
    Credentials { email: "a@x.com".to_owned(), password: password.to_owned() }
}

#[test]
fn submit_login_runs_login_only() {
    let signal = InvalidationSignal::new();
    let controller = SessionController::new(OneAccount::new(), SessionStore::new(), &signal);

    block_on(submit(&controller, AuthMode::Login, &credentials("secret1"))).unwrap();

    assert_eq!(*controller.client().calls.lock().unwrap(), vec!["login"]);
    assert_eq!(controller.store().snapshot().email(), Some("a@x.com"));
}

#[test]
fn submit_register_chains_login() {
    let signal = InvalidationSignal::new();
    let controller = SessionController::new(OneAccount::new(), SessionStore::new(), &signal);

    block_on(submit(&controller, AuthMode::Register, &credentials("secret1"))).unwrap();

    assert_eq!(*controller.client().calls.lock().unwrap(), vec!["register", "login"]);
}

#[test]
fn submit_surfaces_credential_failure() {
    let signal = InvalidationSignal::new();
    let controller = SessionController::new(OneAccount::new(), SessionStore::new(), &signal);

    let err = block_on(submit(&controller, AuthMode::Login, &credentials("wrong-one"))).unwrap_err();

    assert_eq!(failure_message(&err), "Invalid credentials");
}

#[test]
fn failure_message_per_kind() {
    assert_eq!(
        failure_message(&AuthError::Validation(ValidationError::MissingFields)),
        "Please fill in all fields"
    );
    assert_eq!(failure_message(&AuthError::Credential("Email already registered".into())), "Email already registered");
    assert_eq!(failure_message(&AuthError::Network("timeout".into())), GENERIC_FAILURE);
    assert_eq!(failure_message(&AuthError::Unauthenticated), GENERIC_FAILURE);
}

#[test]
fn copy_follows_mode() {
    assert_eq!(title(AuthMode::Login), "Welcome Back");
    assert_eq!(title(AuthMode::Register), "Create Account");
    assert_eq!(submit_label(AuthMode::Login, false), "Sign In");
    assert_eq!(submit_label(AuthMode::Register, false), "Create Account");
    assert_eq!(submit_label(AuthMode::Register, true), "Please wait...");
}
