use super::*;
use crate::net::types::User;
use crate::state::session::Readiness;
use crate::util::route_gate::{GateDecision, decide};
use async_trait::async_trait;
use futures::executor::block_on;
use std::sync::atomic::{AtomicBool, Ordering};

// =========================================================================
// FakeServer
// =========================================================================

/// In-memory identity service: accounts plus a single cookie-style session.
#[derive(Default)]
struct FakeServer {
    accounts: Mutex<Vec<User>>,
    passwords: Mutex<Vec<(String, String)>>,
    session: Mutex<Option<User>>,
    offline: AtomicBool,
    logout_fails: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeServer {
    fn with_account(email: &str, password: &str) -> Self {
        let server = Self::default();
        server.add_account(email, password);
        server
    }

    fn add_account(&self, email: &str, password: &str) -> User {
        let mut accounts = self.accounts.lock().unwrap();
        let user = User {
            user_id: i64::try_from(accounts.len()).unwrap() + 1,
            email: email.to_owned(),
            created_at: None,
        };
        accounts.push(user.clone());
        self.passwords.lock().unwrap().push((email.to_owned(), password.to_owned()));
        user
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Network("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl IdentityClient for FakeServer {
    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.record("register");
        self.check_online()?;
        if self.accounts.lock().unwrap().iter().any(|u| u.email == email) {
            return Err(AuthError::Credential("Email already registered".into()));
        }
        Ok(self.add_account(email, password))
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.record("login");
        self.check_online()?;
        let known = self
            .passwords
            .lock()
            .unwrap()
            .iter()
            .any(|(e, p)| e == email && p == password);
        if !known {
            return Err(AuthError::Credential("Invalid credentials".into()));
        }
        let user = self.accounts.lock().unwrap().iter().find(|u| u.email == email).cloned().unwrap();
        *self.session.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.record("logout");
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(AuthError::Network("timeout".into()));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn who_am_i(&self) -> Result<User, AuthError> {
        self.record("who_am_i");
        self.check_online()?;
        self.session.lock().unwrap().clone().ok_or(AuthError::Unauthenticated)
    }
}

fn controller(server: FakeServer) -> (SessionController<FakeServer>, InvalidationSignal) {
    let signal = InvalidationSignal::new();
    let controller = SessionController::new(server, SessionStore::new(), &signal);
    (controller, signal)
}

fn logged_in(email: &str, password: &str) -> (SessionController<FakeServer>, InvalidationSignal) {
    let (ctl, signal) = controller(FakeServer::with_account(email, password));
    block_on(ctl.login(email, password)).unwrap();
    (ctl, signal)
}

// =========================================================================
// reconcile
// =========================================================================

#[test]
fn reconcile_unauthenticated_settles_anonymous() {
    let (ctl, _signal) = controller(FakeServer::default());
    assert_eq!(ctl.store().snapshot().readiness, Readiness::Unknown);

    let state = block_on(ctl.reconcile());

    assert_eq!(state, SessionState { identity: None, readiness: Readiness::Settled });
    assert_eq!(ctl.store().snapshot(), state);
}

#[test]
fn reconcile_picks_up_existing_server_session() {
    let server = FakeServer::with_account("a@x.com", "secret1");
    *server.session.lock().unwrap() = server.accounts.lock().unwrap().first().cloned();
    let (ctl, _signal) = controller(server);

    let state = block_on(ctl.reconcile());

    assert_eq!(state.email(), Some("a@x.com"));
    assert!(state.is_settled());
}

#[test]
fn reconcile_network_failure_settles_anonymous() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");
    ctl.client().offline.store(true, Ordering::SeqCst);

    let state = block_on(ctl.reconcile());

    assert!(state.identity.is_none());
    assert!(state.is_settled());
}

#[test]
fn reconcile_is_idempotent() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");
    let first = block_on(ctl.reconcile());
    let second = block_on(ctl.reconcile());
    assert_eq!(first, second);
    assert_eq!(first.email(), Some("a@x.com"));
}

// =========================================================================
// login
// =========================================================================

#[test]
fn login_success_reconciles_through_who_am_i() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");

    let state = ctl.store().snapshot();
    assert_eq!(state.email(), Some("a@x.com"));
    assert_eq!(state.readiness, Readiness::Settled);
    assert_eq!(*ctl.client().calls.lock().unwrap(), vec!["login", "who_am_i"]);
}

#[test]
fn login_wrong_password_is_credential_failure_and_state_unchanged() {
    let (ctl, _signal) = controller(FakeServer::with_account("a@x.com", "secret1"));
    block_on(ctl.reconcile());
    let before = ctl.store().snapshot();

    let err = block_on(ctl.login("a@x.com", "wrong-pass")).unwrap_err();

    assert_eq!(err, AuthError::Credential("Invalid credentials".into()));
    assert_eq!(ctl.store().snapshot(), before);
}

#[test]
fn failed_login_while_logged_in_keeps_session() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");
    let before = ctl.store().snapshot();

    let err = block_on(ctl.login("a@x.com", "nope-nope")).unwrap_err();

    assert!(matches!(err, AuthError::Credential(_)));
    assert_eq!(ctl.store().snapshot(), before);
}

#[test]
fn login_network_failure_surfaces_without_mutation() {
    let (ctl, _signal) = controller(FakeServer::with_account("a@x.com", "secret1"));
    ctl.client().offline.store(true, Ordering::SeqCst);

    let err = block_on(ctl.login("a@x.com", "secret1")).unwrap_err();

    assert!(matches!(err, AuthError::Network(_)));
    assert_eq!(ctl.store().snapshot(), SessionState::default());
}

#[test]
fn login_with_blank_email_never_hits_network() {
    let (ctl, _signal) = controller(FakeServer::default());

    let err = block_on(ctl.login("   ", "secret1")).unwrap_err();

    assert_eq!(err, AuthError::Validation(ValidationError::MissingFields));
    assert!(ctl.client().calls.lock().unwrap().is_empty());
}

// =========================================================================
// register
// =========================================================================

#[test]
fn register_chains_into_login_and_reconcile() {
    let (ctl, _signal) = controller(FakeServer::default());

    block_on(ctl.register("new@x.com", "secret1")).unwrap();

    assert_eq!(ctl.store().snapshot().email(), Some("new@x.com"));
    assert_eq!(*ctl.client().calls.lock().unwrap(), vec!["register", "login", "who_am_i"]);
}

#[test]
fn register_yields_same_identity_as_login() {
    let (registered, _s1) = controller(FakeServer::default());
    block_on(registered.register("same@x.com", "secret1")).unwrap();

    let (logged, _s2) = logged_in("same@x.com", "secret1");

    assert_eq!(registered.store().snapshot(), logged.store().snapshot());
}

#[test]
fn register_rejection_is_hard_failure_without_login() {
    let (ctl, _signal) = controller(FakeServer::with_account("taken@x.com", "secret1"));

    let err = block_on(ctl.register("taken@x.com", "secret1")).unwrap_err();

    assert_eq!(err, AuthError::Credential("Email already registered".into()));
    assert_eq!(ctl.store().snapshot(), SessionState::default());
    assert_eq!(*ctl.client().calls.lock().unwrap(), vec!["register"]);
}

// =========================================================================
// logout
// =========================================================================

#[test]
fn logout_clears_identity() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");

    block_on(ctl.logout()).unwrap();

    let state = ctl.store().snapshot();
    assert!(state.identity.is_none());
    assert!(state.is_settled());
}

#[test]
fn logout_clears_identity_even_when_remote_fails() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");
    ctl.client().logout_fails.store(true, Ordering::SeqCst);

    let err = block_on(ctl.logout()).unwrap_err();

    assert!(matches!(err, AuthError::Network(_)));
    assert!(ctl.store().snapshot().identity.is_none());
}

// =========================================================================
// invalidation
// =========================================================================

#[test]
fn invalidation_clears_identity_and_keeps_readiness() {
    let (ctl, signal) = logged_in("a@x.com", "secret1");

    signal.raise();

    assert_eq!(ctl.store().snapshot(), SessionState { identity: None, readiness: Readiness::Settled });
}

#[test]
fn invalidation_is_idempotent() {
    let (ctl, signal) = logged_in("a@x.com", "secret1");
    signal.raise();
    signal.raise();
    assert!(ctl.store().snapshot().identity.is_none());
}

#[test]
fn invalidation_before_settle_leaves_readiness_unknown() {
    let (ctl, signal) = controller(FakeServer::default());
    signal.raise();
    assert_eq!(ctl.store().snapshot().readiness, Readiness::Unknown);
}

#[test]
fn login_after_invalidation_reestablishes_identity() {
    let (ctl, signal) = logged_in("a@x.com", "secret1");
    signal.raise();

    block_on(ctl.login("a@x.com", "secret1")).unwrap();

    assert_eq!(ctl.store().snapshot().email(), Some("a@x.com"));
}

#[test]
fn shutdown_stops_reacting_to_invalidation() {
    let (ctl, signal) = logged_in("a@x.com", "secret1");

    ctl.shutdown();
    ctl.shutdown();
    signal.raise();

    assert!(!ctl.is_listening());
    assert_eq!(signal.listener_count(), 0);
    assert_eq!(ctl.store().snapshot().email(), Some("a@x.com"));
}

#[test]
fn controller_clones_share_one_subscription() {
    let (ctl, signal) = controller(FakeServer::default());
    let other = ctl.clone();
    assert_eq!(signal.listener_count(), 1);

    other.shutdown();

    assert!(!ctl.is_listening());
    assert_eq!(signal.listener_count(), 0);
}

/// Identity client whose `who_am_i` gets invalidated while in flight.
struct RacingClient {
    signal: InvalidationSignal,
    user: User,
}

#[async_trait(?Send)]
impl IdentityClient for RacingClient {
    async fn register(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
        Ok(self.user.clone())
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
        Ok(self.user.clone())
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn who_am_i(&self) -> Result<User, AuthError> {
        self.signal.raise();
        Ok(self.user.clone())
    }
}

#[test]
fn last_writer_wins_when_invalidation_interleaves_with_login() {
    let signal = InvalidationSignal::new();
    let client = RacingClient {
        signal: signal.clone(),
        user: User { user_id: 9, email: "race@x.com".into(), created_at: None },
    };
    let ctl = SessionController::new(client, SessionStore::new(), &signal);

    block_on(ctl.login("race@x.com", "secret1")).unwrap();

    assert_eq!(ctl.store().snapshot().email(), Some("race@x.com"));
    signal.raise();
    assert!(ctl.store().snapshot().identity.is_none());
}

// =========================================================================
// end-to-end scenarios with the route gate
// =========================================================================

#[test]
fn scenario_fresh_load_unauthenticated_redirects_dashboard_to_login() {
    let (ctl, _signal) = controller(FakeServer::default());
    assert_eq!(decide(&ctl.store().snapshot(), "/dashboard"), GateDecision::Loading);

    block_on(ctl.reconcile());

    assert_eq!(decide(&ctl.store().snapshot(), "/dashboard"), GateDecision::RedirectToLogin);
}

#[test]
fn scenario_login_then_auth_page_redirects_home() {
    let (ctl, _signal) = logged_in("a@x.com", "secret1");

    let state = ctl.store().snapshot();
    assert_eq!(state.email(), Some("a@x.com"));
    assert_eq!(state.readiness, Readiness::Settled);
    assert_eq!(decide(&state, "/auth"), GateDecision::RedirectToHome);
}

#[test]
fn scenario_invalidation_demotes_protected_view() {
    let (ctl, signal) = logged_in("a@x.com", "secret1");
    assert_eq!(decide(&ctl.store().snapshot(), "/dashboard"), GateDecision::Render);

    signal.raise();

    assert_eq!(decide(&ctl.store().snapshot(), "/dashboard"), GateDecision::RedirectToLogin);
}

#[test]
fn scenario_wrong_password_keeps_prior_state() {
    let (ctl, _signal) = controller(FakeServer::with_account("a@x.com", "secret1"));
    block_on(ctl.reconcile());
    let before = ctl.store().snapshot();

    let result = block_on(ctl.login("a@x.com", "bad-secret"));

    assert!(matches!(result, Err(AuthError::Credential(_))));
    assert_eq!(ctl.store().snapshot(), before);
}

#[test]
fn invalidation_raised_from_a_subscriber_reaches_every_reader() {
    let (ctl, signal) = controller(FakeServer::with_account("a@x.com", "secret1"));
    let raiser = signal.clone();
    let _network = ctl.store().subscribe(move |state| {
        if state.identity.is_some() {
            raiser.raise();
        }
    });
    let mirror = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&mirror);
    let _view = ctl.store().subscribe(move |state| *sink.lock().unwrap() = Some(state.clone()));

    block_on(ctl.login("a@x.com", "secret1")).unwrap();

    let snapshot = ctl.store().snapshot();
    assert!(snapshot.identity.is_none());
    assert_eq!(mirror.lock().unwrap().as_ref(), Some(&snapshot));
    assert_eq!(decide(&snapshot, "/dashboard"), GateDecision::RedirectToLogin);
}
