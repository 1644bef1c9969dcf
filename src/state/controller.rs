//! Session controller: the only writer of `SessionStore`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call the verbs (`reconcile`, `login`, `register`, `logout`); the
//! controller talks to the identity service and commits the outcome. The
//! invalidation signal bypasses the verbs and clears the identity directly.
//!
//! DESIGN
//! ======
//! - Identity is always re-derived through `who_am_i` after a successful
//!   login; the user in the login response body is never stored.
//! - `register -> login -> reconcile` is a straight pipeline of awaited
//!   results; the first failure short-circuits and is returned as-is.
//! - Writes are whole-field replacements, so an invalidation that interleaves
//!   with an in-flight verb resolves as "last writer wins".

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::{Arc, Mutex, PoisonError};

use super::session::{SessionState, SessionStore};
use crate::net::identity::{AuthError, IdentityClient};
use crate::net::invalidation::InvalidationSignal;
use crate::util::credentials::ValidationError;
use crate::util::listeners::Subscription;

/// Drives session transitions against an identity client.
pub struct SessionController<C> {
    client: Arc<C>,
    store: SessionStore,
    invalidation: Arc<Mutex<Option<Subscription>>>,
}

impl<C> Clone for SessionController<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            store: self.store.clone(),
            invalidation: Arc::clone(&self.invalidation),
        }
    }
}

impl<C: IdentityClient> SessionController<C> {
    /// Create the controller and subscribe it to `signal` until `shutdown`.
    pub fn new(client: C, store: SessionStore, signal: &InvalidationSignal) -> Self {
        let demote = store.clone();
        let subscription = signal.on_invalidated(move || {
            log::info!("session: credential invalidated, clearing identity");
            demote.clear_identity();
        });
        Self {
            client: Arc::new(client),
            store,
            invalidation: Arc::new(Mutex::new(Some(subscription))),
        }
    }

    /// Read handle onto the state this controller writes.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Confirm the session with the server and settle the store.
    ///
    /// Any failure, including a network error, settles to unauthenticated.
    pub async fn reconcile(&self) -> SessionState {
        match self.client.who_am_i().await {
            Ok(user) => {
                log::debug!("session: reconciled as user {}", user.user_id);
                self.store.settle(Some(user));
            }
            Err(AuthError::Unauthenticated) => {
                log::debug!("session: reconciled as anonymous");
                self.store.settle(None);
            }
            Err(e) => {
                log::warn!("session: reconcile failed, treating as anonymous: {e}");
                self.store.settle(None);
            }
        }
        self.store.snapshot()
    }

    /// Exchange credentials, then reconcile.
    ///
    /// A rejected login leaves the current session untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }
        if let Err(e) = self.client.login(email, password).await {
            log::info!("session: login rejected: {e}");
            return Err(e);
        }
        let state = self.reconcile().await;
        if !state.is_authenticated() {
            log::warn!("session: login accepted but the server reports no session");
        }
        Ok(())
    }

    /// Create an account, then log in with the same credentials.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }
        if let Err(e) = self.client.register(email, password).await {
            log::info!("session: registration rejected: {e}");
            return Err(e);
        }
        self.login(email, password).await
    }

    /// Clear the identity locally, then tell the server.
    ///
    /// The local clear happens first and unconditionally; the returned result
    /// only reports whether the remote invalidation went through.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear_identity();
        let result = self.client.logout().await;
        if let Err(e) = &result {
            log::warn!("session: remote logout failed (local session already cleared): {e}");
        }
        result
    }

    /// Stop listening for invalidation signals. Idempotent.
    pub fn shutdown(&self) {
        let taken = self.invalidation.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(mut subscription) = taken {
            subscription.cancel();
            log::debug!("session: controller shut down");
        }
    }

    #[cfg(test)]
    pub fn is_listening(&self) -> bool {
        self.invalidation.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
