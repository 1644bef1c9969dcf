//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the single source of truth for "is someone logged in".
//! The route gate and every identity-aware component read it; only the
//! session controller writes it. The app mirrors it into an
//! `RwSignal<SessionState>` so views re-render on change.
//!
//! INVARIANTS
//! ==========
//! - Starts as `{ identity: None, readiness: Unknown }`.
//! - `readiness` only moves `Unknown -> Settled`, never back.
//! - Subscribers hear about a write only when the value changed.
//! - A subscriber's last delivered state is always the latest committed one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::User;
use crate::util::listeners::{Listeners, Subscription};

/// Whether a reconciliation with the server has completed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Readiness {
    /// No reconciliation attempted yet; no routing decision may be made.
    #[default]
    Unknown,
    /// At least one reconciliation finished (success or failure).
    Settled,
}

/// Current authentication status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<User>,
    pub readiness: Readiness,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_settled(&self) -> bool {
        self.readiness == Readiness::Settled
    }

    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().map(|user| user.email.as_str())
    }
}

/// A committed state tagged with its write order.
#[derive(Clone, Debug, Default)]
struct Committed {
    version: u64,
    state: SessionState,
}

/// Observable, clonable handle onto the process-wide session state.
#[derive(Clone, Default)]
pub struct SessionStore {
    committed: Arc<Mutex<Committed>>,
    listeners: Listeners<Committed>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the latest committed state.
    pub fn snapshot(&self) -> SessionState {
        self.committed.lock().unwrap_or_else(PoisonError::into_inner).state.clone()
    }

    /// Call `callback` with the new state after every change.
    ///
    /// A callback never sees an older state after a newer one: when a
    /// callback writes to the store, the nested write reaches later
    /// subscribers first and the outer, now outdated, delivery is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let delivered = AtomicU64::new(0);
        self.listeners.subscribe(move |committed: &Committed| {
            if delivered.fetch_max(committed.version, Ordering::SeqCst) >= committed.version {
                return;
            }
            callback(&committed.state);
        })
    }

    /// Record the outcome of a reconciliation.
    pub(crate) fn settle(&self, identity: Option<User>) {
        self.commit(|state| {
            state.identity = identity;
            state.readiness = Readiness::Settled;
        });
    }

    /// Drop the identity without touching readiness.
    pub(crate) fn clear_identity(&self) {
        self.commit(|state| state.identity = None);
    }

    fn commit(&self, mutate: impl FnOnce(&mut SessionState)) {
        let changed = {
            let mut committed = self.committed.lock().unwrap_or_else(PoisonError::into_inner);
            let before = committed.state.clone();
            mutate(&mut committed.state);
            (committed.state != before).then(|| {
                committed.version += 1;
                committed.clone()
            })
        };
        if let Some(next) = changed {
            self.listeners.emit(&next);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("state", &self.snapshot()).finish_non_exhaustive()
    }
}
