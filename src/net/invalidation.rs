//! Out-of-band "credential no longer accepted" broadcast.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP layer raises this whenever an authenticated request is rejected
//! with `401`. The session controller is the one long-lived subscriber and
//! demotes the session to unauthenticated on receipt. The signal carries no
//! payload.

#[cfg(test)]
#[path = "invalidation_test.rs"]
mod invalidation_test;

use crate::util::listeners::{Listeners, Subscription};

/// Payload-less broadcast shared between the network layer and the session.
#[derive(Clone, Default)]
pub struct InvalidationSignal {
    listeners: Listeners<()>,
}

impl InvalidationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every subscriber that the current credential was rejected.
    pub fn raise(&self) {
        log::debug!("invalidation signal raised ({} listeners)", self.listeners.len());
        self.listeners.emit(&());
    }

    pub fn on_invalidated<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners.subscribe(move |_: &()| callback())
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for InvalidationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvalidationSignal").field("listeners", &self.listeners.len()).finish()
    }
}
