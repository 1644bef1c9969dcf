//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure decision and validation logic lives here so pages stay thin and the
//! rules can be tested without a browser.

pub mod credentials;
pub mod listeners;
pub mod route_gate;
