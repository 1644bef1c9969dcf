//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` holds the observable state and its store; `controller` is the
//! only code allowed to write it.

pub mod controller;
pub mod session;
