//! # analyzer-client
//!
//! Leptos + WASM frontend for the hybrid text-analysis service.
//!
//! The interesting part is the session core: `state::session` (the observable
//! session state), `state::controller` (the only writer, reconciling against
//! the identity service and reacting to invalidation), and
//! `util::route_gate` (the pure routing decision). Pages and components are
//! thin views over those.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
