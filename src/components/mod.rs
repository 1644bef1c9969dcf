//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! Components here are route-agnostic; `gate` is the only one that reads
//! session state, and it does so through the pure `route_gate::decide`.

pub mod gate;
pub mod loading_screen;
