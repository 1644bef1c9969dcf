//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and calls session verbs through
//! the controller from context. Access control is not a page concern: the
//! `Gate` wrapping each route decides whether a page renders at all.

pub mod auth;
pub mod dashboard;
pub mod landing;
