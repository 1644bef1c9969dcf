//! Networking modules for the identity service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` defines the client seam the session controller depends on,
//! `api` implements it over HTTP, `invalidation` carries the "credential
//! rejected" broadcast, and `types` defines the wire schema.

pub mod api;
pub mod identity;
pub mod invalidation;
pub mod types;
