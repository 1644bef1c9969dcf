//! Route gate: maps session state and a requested path to a navigation action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route view is wrapped in the `Gate` component, which calls `decide`
//! on each render with the live session state. Keeping the decision a pure
//! function means the same `(state, path)` pair always yields the same action
//! and the table below is testable without a browser.
//!
//! | readiness | identity | route            | decision          |
//! |-----------|----------|------------------|-------------------|
//! | unknown   | any      | any              | `Loading`         |
//! | settled   | none     | protected        | `RedirectToLogin` |
//! | settled   | present  | login/register   | `RedirectToHome`  |
//! | settled   | any      | unknown path     | `RedirectToLanding` |
//! | settled   | otherwise|                  | `Render`          |

#[cfg(test)]
#[path = "route_gate_test.rs"]
mod route_gate_test;

use crate::state::session::SessionState;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/auth";
pub const HOME_PATH: &str = "/dashboard";

/// Known application routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Public landing page.
    Landing,
    /// Combined login/register page.
    Auth,
    /// Authenticated home.
    Dashboard,
    NotFound,
}

impl AppRoute {
    /// Classify a requested path. Query strings, fragments, and a trailing
    /// slash are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Landing,
            LOGIN_PATH => Self::Auth,
            HOME_PATH => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

/// What the view layer should do for a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    /// Session not reconciled yet; show a loading screen and decide later.
    Loading,
    RedirectToLogin,
    RedirectToHome,
    RedirectToLanding,
}

impl GateDecision {
    /// Path to navigate to, if this decision is a redirect.
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Render | Self::Loading => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToHome => Some(HOME_PATH),
            Self::RedirectToLanding => Some(LANDING_PATH),
        }
    }
}

/// Decide what to do with a navigation to `path` given `state`.
///
/// Never redirects while the session readiness is unknown.
pub fn decide(state: &SessionState, path: &str) -> GateDecision {
    if !state.is_settled() {
        return GateDecision::Loading;
    }
    let route = AppRoute::from_path(path);
    match (route, state.is_authenticated()) {
        (AppRoute::NotFound, _) => GateDecision::RedirectToLanding,
        (route, false) if route.is_protected() => GateDecision::RedirectToLogin,
        (AppRoute::Auth, true) => GateDecision::RedirectToHome,
        _ => GateDecision::Render,
    }
}
