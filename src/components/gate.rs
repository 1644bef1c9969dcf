//! Route guard wrapping every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Re-derives `route_gate::decide` from the live session signal and current
//! location on every change, so no page caches an auth decision. Redirects
//! replace the history entry; anything else renders the page or a loading
//! screen.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::loading_screen::LoadingScreen;
use crate::state::session::SessionState;
use crate::util::route_gate::{GateDecision, decide};

#[component]
pub fn Gate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let location = use_location();
    let decision = Memo::new(move |_| decide(&session.get(), &location.pathname.get()));

    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(target) = decision.get().redirect_target() {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        GateDecision::Render => children(),
        GateDecision::Loading => view! { <LoadingScreen message="Loading..."/> }.into_any(),
        GateDecision::RedirectToLogin | GateDecision::RedirectToHome | GateDecision::RedirectToLanding => {
            view! { <LoadingScreen message="Redirecting..."/> }.into_any()
        }
    }
}
