//! Public landing page.

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::util::route_gate::{HOME_PATH, LOGIN_PATH};

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let cta_href = move || if session.get().is_authenticated() { HOME_PATH } else { LOGIN_PATH };
    let cta_label = move || {
        if session.get().is_authenticated() { "Go to dashboard" } else { "Get started" }
    };

    view! {
        <div class="landing">
            <h1 class="landing__title">"Hybrid Analyzer"</h1>
            <p class="landing__subtitle">"AI-powered text classification and summarization."</p>
            <a class="landing__cta" href=cta_href>{cta_label}</a>
        </div>
    }
}
