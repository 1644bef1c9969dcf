//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the session stack once per application lifetime: config, the
//! invalidation signal, the HTTP identity client, the store, and the one
//! controller that writes it. The store is mirrored into an
//! `RwSignal<SessionState>` context for views; the controller is provided as
//! context for pages that call verbs.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::gate::Gate;
use crate::config::ClientConfig;
use crate::net::api::HttpIdentityClient;
use crate::net::invalidation::InvalidationSignal;
use crate::pages::{auth::AuthPage, dashboard::DashboardPage, landing::LandingPage};
use crate::state::controller::SessionController;
use crate::state::session::SessionStore;

/// The controller type pages pull from context.
pub type AppSession = SessionController<HttpIdentityClient>;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    log::debug!("app: api base {}", config.api_base);
    let signal = InvalidationSignal::new();
    let client = HttpIdentityClient::new(config, signal.clone());
    let controller: AppSession = SessionController::new(client, SessionStore::new(), &signal);

    let session = RwSignal::new(controller.store().snapshot());
    let mirror = controller.store().subscribe(move |state| {
        let _ = session.try_set(state.clone());
    });
    provide_context(session);
    provide_context(controller.clone());

    // Reconcile exactly once at start; readiness stays unknown until it lands.
    #[cfg(feature = "csr")]
    {
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            controller.reconcile().await;
        });
    }

    on_cleanup(move || {
        drop(mirror);
        controller.shutdown();
    });

    view! {
        <Title text="Hybrid Analyzer"/>

        <Router>
            <Routes fallback=|| view! { <Gate>"Page not found."</Gate> }>
                <Route path=StaticSegment("") view=|| view! { <Gate><LandingPage/></Gate> }/>
                <Route path=StaticSegment("auth") view=|| view! { <Gate><AuthPage/></Gate> }/>
                <Route path=StaticSegment("dashboard") view=|| view! { <Gate><DashboardPage/></Gate> }/>
            </Routes>
        </Router>
    }
}
