//! Authenticated home.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only rendered when the gate has a settled, authenticated session. Logout
//! clears the session locally before the server answers, so the gate moves
//! the user off this page even when the remote call fails.

use leptos::prelude::*;

use crate::app::AppSession;
use crate::state::session::SessionState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let controller = expect_context::<AppSession>();
    let busy = RwSignal::new(false);

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            // Failures are logged by the controller; the local session is
            // already gone either way.
            let _ = controller.logout().await;
            let _ = busy.try_set(false);
        });
    };

    let email = move || session.get().email().map(str::to_owned).unwrap_or_default();

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <span class="dashboard__brand">"Hybrid Analyzer"</span>
                <span class="dashboard__user">{email}</span>
                <button class="dashboard__logout" type="button" on:click=on_logout disabled=move || busy.get()>
                    "Logout"
                </button>
            </header>
            <main class="dashboard__main">
                <h1>"Dashboard"</h1>
                <p>"Signed in as " {email}</p>
            </main>
        </div>
    }
}
