//! Full-page placeholder shown while a routing decision is pending.

use leptos::prelude::*;

#[component]
pub fn LoadingScreen(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-spinner"></div>
            <p>{message}</p>
        </div>
    }
}
