//! Combined login / registration page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Validates input locally, then calls the session controller. On success the
//! session gains an identity and the route gate moves the user to the
//! dashboard; on failure the message is shown inline and the form keeps its
//! values.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::app::AppSession;
use crate::net::identity::{AuthError, IdentityClient};
use crate::state::controller::SessionController;
use crate::util::credentials::{AuthMode, Credentials, validate_credentials};

const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Run the verb for `mode`.
async fn submit<C: IdentityClient>(
    controller: &SessionController<C>,
    mode: AuthMode,
    credentials: &Credentials,
) -> Result<(), AuthError> {
    match mode {
        AuthMode::Login => controller.login(&credentials.email, &credentials.password).await,
        AuthMode::Register => controller.register(&credentials.email, &credentials.password).await,
    }
}

/// Inline message for a failed submit.
fn failure_message(err: &AuthError) -> String {
    match err {
        AuthError::Validation(e) => e.to_string(),
        AuthError::Credential(detail) => detail.clone(),
        AuthError::Network(_) | AuthError::Unauthenticated => GENERIC_FAILURE.to_owned(),
    }
}

fn title(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "Welcome Back",
        AuthMode::Register => "Create Account",
    }
}

fn submit_label(mode: AuthMode, busy: bool) -> &'static str {
    match (mode, busy) {
        (_, true) => "Please wait...",
        (AuthMode::Login, false) => "Sign In",
        (AuthMode::Register, false) => "Create Account",
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let controller = expect_context::<AppSession>();

    let mode = RwSignal::new(AuthMode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        let current_mode = mode.get();
        let credentials = match validate_credentials(current_mode, &email.get(), &password.get(), &confirm.get()) {
            Ok(credentials) => credentials,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        busy.set(true);

        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            let result = submit(&controller, current_mode, &credentials).await;
            // The page unmounts once the gate redirects, so writes may land on
            // disposed signals.
            let _ = busy.try_set(false);
            if let Err(e) = result {
                let _ = error.try_set(failure_message(&e));
            }
        });
    };

    let on_toggle = move |_| {
        mode.update(|m| *m = m.toggle());
        error.set(String::new());
        confirm.set(String::new());
    };

    let is_login = move || mode.get() == AuthMode::Login;

    view! {
        <div class="auth">
            <div class="auth__card">
                <div class="auth__header">
                    <span class="auth__logo">"Hybrid Analyzer"</span>
                    <h1 class="auth__title">{move || title(mode.get())}</h1>
                </div>
                <Show when=move || !error.get().is_empty()>
                    <div class="auth__error" role="alert">{move || error.get()}</div>
                </Show>
                <form class="auth__form" on:submit=on_submit>
                    <input
                        class="auth__input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth__input"
                        type="password"
                        placeholder="Password"
                        autocomplete=move || if is_login() { "current-password" } else { "new-password" }
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || !is_login()>
                        <input
                            class="auth__input"
                            type="password"
                            placeholder="Confirm password"
                            autocomplete="new-password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="auth__submit" type="submit" disabled=move || busy.get()>
                        {move || submit_label(mode.get(), busy.get())}
                    </button>
                </form>
                <p class="auth__toggle">
                    {move || if is_login() { "Don't have an account? " } else { "Already have an account? " }}
                    <button class="auth__toggle-button" type="button" on:click=on_toggle>
                        {move || if is_login() { "Sign up" } else { "Sign in" }}
                    </button>
                </p>
            </div>
        </div>
    }
}
