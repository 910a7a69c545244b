//! Login page for staff accounts managed by UnityAuth.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::context::libre311::use_libre311_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let libre311 = use_libre311_context();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let signed_in = libre311.user();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() {
            return;
        }
        busy.set(true);

        let libre311 = libre311.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match libre311.unity_auth_service.login(&email_value, &password_value).await {
                Ok(_) => {
                    password.set(String::new());
                    navigate(libre311.link_resolver.issues_map(), NavigateOptions::default());
                }
                Err(e) => {
                    libre311.alert_error(&e);
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Libre311"</h1>
                <p class="login-card__subtitle">
                    {move || {
                        signed_in
                            .get()
                            .map(|user| format!("Signed in as {}", user.username))
                            .unwrap_or_else(|| "Staff sign in".to_owned())
                    }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@city.gov"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
            </div>
        </div>
    }
}
