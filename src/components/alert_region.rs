//! Stack of active alerts, newest last.

use leptos::prelude::*;

use crate::context::libre311::use_libre311_context;

#[component]
pub fn AlertRegion() -> impl IntoView {
    let ctx = use_libre311_context();
    let alerts = ctx.alerts();

    view! {
        <div class="alert-region" role="status" aria-live="polite">
            {move || {
                alerts
                    .get()
                    .alerts
                    .into_iter()
                    .map(|entry| {
                        let ctx = ctx.clone();
                        let id = entry.id;
                        view! {
                            <div class=format!("alert alert--{}", entry.alert.alert_type.as_str())>
                                <strong class="alert__title">{entry.alert.title}</strong>
                                // Server descriptions carry inline markup.
                                <div class="alert__description" inner_html=entry.alert.description></div>
                                <button class="alert__dismiss" title="Dismiss" on:click=move |_| ctx.dismiss_alert(id)>
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
