//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
};

use crate::components::alert_region::AlertRegion;
use crate::config::Libre311Config;
use crate::context::libre311::create_libre311_context;
use crate::pages::issues::{IssueDetailsPage, IssuesLayout, IssuesMapPage};
use crate::pages::login::LoginPage;
use crate::util::link_resolver::ISSUES_MAP_PATH;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the Libre311 context from the build-time config and sets up
/// routing. A bad config renders an error instead of the app.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = match Libre311Config::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::error!("invalid configuration: {e}");
            return view! { <p class="config-error">{format!("Libre311 is misconfigured: {e}")}</p> }.into_any();
        }
    };
    create_libre311_context(config.into_provider_props());

    view! {
        <Stylesheet id="leptos" href="/pkg/libre311.css"/>
        <Title text="Libre311"/>

        <Router>
            <AlertRegion/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=ISSUES_MAP_PATH/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=(StaticSegment("issues"), StaticSegment("map")) view=IssuesLayout>
                    <Route path=StaticSegment("") view=IssuesMapPage/>
                    <Route path=ParamSegment("issue_id") view=IssueDetailsPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
    .into_any()
}
