//! Issues map layout and its list/detail pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `IssuesLayout` owns the service-requests context for `/issues/map` and
//! `/issues/map/:issue_id`. It forwards router location changes into the
//! context, performs the navigations the context queues, and alerts on load
//! failures. The nested pages only read the context's stores.

#[cfg(test)]
#[path = "issues_test.rs"]
mod issues_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_navigate};
use open311::{GetServiceRequestsParams, Pagination, ServiceRequest};

use crate::context::libre311::use_libre311_context;
use crate::context::service_requests::{PageLocation, create_service_requests_context, use_service_requests_context};
use crate::state::async_result::AsyncResult;
use crate::util::search_params::to_service_request_params;

/// Layout for every issues route.
#[component]
pub fn IssuesLayout() -> impl IntoView {
    let libre311 = use_libre311_context();
    let ctx = create_service_requests_context(Arc::clone(&libre311.service));
    let location = use_location();
    let navigate = use_navigate();

    // Router location -> context stores.
    let nav_ctx = ctx.clone();
    Effect::new(move || {
        let page = PageLocation::new(location.pathname.get(), location.search.get());
        let ctx = nav_ctx.clone();
        leptos::task::spawn_local(async move {
            ctx.handle_page_nav(&page).await;
        });
    });

    // Queued filter changes -> router.
    let pending = ctx.pending_navigation();
    let pending_ctx = ctx.clone();
    Effect::new(move || {
        if pending.with(Option::is_none) {
            return;
        }
        if let Some(href) = pending_ctx.take_pending_navigation() {
            navigate(&href, NavigateOptions::default());
        }
    });

    let response = ctx.service_requests_response();
    Effect::new(move || {
        response.with(|response| {
            if let Some(err) = response.failure() {
                libre311.alert_error(err);
            }
        });
    });

    view! {
        <div class="issues-layout">
            <Outlet/>
        </div>
    }
}

/// Paged list of service requests for the current filter.
#[component]
pub fn IssuesMapPage() -> impl IntoView {
    let ctx = use_service_requests_context();
    let links = use_libre311_context().link_resolver;
    let location = use_location();
    let response = ctx.service_requests_response();

    let go_to_page = Callback::new(move |page_number: u32| {
        let params = page_params(&location.search.get_untracked(), page_number);
        ctx.apply_service_request_params(&params, &location.pathname.get_untracked());
    });

    view! {
        <section class="issues-map">
            {move || match response.get() {
                AsyncResult::InProgress => view! { <p class="issues-map__status">"Loading issues..."</p> }.into_any(),
                AsyncResult::Failure(_) => {
                    view! { <p class="issues-map__status">"Issues could not be loaded."</p> }.into_any()
                }
                AsyncResult::Success(page) => {
                    let pagination = page.pagination();
                    view! {
                        <ul class="issues-map__list">
                            {page
                                .service_requests
                                .into_iter()
                                .map(|request| {
                                    let href = links.issue_details(request.service_request_id);
                                    view! {
                                        <li class="issues-map__item">
                                            <a href=href>{request.service_name}</a>
                                            <span class="issues-map__status-tag">{request.status.as_str()}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                        <PageControls pagination=pagination on_page=go_to_page/>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn PageControls(pagination: Pagination, on_page: Callback<u32>) -> impl IntoView {
    let current = pagination.page_number;
    view! {
        <nav class="issues-map__pages">
            <button
                class="btn"
                disabled=!pagination.has_previous_page()
                on:click=move |_| on_page.run(current.saturating_sub(1))
            >
                "Previous"
            </button>
            <span class="issues-map__page-label">{page_label(&pagination)}</span>
            <button
                class="btn"
                disabled=!pagination.has_next_page()
                on:click=move |_| on_page.run(current.saturating_add(1))
            >
                "Next"
            </button>
        </nav>
    }
}

/// The selected service request.
#[component]
pub fn IssueDetailsPage() -> impl IntoView {
    let ctx = use_service_requests_context();
    let selected = ctx.selected_service_request();
    let links = use_libre311_context().link_resolver;

    view! {
        <section class="issue-details">
            <a class="issue-details__back" href=links.issues_map()>"Back to issues"</a>
            {move || match selected.get() {
                Some(request) => issue_summary(request).into_any(),
                None => view! { <p>"Loading issue..."</p> }.into_any(),
            }}
        </section>
    }
}

fn issue_summary(request: ServiceRequest) -> impl IntoView {
    view! {
        <article class="issue-details__body">
            <h2>{request.service_name}</h2>
            <p class="issue-details__status">{request.status.as_str()}</p>
            <p>{request.description.unwrap_or_default()}</p>
            <p class="issue-details__address">{request.address}</p>
            <p class="issue-details__requested">{request.requested_datetime}</p>
        </article>
    }
}

/// The current URL's filter moved to `page_number`. Id lookups are unpaged
/// and returned unchanged.
fn page_params(search: &str, page_number: u32) -> GetServiceRequestsParams {
    match to_service_request_params(search) {
        GetServiceRequestsParams::Filter(mut filter) => {
            filter.page_number = Some(page_number);
            GetServiceRequestsParams::Filter(filter)
        }
        ids @ GetServiceRequestsParams::Ids(_) => ids,
    }
}

fn page_label(pagination: &Pagination) -> String {
    if pagination.total_pages == 0 {
        return "No results".to_owned();
    }
    format!("Page {} of {}", pagination.page_number + 1, pagination.total_pages)
}
