//! Service request list and selection driven by the issues page URL.
//!
//! SYSTEM CONTEXT
//! ==============
//! The issues layout forwards every router location change to
//! [`ServiceRequestsContext::handle_page_nav`]. The list route refetches with
//! the filter encoded in the query string; the detail route selects the
//! request from the loaded page when it is there and fetches it otherwise.
//!
//! DESIGN
//! ======
//! Each navigation takes a sequence number before it awaits the network.
//! When a response arrives for a navigation that has since been superseded
//! it is dropped, so the stores always reflect the latest URL. Failures are
//! stored as `AsyncResult::Failure`; the layout turns them into alerts.

#[cfg(test)]
#[path = "service_requests_test.rs"]
mod service_requests_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use open311::{GetServiceRequestsParams, Open311Error, ServiceRequest, ServiceRequestId};

use crate::net::Libre311Error;
use crate::net::libre311::{Libre311Service, ServiceRequestsResponse};
use crate::state::async_result::AsyncResult;
use crate::util::link_resolver::{IssuesRoute, LinkResolver};
use crate::util::search_params::{to_query_string, to_service_request_params};

/// The parts of a router location this context reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub pathname: String,
    /// Query string, with or without its leading `?`.
    pub search: String,
}

impl PageLocation {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self { pathname: pathname.into(), search: search.into() }
    }
}

#[derive(Clone)]
pub struct ServiceRequestsContext {
    service: Arc<dyn Libre311Service>,
    link_resolver: LinkResolver,
    selected_service_request: RwSignal<Option<ServiceRequest>>,
    service_requests_response: RwSignal<AsyncResult<ServiceRequestsResponse>>,
    pending_navigation: RwSignal<Option<String>>,
    nav_seq: Arc<AtomicU64>,
}

impl ServiceRequestsContext {
    #[must_use]
    pub fn new(service: Arc<dyn Libre311Service>, link_resolver: LinkResolver) -> Self {
        Self {
            service,
            link_resolver,
            selected_service_request: RwSignal::new(None),
            service_requests_response: RwSignal::new(AsyncResult::InProgress),
            pending_navigation: RwSignal::new(None),
            nav_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn selected_service_request(&self) -> ReadSignal<Option<ServiceRequest>> {
        self.selected_service_request.read_only()
    }

    #[must_use]
    pub fn service_requests_response(&self) -> ReadSignal<AsyncResult<ServiceRequestsResponse>> {
        self.service_requests_response.read_only()
    }

    /// URL the layout should navigate to next, set by
    /// [`ServiceRequestsContext::apply_service_request_params`].
    #[must_use]
    pub fn pending_navigation(&self) -> ReadSignal<Option<String>> {
        self.pending_navigation.read_only()
    }

    /// Take the pending navigation target, leaving none behind.
    pub fn take_pending_navigation(&self) -> Option<String> {
        self.pending_navigation.try_update(Option::take).flatten()
    }

    /// Update the stores for a new page location.
    pub async fn handle_page_nav(&self, location: &PageLocation) {
        let seq = self.nav_seq.fetch_add(1, Ordering::SeqCst) + 1;
        match self.link_resolver.classify(&location.pathname) {
            IssuesRoute::Map => self.handle_map_nav(seq, &location.search).await,
            IssuesRoute::Detail(id) => self.handle_issue_details_nav(seq, id).await,
            IssuesRoute::InvalidDetail(raw) => {
                self.selected_service_request.set(None);
                self.service_requests_response.set(AsyncResult::Failure(Libre311Error::Api(Open311Error::Parse(
                    format!("invalid service request id: {raw}"),
                ))));
            }
        }
    }

    /// Navigate to `pathname` with `params` encoded in the query, which in
    /// turn refetches through [`ServiceRequestsContext::handle_page_nav`].
    pub fn apply_service_request_params(&self, params: &GetServiceRequestsParams, pathname: &str) {
        match to_query_string(params) {
            Ok(query) if query.is_empty() => self.pending_navigation.set(Some(pathname.to_owned())),
            Ok(query) => self.pending_navigation.set(Some(format!("{pathname}?{query}"))),
            Err(e) => leptos::logging::error!("failed to encode service request params: {e}"),
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        self.nav_seq.load(Ordering::SeqCst) == seq
    }

    async fn handle_issue_details_nav(&self, seq: u64, id: ServiceRequestId) {
        let loaded = self
            .service_requests_response
            .with_untracked(|response| response.success().and_then(|page| page.find(id)).cloned());
        if let Some(request) = loaded {
            self.selected_service_request.set(Some(request));
            return;
        }

        let result = self.service.get_service_request(id).await;
        if !self.is_current(seq) {
            leptos::logging::log!("dropping stale service request {id}");
            return;
        }
        match result {
            Ok(request) => {
                self.selected_service_request.set(Some(request.clone()));
                self.service_requests_response.set(AsyncResult::Success(ServiceRequestsResponse::single(request)));
            }
            Err(e) => {
                self.selected_service_request.set(None);
                self.service_requests_response.set(AsyncResult::Failure(e));
            }
        }
    }

    async fn handle_map_nav(&self, seq: u64, search: &str) {
        self.selected_service_request.set(None);
        let params = to_service_request_params(search);
        let result = self.service.get_service_requests(&params).await;
        if !self.is_current(seq) {
            leptos::logging::log!("dropping stale service request page for {search}");
            return;
        }
        self.service_requests_response.set(result.into());
    }
}

// =============================================================================
// CONTEXT ACCESS
// =============================================================================

/// Build the context over `service` and provide it to descendants.
pub fn create_service_requests_context(service: Arc<dyn Libre311Service>) -> ServiceRequestsContext {
    let ctx = ServiceRequestsContext::new(service, LinkResolver);
    provide_context(ctx.clone());
    ctx
}

/// # Panics
///
/// Panics outside the issues layout.
#[must_use]
pub fn use_service_requests_context() -> ServiceRequestsContext {
    expect_context::<ServiceRequestsContext>()
}

#[must_use]
pub fn use_selected_service_request() -> ReadSignal<Option<ServiceRequest>> {
    use_service_requests_context().selected_service_request()
}

#[must_use]
pub fn use_service_requests_response() -> ReadSignal<AsyncResult<ServiceRequestsResponse>> {
    use_service_requests_context().service_requests_response()
}
