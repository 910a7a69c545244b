//! Root context: shared services, current user and alerting.
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once by the app root and provided through Leptos context. Every
//! page reaches the same Libre311 service and UnityAuth bridge through
//! [`use_libre311_context`], so a login anywhere updates the credential used
//! by every subsequent API call.
//!
//! ERROR HANDLING
//! ==============
//! [`Libre311Context::alert_error`] is the single place failures become
//! user-visible. It logs the complete error to the console and pushes an
//! alert whose shape depends on how much the error tells us.

#[cfg(test)]
#[path = "libre311_test.rs"]
mod libre311_test;

use std::sync::Arc;

use leptos::prelude::*;
use open311::Open311Error;

use crate::config::Mode;
use crate::net::Libre311Error;
use crate::net::libre311::{Libre311Client, Libre311Service, Libre311ServiceProps};
use crate::net::recaptcha::{RecaptchaServiceProps, recaptcha_service_factory};
use crate::net::unity_auth::{AuthEvent, AuthEventKind, UnityAuthLoginResponse, UnityAuthService, UnityAuthServiceProps};
use crate::state::alert::{Alert, AlertState};
use crate::util::link_resolver::LinkResolver;

pub const UNEXPECTED_ERROR_TITLE: &str = "Something unexpected happened";
pub const UNEXPECTED_ERROR_DESCRIPTION: &str = "The complete error has been logged in the console";

/// Everything needed to build the root context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Libre311ContextProviderProps {
    pub mode: Mode,
    pub libre311: Libre311ServiceProps,
    pub recaptcha: RecaptchaServiceProps,
    pub unity_auth: UnityAuthServiceProps,
}

#[derive(Clone)]
pub struct Libre311Context {
    pub service: Arc<dyn Libre311Service>,
    pub link_resolver: LinkResolver,
    pub unity_auth_service: Arc<UnityAuthService>,
    pub mode: Mode,
    user: RwSignal<Option<UnityAuthLoginResponse>>,
    alerts: RwSignal<AlertState>,
}

impl Libre311Context {
    /// Build the production service graph from `props`.
    #[must_use]
    pub fn new(props: Libre311ContextProviderProps) -> Self {
        let recaptcha = recaptcha_service_factory(props.mode, props.recaptcha);
        let service: Arc<dyn Libre311Service> = Arc::new(Libre311Client::new(props.libre311, recaptcha));
        let unity_auth_service = Arc::new(UnityAuthService::new(props.unity_auth));
        Self::with_services(props.mode, service, unity_auth_service)
    }

    /// Build around existing services, wiring auth events into the service
    /// credential and the current-user store.
    #[must_use]
    pub fn with_services(
        mode: Mode,
        service: Arc<dyn Libre311Service>,
        unity_auth_service: Arc<UnityAuthService>,
    ) -> Self {
        let user = RwSignal::new(None);
        let alerts = RwSignal::new(AlertState::default());

        let on_login = Arc::clone(&service);
        unity_auth_service.subscribe(AuthEventKind::Login, move |event| {
            if let AuthEvent::Login(login) = event {
                on_login.set_auth_info(Some(login));
                user.set(Some(login.clone()));
            }
        });
        let on_logout = Arc::clone(&service);
        unity_auth_service.subscribe(AuthEventKind::Logout, move |_| {
            on_logout.set_auth_info(None);
            user.set(None);
        });

        Self { service, link_resolver: LinkResolver, unity_auth_service, mode, user, alerts }
    }

    #[must_use]
    pub fn user(&self) -> ReadSignal<Option<UnityAuthLoginResponse>> {
        self.user.read_only()
    }

    #[must_use]
    pub fn alerts(&self) -> ReadSignal<AlertState> {
        self.alerts.read_only()
    }

    /// Show `alert`; in the browser it is dismissed after `ALERT_DISMISS_MS`.
    pub fn alert(&self, alert: Alert) -> u64 {
        let mut id = 0;
        self.alerts.update(|state| id = state.push(alert));

        #[cfg(feature = "hydrate")]
        {
            let alerts = self.alerts;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(crate::state::alert::ALERT_DISMISS_MS))
                    .await;
                let _ = alerts.try_update(|state| state.dismiss(id));
            });
        }

        id
    }

    pub fn dismiss_alert(&self, id: u64) {
        self.alerts.update(|state| state.dismiss(id));
    }

    /// Log `err` and show it as an error alert.
    pub fn alert_error(&self, err: &Libre311Error) -> u64 {
        leptos::logging::error!("{err:?}");
        self.alert(error_alert(err))
    }
}

/// Alert presentation for `err`.
///
/// Structured server errors show the server summary with the first field
/// error and log reference. An error response with an unrecognized body gets
/// the generic fallback. Every other error shows its message under `Error`.
#[must_use]
pub fn error_alert(err: &Libre311Error) -> Alert {
    match err {
        Libre311Error::Api(Open311Error::Server { error, .. }) => Alert::error(
            error.message.clone(),
            format!("<div>{}</div> <small>logref: {}</small>", error.first_error_message(), error.logref),
        ),
        Libre311Error::Api(Open311Error::Status { .. }) => unexpected_error_alert(),
        other => Alert::error("Error", other.to_string()),
    }
}

fn unexpected_error_alert() -> Alert {
    Alert::error(UNEXPECTED_ERROR_TITLE, UNEXPECTED_ERROR_DESCRIPTION)
}

// =============================================================================
// CONTEXT ACCESS
// =============================================================================

/// Build the root context from `props` and provide it to descendants.
pub fn create_libre311_context(props: Libre311ContextProviderProps) -> Libre311Context {
    let ctx = Libre311Context::new(props);
    provide_context(ctx.clone());
    ctx
}

/// # Panics
///
/// Panics if called outside a tree where [`create_libre311_context`] ran.
#[must_use]
pub fn use_libre311_context() -> Libre311Context {
    expect_context::<Libre311Context>()
}

#[must_use]
pub fn use_libre311_service() -> Arc<dyn Libre311Service> {
    use_libre311_context().service
}

#[must_use]
pub fn use_unity_auth_service() -> Arc<UnityAuthService> {
    use_libre311_context().unity_auth_service
}
