//! UnityAuth bridge: login against the auth server and broadcast auth events.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth server issues Micronaut-style bearer tokens. Consumers never read
//! the token from here directly; they subscribe to `Login`/`Logout` events so
//! the API client credential and the current-user store change together.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "unity_auth_test.rs"]
mod unity_auth_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::error::Libre311Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnityAuthServiceProps {
    pub base_url: String,
}

/// Bearer token response returned by the auth server's login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnityAuthLoginResponse {
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

impl UnityAuthLoginResponse {
    /// Value for the `Authorization` header, e.g. `Bearer abc`.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEventKind {
    Login,
    Logout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    Login(UnityAuthLoginResponse),
    Logout,
}

impl AuthEvent {
    #[must_use]
    pub fn kind(&self) -> AuthEventKind {
        match self {
            Self::Login(_) => AuthEventKind::Login,
            Self::Logout => AuthEventKind::Logout,
        }
    }
}

/// Handle returned by [`UnityAuthService::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

pub struct UnityAuthService {
    base_url: String,
    listeners: Mutex<Vec<(SubscriptionId, AuthEventKind, Listener)>>,
    next_id: AtomicU64,
}

impl UnityAuthService {
    #[must_use]
    pub fn new(props: UnityAuthServiceProps) -> Self {
        Self {
            base_url: props.base_url.trim_end_matches('/').to_owned(),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/api/login", self.base_url)
    }

    /// Register `listener` for events of `kind`.
    pub fn subscribe<F>(&self, kind: AuthEventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, kind, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Deliver `event` to every listener of its kind, in subscription order.
    pub fn emit(&self, event: &AuthEvent) {
        let kind = event.kind();
        // Listeners run outside the lock so they may (un)subscribe.
        let matching: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();
        for listener in matching {
            listener(event);
        }
    }

    /// Authenticate with the auth server and emit `Login` on success.
    ///
    /// # Errors
    ///
    /// Returns [`Libre311Error::Auth`] if the server rejects the credentials
    /// or the response is malformed, [`Libre311Error::Unavailable`] outside
    /// the browser.
    pub async fn login(&self, username: &str, password: &str) -> Result<UnityAuthLoginResponse, Libre311Error> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "password": password });
            let resp = gloo_net::http::Request::post(&self.login_url())
                .json(&payload)
                .map_err(|e| Libre311Error::Auth(e.to_string()))?
                .send()
                .await
                .map_err(|e| Libre311Error::Auth(e.to_string()))?;
            if !resp.ok() {
                return Err(Libre311Error::Auth(login_failed_message(resp.status())));
            }
            let body: UnityAuthLoginResponse = resp.json().await.map_err(|e| Libre311Error::Auth(e.to_string()))?;
            self.emit(&AuthEvent::Login(body.clone()));
            Ok(body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(Libre311Error::Unavailable("unity auth login"))
        }
    }

    /// Emit `Logout`.
    pub fn logout(&self) {
        self.emit(&AuthEvent::Logout);
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    format!("login failed: {status}")
}
