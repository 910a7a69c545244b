//! # libre311
//!
//! Leptos + WASM client for Libre311, an Open311 GeoReport v2 service
//! request tracker.
//!
//! This crate contains the application contexts (shared services, current
//! user, alerts, service-request list state), the Libre311 API service, the
//! UnityAuth login bridge, the reCAPTCHA adapter and the issues pages. Wire
//! types and marshaling live in the `open311` crate.

pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entrypoint: install console logging and hydrate the server render.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
