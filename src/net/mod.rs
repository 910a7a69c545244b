//! Networking and adapter services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `libre311` talks to the Open311 API, `unity_auth` bridges login/logout
//! events from the auth server, and `recaptcha` issues challenge tokens for
//! anonymous submissions. All browser I/O is gated behind `hydrate`.

pub mod error;
pub mod libre311;
pub mod recaptcha;
pub mod unity_auth;

pub use error::Libre311Error;
