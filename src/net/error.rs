//! Client-side error type.

use open311::Open311Error;

/// Errors produced by the browser client's services.
///
/// `Clone` so failures can be held in reactive stores.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Libre311Error {
    /// An Open311 request failed or returned a non-conforming payload.
    #[error(transparent)]
    Api(#[from] Open311Error),

    /// The challenge provider did not issue a token.
    #[error("recaptcha challenge failed: {0}")]
    Recaptcha(String),

    /// The auth server rejected or failed the login.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A browser-only operation was invoked outside the browser.
    #[error("{0} is only available in the browser")]
    Unavailable(&'static str),
}
