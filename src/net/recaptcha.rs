//! reCAPTCHA challenge token issuance.
//!
//! SYSTEM CONTEXT
//! ==============
//! Anonymous submissions carry a `g_recaptcha_response` token. In `test`
//! mode a fixed token is returned so end-to-end suites never hit the
//! provider; otherwise the browser's `grecaptcha.enterprise` API is called.

#[cfg(test)]
#[path = "recaptcha_test.rs"]
mod recaptcha_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::Libre311Error;
use crate::config::Mode;

pub type RecaptchaToken = String;

/// Token returned by [`MockRecaptchaService`].
pub const TEST_RECAPTCHA_TOKEN: &str = "03AGdBq27tvcDrfi";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecaptchaServiceProps {
    pub recaptcha_key: String,
}

/// A payload extended with a challenge token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WithRecaptcha<T> {
    #[serde(flatten)]
    pub inner: T,
    pub g_recaptcha_response: RecaptchaToken,
}

/// Issues a challenge token for a named action.
#[async_trait::async_trait(?Send)]
pub trait RecaptchaService: Send + Sync {
    /// Run the challenge for `action` and return its token.
    ///
    /// # Errors
    ///
    /// Returns [`Libre311Error::Recaptcha`] if the provider fails, or
    /// [`Libre311Error::Unavailable`] outside the browser.
    async fn execute(&self, action: &str) -> Result<RecaptchaToken, Libre311Error>;
}

/// Run the challenge for `action` and attach its token to `inner`.
///
/// # Errors
///
/// Propagates any [`RecaptchaService::execute`] failure.
pub async fn wrap_with_recaptcha<T>(
    service: &dyn RecaptchaService,
    inner: T,
    action: &str,
) -> Result<WithRecaptcha<T>, Libre311Error> {
    let token = service.execute(action).await?;
    Ok(WithRecaptcha { inner, g_recaptcha_response: token })
}

/// Production implementation backed by reCAPTCHA Enterprise.
pub struct EnterpriseRecaptchaService {
    recaptcha_key: String,
}

impl EnterpriseRecaptchaService {
    #[must_use]
    pub fn new(props: RecaptchaServiceProps) -> Self {
        Self { recaptcha_key: props.recaptcha_key }
    }
}

#[async_trait::async_trait(?Send)]
impl RecaptchaService for EnterpriseRecaptchaService {
    async fn execute(&self, action: &str) -> Result<RecaptchaToken, Libre311Error> {
        #[cfg(feature = "hydrate")]
        {
            grecaptcha::execute(&self.recaptcha_key, action).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.recaptcha_key, action);
            Err(Libre311Error::Unavailable("recaptcha"))
        }
    }
}

/// Test double returning [`TEST_RECAPTCHA_TOKEN`].
pub struct MockRecaptchaService;

#[async_trait::async_trait(?Send)]
impl RecaptchaService for MockRecaptchaService {
    async fn execute(&self, _action: &str) -> Result<RecaptchaToken, Libre311Error> {
        Ok(TEST_RECAPTCHA_TOKEN.to_owned())
    }
}

/// Pick the test double in `test` mode, the real provider otherwise.
#[must_use]
pub fn recaptcha_service_factory(mode: Mode, props: RecaptchaServiceProps) -> Arc<dyn RecaptchaService> {
    match mode {
        Mode::Test => Arc::new(MockRecaptchaService),
        Mode::Dev | Mode::Production => Arc::new(EnterpriseRecaptchaService::new(props)),
    }
}

#[cfg(feature = "hydrate")]
mod grecaptcha {
    use wasm_bindgen::prelude::*;

    use super::{Libre311Error, RecaptchaToken};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = ["grecaptcha", "enterprise"], js_name = execute, catch)]
        fn enterprise_execute(site_key: &str, options: &JsValue) -> Result<js_sys::Promise, JsValue>;
    }

    pub(super) async fn execute(site_key: &str, action: &str) -> Result<RecaptchaToken, Libre311Error> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("action"), &JsValue::from_str(action)).map_err(js_error)?;
        let promise = enterprise_execute(site_key, &options).map_err(js_error)?;
        let token = wasm_bindgen_futures::JsFuture::from(promise).await.map_err(js_error)?;
        token
            .as_string()
            .ok_or_else(|| Libre311Error::Recaptcha("provider returned a non-string token".to_owned()))
    }

    fn js_error(value: JsValue) -> Libre311Error {
        Libre311Error::Recaptcha(format!("{value:?}"))
    }
}
