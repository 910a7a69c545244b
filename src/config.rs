//! Client configuration read from the build environment.
//!
//! Values are baked in at compile time through `option_env!`, so a WASM
//! bundle carries the endpoints it was built for. [`Libre311Config::from_lookup`]
//! takes any key lookup so the same parsing runs in tests.

use std::fmt;
use std::str::FromStr;

use crate::context::libre311::Libre311ContextProviderProps;
use crate::net::libre311::Libre311ServiceProps;
use crate::net::recaptcha::RecaptchaServiceProps;
use crate::net::unity_auth::UnityAuthServiceProps;

pub const API_URL_VAR: &str = "LIBRE311_API_URL";
pub const UNITY_AUTH_URL_VAR: &str = "UNITY_AUTH_URL";
pub const RECAPTCHA_KEY_VAR: &str = "RECAPTCHA_KEY";
pub const MODE_VAR: &str = "LIBRE311_MODE";
pub const JURISDICTION_ID_VAR: &str = "LIBRE311_JURISDICTION_ID";

/// Deployment mode. `Test` swaps external providers for fixed doubles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    Test,
    Dev,
    #[default]
    Production,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Dev => "dev",
            Self::Production => "prod",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "test" => Ok(Self::Test),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidMode(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required config: {0}")]
    Missing(&'static str),
    #[error("unknown LIBRE311_MODE: {0} (expected test, dev or prod)")]
    InvalidMode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Libre311Config {
    pub mode: Mode,
    pub api_url: String,
    pub unity_auth_url: String,
    /// Empty in `test` mode when unset.
    pub recaptcha_key: String,
    pub jurisdiction_id: Option<String>,
}

impl Libre311Config {
    /// Read config baked into the binary at compile time.
    ///
    /// Required: `LIBRE311_API_URL`, `UNITY_AUTH_URL`, and `RECAPTCHA_KEY`
    /// unless `LIBRE311_MODE=test`.
    ///
    /// Optional: `LIBRE311_MODE` (default `prod`), `LIBRE311_JURISDICTION_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or the mode is
    /// unknown.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                API_URL_VAR => option_env!("LIBRE311_API_URL"),
                UNITY_AUTH_URL_VAR => option_env!("UNITY_AUTH_URL"),
                RECAPTCHA_KEY_VAR => option_env!("RECAPTCHA_KEY"),
                MODE_VAR => option_env!("LIBRE311_MODE"),
                JURISDICTION_ID_VAR => option_env!("LIBRE311_JURISDICTION_ID"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Libre311Config::from_build_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let mode = get(MODE_VAR).map_or(Ok(Mode::default()), |raw| raw.parse::<Mode>())?;
        let api_url = parse_url(get(API_URL_VAR), API_URL_VAR)?;
        let unity_auth_url = parse_url(get(UNITY_AUTH_URL_VAR), UNITY_AUTH_URL_VAR)?;
        let recaptcha_key = match (get(RECAPTCHA_KEY_VAR), mode) {
            (Some(key), _) => key,
            (None, Mode::Test) => String::new(),
            (None, _) => return Err(ConfigError::Missing(RECAPTCHA_KEY_VAR)),
        };

        Ok(Self { mode, api_url, unity_auth_url, recaptcha_key, jurisdiction_id: get(JURISDICTION_ID_VAR) })
    }

    #[must_use]
    pub fn into_provider_props(self) -> Libre311ContextProviderProps {
        Libre311ContextProviderProps {
            mode: self.mode,
            libre311: Libre311ServiceProps { base_url: self.api_url, jurisdiction_id: self.jurisdiction_id },
            recaptcha: RecaptchaServiceProps { recaptcha_key: self.recaptcha_key },
            unity_auth: UnityAuthServiceProps { base_url: self.unity_auth_url },
        }
    }
}

fn parse_url(raw: Option<String>, var: &'static str) -> Result<String, ConfigError> {
    raw.map(|url| url.trim_end_matches('/').to_owned()).ok_or(ConfigError::Missing(var))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
