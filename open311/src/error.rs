//! Error types for Open311 operations.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses are split by body: a body matching the server's
//! structured error shape becomes [`Open311Error::Server`], anything else is
//! kept verbatim in [`Open311Error::Status`] so callers can still log it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced by Open311 client operations.
///
/// `Clone` so failures can be stored inside reactive result stores.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Open311Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server returned a non-success status with a structured error body.
    #[error("server error {status}: {error}")]
    Server { status: u16, error: ServerErrorResponse },

    /// The server returned a non-success status with an unrecognized body.
    #[error("unexpected response status {status}")]
    Status { status: u16, body: String },

    /// The response body does not conform to the expected schema.
    #[error("invalid response payload: {0}")]
    Parse(String),

    /// Request parameters could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(String),
}

impl Open311Error {
    /// Classify a non-success response by its body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        match ServerErrorResponse::parse(body) {
            Some(error) => Self::Server { status, error },
            None => Self::Status { status, body: body.to_owned() },
        }
    }
}

/// Structured error body returned by the Libre311 server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerErrorResponse {
    /// Top-level summary, e.g. `"Bad Request"`.
    pub message: String,
    /// Server log reference for support lookups.
    pub logref: String,
    /// Request path that failed, when reported.
    pub path: Option<String>,
    /// Field-level validation errors.
    #[serde(rename = "_embedded")]
    pub embedded: Option<EmbeddedErrors>,
}

/// Container for field-level errors in a [`ServerErrorResponse`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedErrors {
    #[serde(default)]
    pub errors: Vec<ServerError>,
}

/// A single field-level validation error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    pub message: String,
    pub path: Option<String>,
}

impl ServerErrorResponse {
    /// Parse a response body, returning `None` when it is not a server error shape.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// First field-level error message, falling back to the top-level message.
    #[must_use]
    pub fn first_error_message(&self) -> &str {
        self.embedded
            .as_ref()
            .and_then(|embedded| embedded.errors.first())
            .map_or(self.message.as_str(), |error| error.message.as_str())
    }
}

impl fmt::Display for ServerErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (logref: {})", self.message, self.logref)
    }
}
