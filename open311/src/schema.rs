//! GeoReport v2 resource schemas.
//!
//! DESIGN
//! ======
//! Deserialization is the validation boundary: required fields must be
//! present, literal unions (`type`, `datatype`, `status`) only accept their
//! enumerated values, and numbers never coerce from strings. Optional fields
//! accept both absence and `null`; unknown fields are ignored.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Open311Error;

pub type JurisdictionId = String;
pub type ServiceCode = String;
pub type ServiceRequestId = u64;

// =============================================================================
// SERVICES
// =============================================================================

/// Service dispatch type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Realtime,
    Other,
}

/// A reportable issue category, e.g. a pothole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub service_code: ServiceCode,
    pub service_name: String,
    pub description: String,
    /// Whether the service has a definition with additional attributes.
    pub metadata: bool,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub keywords: Vec<String>,
    pub group: String,
}

// =============================================================================
// SERVICE DEFINITIONS
// =============================================================================

/// One option of a single- or multi-value list attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Submitted value, analogous to an html option's `value`.
    pub key: i64,
    /// Human readable label.
    pub name: String,
}

/// Attribute input type. List types carry their enumerated options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "datatype", rename_all = "lowercase")]
pub enum AttributeDatatype {
    String,
    Number,
    Datetime,
    Text,
    #[serde(rename = "singlevaluelist")]
    SingleValueList { values: Vec<AttributeValue> },
    #[serde(rename = "multivaluelist")]
    MultiValueList { values: Vec<AttributeValue> },
}

impl AttributeDatatype {
    /// Wire name of the datatype.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Datetime => "datetime",
            Self::Text => "text",
            Self::SingleValueList { .. } => "singlevaluelist",
            Self::MultiValueList { .. } => "multivaluelist",
        }
    }

    /// Enumerated options; empty for non-list datatypes.
    #[must_use]
    pub fn values(&self) -> &[AttributeValue] {
        match self {
            Self::SingleValueList { values } | Self::MultiValueList { values } => values,
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::SingleValueList { .. } | Self::MultiValueList { .. })
    }
}

/// A typed form-field descriptor of a service definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinitionAttribute {
    /// `true` when user input is needed; `false` when the attribute only
    /// presents information through `description`.
    pub variable: bool,
    pub code: String,
    #[serde(flatten)]
    pub datatype: AttributeDatatype,
    pub required: bool,
    /// Helper text describing the expected input.
    pub datatype_description: Option<String>,
    pub order: i64,
    /// The question shown to the user.
    pub description: String,
}

/// Additional attributes required when filing a request for a service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub service_code: ServiceCode,
    pub attributes: Vec<ServiceDefinitionAttribute>,
}

impl ServiceDefinition {
    /// Attributes sorted by their `order` field, stable for ties.
    #[must_use]
    pub fn attributes_in_order(&self) -> Vec<&ServiceDefinitionAttribute> {
        let mut attributes: Vec<_> = self.attributes.iter().collect();
        attributes.sort_by_key(|attribute| attribute.order);
        attributes
    }

    /// Look up an attribute by code.
    #[must_use]
    pub fn attribute(&self, code: &str) -> Option<&ServiceDefinitionAttribute> {
        self.attributes.iter().find(|attribute| attribute.code == code)
    }
}

// =============================================================================
// SERVICE REQUESTS
// =============================================================================

/// Lifecycle status of a service request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceRequestStatus {
    Open,
    Closed,
}

impl ServiceRequestStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for ServiceRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceRequestStatus {
    type Err = Open311Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Open" => Ok(Self::Open),
            "Closed" => Ok(Self::Closed),
            other => Err(Open311Error::Parse(format!("unknown service request status: {other}"))),
        }
    }
}

/// A filed citizen report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub service_request_id: ServiceRequestId,
    pub service_code: ServiceCode,
    pub status: ServiceRequestStatus,
    pub status_notes: Option<String>,
    pub service_name: String,
    pub description: Option<String>,
    pub agency_responsible: Option<String>,
    pub service_notice: Option<String>,
    /// ISO 8601 timestamp.
    pub requested_datetime: String,
    /// ISO 8601 timestamp.
    pub updated_datetime: String,
    /// ISO 8601 timestamp.
    pub expected_datetime: String,
    pub address: String,
    pub address_id: Option<i64>,
    pub zipcode: u32,
    pub lat: f64,
    pub long: f64,
    pub media_url: Option<String>,
}

/// Result of filing a service request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServiceRequestResponse {
    pub service_request_id: ServiceRequestId,
    pub service_notice: Option<String>,
    pub account_id: Option<i64>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a `GET /services` body.
///
/// # Errors
///
/// Returns [`Open311Error::Parse`] if the body does not match the schema.
pub fn parse_service_list(body: &str) -> Result<Vec<Service>, Open311Error> {
    parse(body)
}

/// Parse a `GET /services/{code}` body.
///
/// # Errors
///
/// Returns [`Open311Error::Parse`] if the body does not match the schema.
pub fn parse_service_definition(body: &str) -> Result<ServiceDefinition, Open311Error> {
    parse(body)
}

/// Parse a `GET /requests` body.
///
/// # Errors
///
/// Returns [`Open311Error::Parse`] if the body does not match the schema.
pub fn parse_service_requests(body: &str) -> Result<Vec<ServiceRequest>, Open311Error> {
    parse(body)
}

/// Parse a `GET /requests/{id}` body (a one-element list or a bare object).
///
/// # Errors
///
/// Returns [`Open311Error::Parse`] if the body does not match the schema or
/// the list is empty.
pub fn parse_service_request(body: &str) -> Result<ServiceRequest, Open311Error> {
    parse_first(body)
}

/// Parse a `POST /requests` body (a one-element list or a bare object).
///
/// # Errors
///
/// Returns [`Open311Error::Parse`] if the body does not match the schema or
/// the list is empty.
pub fn parse_create_response(body: &str) -> Result<CreateServiceRequestResponse, Open311Error> {
    parse_first(body)
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Open311Error> {
    serde_json::from_str(body).map_err(|e| Open311Error::Parse(e.to_string()))
}

fn parse_first<T: DeserializeOwned>(body: &str) -> Result<T, Open311Error> {
    let value: serde_json::Value = parse(body)?;
    let item = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Open311Error::Parse("expected one item, got an empty list".to_owned()))?,
        other => other,
    };
    serde_json::from_value(item).map_err(|e| Open311Error::Parse(e.to_string()))
}
