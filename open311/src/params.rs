//! Request parameters and their wire encodings.
//!
//! DESIGN
//! ======
//! Listing parameters are either an explicit id set or a filter; the two are
//! mutually exclusive, so they are modeled as an enum rather than a struct of
//! options. Service request creation is form-encoded, with attribute
//! responses flattened into `attribute[CODE]` keys, or `attribute[CODE][]`
//! for multi-value lists.

#[cfg(test)]
#[path = "params_test.rs"]
mod params_test;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Open311Error;
use crate::schema::{
    AttributeDatatype, JurisdictionId, ServiceCode, ServiceDefinition, ServiceRequestId, ServiceRequestStatus,
};

// =============================================================================
// LISTING
// =============================================================================

/// Optional filters for listing service requests. An empty `status` means any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceRequestsFilter {
    /// Zero-based page index.
    pub page_number: Option<u32>,
    pub service_code: Option<ServiceCode>,
    /// ISO 8601 lower bound on `requested_datetime`.
    pub start_date: Option<String>,
    /// ISO 8601 upper bound on `requested_datetime`.
    pub end_date: Option<String>,
    pub status: Vec<ServiceRequestStatus>,
}

/// Parameters for `GET /requests`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GetServiceRequestsParams {
    /// Fetch exactly these requests; no other filter applies.
    Ids(Vec<ServiceRequestId>),
    Filter(ServiceRequestsFilter),
}

impl Default for GetServiceRequestsParams {
    fn default() -> Self {
        Self::Filter(ServiceRequestsFilter::default())
    }
}

impl GetServiceRequestsParams {
    /// API query pairs, led by `jurisdiction_id` when one is given.
    #[must_use]
    pub fn query_pairs(&self, jurisdiction_id: Option<&str>) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(jurisdiction_id) = jurisdiction_id {
            pairs.push(("jurisdiction_id", jurisdiction_id.to_owned()));
        }
        match self {
            Self::Ids(ids) => {
                pairs.push(("service_request_id", join_ids(ids)));
            }
            Self::Filter(filter) => {
                if let Some(service_code) = &filter.service_code {
                    pairs.push(("service_code", service_code.clone()));
                }
                if let Some(start_date) = &filter.start_date {
                    pairs.push(("start_date", start_date.clone()));
                }
                if let Some(end_date) = &filter.end_date {
                    pairs.push(("end_date", end_date.clone()));
                }
                if !filter.status.is_empty() {
                    pairs.push(("status", join_statuses(&filter.status)));
                }
                if let Some(page_number) = filter.page_number {
                    pairs.push(("page", page_number.to_string()));
                }
            }
        }
        pairs
    }
}

/// Comma-join request ids, e.g. `1,2,3`.
#[must_use]
pub fn join_ids(ids: &[ServiceRequestId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// Comma-join statuses, e.g. `Open,Closed`.
#[must_use]
pub fn join_statuses(status: &[ServiceRequestStatus]) -> String {
    status.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(",")
}

/// Percent-encode query pairs into `a=b&c=d` form.
///
/// # Errors
///
/// Returns [`Open311Error::Encode`] if a pair cannot be encoded.
pub fn encode_query(pairs: &[(&str, String)]) -> Result<String, Open311Error> {
    serde_urlencoded::to_string(pairs).map_err(|e| Open311Error::Encode(e.to_string()))
}

// =============================================================================
// CREATION
// =============================================================================

/// A user's answer to one service definition attribute. A multi-value list
/// gets one response per selected value, each with `multi` set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeResponse {
    pub code: String,
    pub value: String,
    pub multi: bool,
}

impl AttributeResponse {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self { code: code.into(), value: value.into(), multi: false }
    }

    /// One selection of a multi-value list attribute.
    pub fn multi(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self { code: code.into(), value: value.into(), multi: true }
    }
}

/// Parameters for `POST /requests`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateServiceRequestParams {
    pub jurisdiction_id: Option<JurisdictionId>,
    pub service_code: ServiceCode,
    pub lat: f64,
    pub long: f64,
    pub address_string: String,
    pub description: String,
    pub media_url: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub attributes: Vec<AttributeResponse>,
}

impl CreateServiceRequestParams {
    /// Form keys for attribute responses: `attribute[CODE][]` for multi-value
    /// answers and for any code answered more than once, `attribute[CODE]`
    /// otherwise.
    #[must_use]
    pub fn attribute_pairs(&self) -> Vec<(String, &str)> {
        self.attributes
            .iter()
            .map(|response| {
                let repeated = self.attributes.iter().filter(|other| other.code == response.code).count() > 1;
                let key = if response.multi || repeated {
                    format!("attribute[{}][]", response.code)
                } else {
                    format!("attribute[{}]", response.code)
                };
                (key, response.value.as_str())
            })
            .collect()
    }

    /// Mark every response to a `multivaluelist` attribute of `definition`
    /// as multi-value. Responses to unknown codes are left as they are.
    pub fn apply_definition(&mut self, definition: &ServiceDefinition) {
        for response in &mut self.attributes {
            if let Some(attribute) = definition.attribute(&response.code) {
                response.multi = matches!(attribute.datatype, AttributeDatatype::MultiValueList { .. });
            }
        }
    }

    /// Responses to list attributes whose value is not one of the listed
    /// keys, as `(code, value)`.
    #[must_use]
    pub fn invalid_list_values(&self, definition: &ServiceDefinition) -> Vec<(&str, &str)> {
        self.attributes
            .iter()
            .filter(|response| {
                definition.attribute(&response.code).is_some_and(|attribute| {
                    let value = response.value.trim();
                    attribute.datatype.is_list()
                        && !attribute.datatype.values().iter().any(|option| option.key.to_string() == value)
                })
            })
            .map(|response| (response.code.as_str(), response.value.as_str()))
            .collect()
    }

    /// Codes of required input attributes that have no response.
    #[must_use]
    pub fn missing_required_attributes<'a>(&self, definition: &'a ServiceDefinition) -> Vec<&'a str> {
        definition
            .attributes_in_order()
            .into_iter()
            .filter(|attribute| attribute.variable && attribute.required)
            .filter(|attribute| !self.attributes.iter().any(|response| response.code == attribute.code))
            .map(|attribute| attribute.code.as_str())
            .collect()
    }

    /// Encode as an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns [`Open311Error::Encode`] if a field cannot be encoded.
    pub fn to_form_body(&self) -> Result<String, Open311Error> {
        serde_urlencoded::to_string(self).map_err(|e| Open311Error::Encode(e.to_string()))
    }
}

impl Serialize for CreateServiceRequestParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(jurisdiction_id) = &self.jurisdiction_id {
            map.serialize_entry("jurisdiction_id", jurisdiction_id)?;
        }
        map.serialize_entry("service_code", &self.service_code)?;
        map.serialize_entry("lat", &self.lat.to_string())?;
        map.serialize_entry("long", &self.long.to_string())?;
        map.serialize_entry("address_string", &self.address_string)?;
        map.serialize_entry("description", &self.description)?;
        let optional = [
            ("media_url", &self.media_url),
            ("email", &self.email),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone", &self.phone),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        for (key, value) in self.attribute_pairs() {
            map.serialize_entry(&key, value)?;
        }
        map.end()
    }
}
