//! The GeoReport v2 operation set and endpoint routing.
//!
//! Transports implement [`Open311`]; [`Endpoint`] keeps the path layout in
//! one place so every implementation hits the same URLs.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use crate::error::Open311Error;
use crate::params::{CreateServiceRequestParams, GetServiceRequestsParams, encode_query};
use crate::schema::{CreateServiceRequestResponse, Service, ServiceDefinition, ServiceRequest, ServiceRequestId};

/// A GeoReport v2 resource path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    ServiceList,
    ServiceDefinition(&'a str),
    CreateServiceRequest,
    ServiceRequests,
    ServiceRequest(ServiceRequestId),
}

impl Endpoint<'_> {
    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ServiceList => "/services.json".to_owned(),
            Self::ServiceDefinition(service_code) => format!("/services/{service_code}.json"),
            Self::CreateServiceRequest | Self::ServiceRequests => "/requests.json".to_owned(),
            Self::ServiceRequest(id) => format!("/requests/{id}.json"),
        }
    }

    /// Absolute URL with an encoded query string when `query` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Open311Error::Encode`] if the query cannot be encoded.
    pub fn url(&self, base_url: &str, query: &[(&str, String)]) -> Result<String, Open311Error> {
        let base = base_url.trim_end_matches('/');
        let path = self.path();
        if query.is_empty() {
            return Ok(format!("{base}{path}"));
        }
        Ok(format!("{base}{path}?{}", encode_query(query)?))
    }
}

/// Query pairs carrying only the jurisdiction, if any.
#[must_use]
pub fn jurisdiction_query(jurisdiction_id: Option<&str>) -> Vec<(&'static str, String)> {
    jurisdiction_id
        .map(|id| vec![("jurisdiction_id", id.to_owned())])
        .unwrap_or_default()
}

/// The five GeoReport v2 operations.
///
/// A `None` jurisdiction lets the server resolve it from the request host.
#[async_trait::async_trait(?Send)]
pub trait Open311 {
    /// <https://wiki.open311.org/GeoReport_v2/#get-service-list>
    async fn get_service_list(&self, jurisdiction_id: Option<&str>) -> Result<Vec<Service>, Open311Error>;

    /// <https://wiki.open311.org/GeoReport_v2/#get-service-definition>
    async fn get_service_definition(
        &self,
        jurisdiction_id: Option<&str>,
        service_code: &str,
    ) -> Result<ServiceDefinition, Open311Error>;

    /// <https://wiki.open311.org/GeoReport_v2/#post-service-request>
    async fn create_service_request(
        &self,
        params: &CreateServiceRequestParams,
    ) -> Result<CreateServiceRequestResponse, Open311Error>;

    /// <https://wiki.open311.org/GeoReport_v2/#get-service-requests>
    async fn get_service_requests(
        &self,
        jurisdiction_id: Option<&str>,
        params: &GetServiceRequestsParams,
    ) -> Result<Vec<ServiceRequest>, Open311Error>;

    /// <https://wiki.open311.org/GeoReport_v2/#get-service-request>
    async fn get_service_request(
        &self,
        jurisdiction_id: Option<&str>,
        service_request_id: ServiceRequestId,
    ) -> Result<ServiceRequest, Open311Error>;
}
