//! Libre311 API service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the GeoReport v2 endpoints exposed by a Libre311 server. URLs,
//! query strings, form bodies and response parsing all come from the
//! `open311` crate; this module only adds the browser transport, the bearer
//! credential and the reCAPTCHA token on submissions.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`Open311Error::Server`] when the body is the
//! server's structured error, [`Open311Error::Status`] otherwise. Outside the
//! browser every call returns [`Libre311Error::Unavailable`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "libre311_test.rs"]
mod libre311_test;

use std::sync::{Arc, PoisonError, RwLock};

use open311::client::jurisdiction_query;
use open311::schema;
use open311::{
    CreateServiceRequestParams, CreateServiceRequestResponse, EMPTY_PAGINATION, Endpoint, GetServiceRequestsParams,
    Open311Error, Pagination, Service, ServiceDefinition, ServiceRequest, ServiceRequestId,
};
use serde::{Deserialize, Serialize};

use super::error::Libre311Error;
use super::recaptcha::{RecaptchaService, WithRecaptcha, wrap_with_recaptcha};
use super::unity_auth::UnityAuthLoginResponse;

/// reCAPTCHA action name used when filing a request.
pub const CREATE_SERVICE_REQUEST_ACTION: &str = "create_service_request";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Libre311ServiceProps {
    pub base_url: String,
    /// Sent with every request when set; otherwise the server resolves the
    /// jurisdiction from the request host.
    pub jurisdiction_id: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequestsMetadata {
    pub pagination: Pagination,
}

/// One page of service requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestsResponse {
    pub service_requests: Vec<ServiceRequest>,
    pub metadata: ServiceRequestsMetadata,
}

impl ServiceRequestsResponse {
    #[must_use]
    pub fn new(service_requests: Vec<ServiceRequest>, pagination: Pagination) -> Self {
        Self { service_requests, metadata: ServiceRequestsMetadata { pagination } }
    }

    /// A page holding only `request`, without server pagination.
    #[must_use]
    pub fn single(request: ServiceRequest) -> Self {
        Self::new(vec![request], EMPTY_PAGINATION)
    }

    #[must_use]
    pub fn find(&self, id: ServiceRequestId) -> Option<&ServiceRequest> {
        self.service_requests.iter().find(|request| request.service_request_id == id)
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.metadata.pagination
    }
}

/// Operations the UI performs against a Libre311 server.
#[async_trait::async_trait(?Send)]
pub trait Libre311Service: Send + Sync {
    /// Replace the credential sent with subsequent requests; `None` clears it.
    fn set_auth_info(&self, auth: Option<&UnityAuthLoginResponse>);

    /// Current `Authorization` header value, if logged in.
    fn auth_header(&self) -> Option<String>;

    async fn get_service_list(&self) -> Result<Vec<Service>, Libre311Error>;

    async fn get_service_definition(&self, service_code: &str) -> Result<ServiceDefinition, Libre311Error>;

    /// File a request. The jurisdiction defaults to the configured one and a
    /// reCAPTCHA token is attached.
    async fn create_service_request(
        &self,
        params: CreateServiceRequestParams,
    ) -> Result<CreateServiceRequestResponse, Libre311Error>;

    async fn get_service_requests(
        &self,
        params: &GetServiceRequestsParams,
    ) -> Result<ServiceRequestsResponse, Libre311Error>;

    async fn get_service_request(&self, id: ServiceRequestId) -> Result<ServiceRequest, Libre311Error>;
}

/// Browser implementation over `gloo-net`.
pub struct Libre311Client {
    base_url: String,
    jurisdiction_id: Option<String>,
    authorization: RwLock<Option<String>>,
    recaptcha: Arc<dyn RecaptchaService>,
}

impl Libre311Client {
    #[must_use]
    pub fn new(props: Libre311ServiceProps, recaptcha: Arc<dyn RecaptchaService>) -> Self {
        Self {
            base_url: props.base_url.trim_end_matches('/').to_owned(),
            jurisdiction_id: props.jurisdiction_id,
            authorization: RwLock::new(None),
            recaptcha,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn jurisdiction(&self) -> Option<&str> {
        self.jurisdiction_id.as_deref()
    }

    fn endpoint_url(&self, endpoint: Endpoint<'_>, query: &[(&str, String)]) -> Result<String, Libre311Error> {
        Ok(endpoint.url(&self.base_url, query)?)
    }

    fn service_requests_url(&self, params: &GetServiceRequestsParams) -> Result<String, Libre311Error> {
        self.endpoint_url(Endpoint::ServiceRequests, &params.query_pairs(self.jurisdiction()))
    }

    /// Fill in the configured jurisdiction when `params` has none.
    fn with_jurisdiction(&self, mut params: CreateServiceRequestParams) -> CreateServiceRequestParams {
        if params.jurisdiction_id.is_none() {
            params.jurisdiction_id.clone_from(&self.jurisdiction_id);
        }
        params
    }

    async fn send(&self, method: HttpMethod, url: &str, form: Option<String>) -> Result<HttpResponse, Libre311Error> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let mut builder = match method {
                HttpMethod::Get => Request::get(url),
                HttpMethod::Post => Request::post(url),
            };
            if let Some(authorization) = self.auth_header() {
                builder = builder.header("Authorization", &authorization);
            }
            let request = match form {
                Some(body) => builder.header("Content-Type", FORM_CONTENT_TYPE).body(body),
                None => builder.build(),
            }
            .map_err(request_error)?;
            let resp = request.send().await.map_err(request_error)?;
            let headers = resp.headers();
            let pagination = Pagination::from_headers(|name| headers.get(name));
            let status = resp.status();
            let body = resp.text().await.map_err(request_error)?;
            if !resp.ok() {
                return Err(Open311Error::from_status(status, &body).into());
            }
            Ok(HttpResponse { body, pagination })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, url, form);
            Err(Libre311Error::Unavailable("libre311 api"))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Libre311Service for Libre311Client {
    fn set_auth_info(&self, auth: Option<&UnityAuthLoginResponse>) {
        *self.authorization.write().unwrap_or_else(PoisonError::into_inner) =
            auth.map(UnityAuthLoginResponse::authorization);
    }

    fn auth_header(&self) -> Option<String> {
        self.authorization.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn get_service_list(&self) -> Result<Vec<Service>, Libre311Error> {
        let url = self.endpoint_url(Endpoint::ServiceList, &jurisdiction_query(self.jurisdiction()))?;
        let resp = self.send(HttpMethod::Get, &url, None).await?;
        Ok(schema::parse_service_list(&resp.body)?)
    }

    async fn get_service_definition(&self, service_code: &str) -> Result<ServiceDefinition, Libre311Error> {
        let url =
            self.endpoint_url(Endpoint::ServiceDefinition(service_code), &jurisdiction_query(self.jurisdiction()))?;
        let resp = self.send(HttpMethod::Get, &url, None).await?;
        Ok(schema::parse_service_definition(&resp.body)?)
    }

    async fn create_service_request(
        &self,
        params: CreateServiceRequestParams,
    ) -> Result<CreateServiceRequestResponse, Libre311Error> {
        let params = self.with_jurisdiction(params);
        let payload = wrap_with_recaptcha(self.recaptcha.as_ref(), params, CREATE_SERVICE_REQUEST_ACTION).await?;
        let form = create_form_body(&payload)?;
        let url = self.endpoint_url(Endpoint::CreateServiceRequest, &[])?;
        let resp = self.send(HttpMethod::Post, &url, Some(form)).await?;
        Ok(schema::parse_create_response(&resp.body)?)
    }

    async fn get_service_requests(
        &self,
        params: &GetServiceRequestsParams,
    ) -> Result<ServiceRequestsResponse, Libre311Error> {
        let url = self.service_requests_url(params)?;
        let resp = self.send(HttpMethod::Get, &url, None).await?;
        let service_requests = schema::parse_service_requests(&resp.body)?;
        let pagination = resp.pagination.unwrap_or_else(|| Pagination::single_page(service_requests.len()));
        Ok(ServiceRequestsResponse::new(service_requests, pagination))
    }

    async fn get_service_request(&self, id: ServiceRequestId) -> Result<ServiceRequest, Libre311Error> {
        let url = self.endpoint_url(Endpoint::ServiceRequest(id), &jurisdiction_query(self.jurisdiction()))?;
        let resp = self.send(HttpMethod::Get, &url, None).await?;
        Ok(schema::parse_service_request(&resp.body)?)
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
struct HttpResponse {
    body: String,
    pagination: Option<Pagination>,
}

#[cfg(feature = "hydrate")]
fn request_error(error: gloo_net::Error) -> Libre311Error {
    Open311Error::Request(error.to_string()).into()
}

/// Form-encode a submission including its reCAPTCHA token.
fn create_form_body(payload: &WithRecaptcha<CreateServiceRequestParams>) -> Result<String, Libre311Error> {
    serde_urlencoded::to_string(payload).map_err(|e| Open311Error::Encode(e.to_string()).into())
}
