//! `Open311` over `reqwest`.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::time::Duration;

use open311::client::jurisdiction_query;
use open311::params::encode_query;
use open311::{
    CreateServiceRequestParams, CreateServiceRequestResponse, Endpoint, GetServiceRequestsParams, Open311,
    Open311Error, Pagination, Service, ServiceDefinition, ServiceRequest, ServiceRequestId, schema,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    recaptcha_token: Option<String>,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns the underlying error if the HTTP client cannot be built.
    pub fn new(base_url: &str, recaptcha_token: Option<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), recaptcha_token })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, Open311Error> {
        let resp = request.send().await.map_err(request_error)?;
        let status = resp.status();
        let pagination = Pagination::from_headers(|name| {
            resp.headers().get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
        });
        let body = resp.text().await.map_err(request_error)?;
        if !status.is_success() {
            return Err(Open311Error::from_status(status.as_u16(), &body));
        }
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");
        if let Some(page) = pagination {
            tracing::info!(
                page = page.page_number,
                total_pages = page.total_pages,
                total_size = page.total_size,
                "pagination"
            );
        }
        Ok(body)
    }

    async fn get(&self, endpoint: Endpoint<'_>, query: &[(&str, String)]) -> Result<String, Open311Error> {
        let url = endpoint.url(&self.base_url, query)?;
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url)).await
    }
}

#[async_trait::async_trait(?Send)]
impl Open311 for HttpClient {
    async fn get_service_list(&self, jurisdiction_id: Option<&str>) -> Result<Vec<Service>, Open311Error> {
        let body = self.get(Endpoint::ServiceList, &jurisdiction_query(jurisdiction_id)).await?;
        schema::parse_service_list(&body)
    }

    async fn get_service_definition(
        &self,
        jurisdiction_id: Option<&str>,
        service_code: &str,
    ) -> Result<ServiceDefinition, Open311Error> {
        let body = self.get(Endpoint::ServiceDefinition(service_code), &jurisdiction_query(jurisdiction_id)).await?;
        schema::parse_service_definition(&body)
    }

    async fn create_service_request(
        &self,
        params: &CreateServiceRequestParams,
    ) -> Result<CreateServiceRequestResponse, Open311Error> {
        let url = Endpoint::CreateServiceRequest.url(&self.base_url, &[])?;
        let form = create_form(params, self.recaptcha_token.as_deref())?;
        tracing::debug!(%url, "POST");
        let request = self.http.post(url).header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE).body(form);
        let body = self.send(request).await?;
        schema::parse_create_response(&body)
    }

    async fn get_service_requests(
        &self,
        jurisdiction_id: Option<&str>,
        params: &GetServiceRequestsParams,
    ) -> Result<Vec<ServiceRequest>, Open311Error> {
        let body = self.get(Endpoint::ServiceRequests, &params.query_pairs(jurisdiction_id)).await?;
        schema::parse_service_requests(&body)
    }

    async fn get_service_request(
        &self,
        jurisdiction_id: Option<&str>,
        service_request_id: ServiceRequestId,
    ) -> Result<ServiceRequest, Open311Error> {
        let body = self.get(Endpoint::ServiceRequest(service_request_id), &jurisdiction_query(jurisdiction_id)).await?;
        schema::parse_service_request(&body)
    }
}

/// Form body for a submission, with the reCAPTCHA token appended when given.
fn create_form(params: &CreateServiceRequestParams, recaptcha_token: Option<&str>) -> Result<String, Open311Error> {
    let mut form = params.to_form_body()?;
    if let Some(token) = recaptcha_token {
        form.push('&');
        form.push_str(&encode_query(&[("g_recaptcha_response", token.to_owned())])?);
    }
    Ok(form)
}

fn request_error(error: reqwest::Error) -> Open311Error {
    Open311Error::Request(error.to_string())
}
