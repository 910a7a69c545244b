//! Shared fixtures for unit tests.

use std::sync::Mutex;

use open311::{
    CreateServiceRequestParams, CreateServiceRequestResponse, GetServiceRequestsParams, Pagination, Service,
    ServiceDefinition, ServiceRequest, ServiceRequestStatus,
};
use tokio::sync::oneshot;

use crate::net::Libre311Error;
use crate::net::libre311::{Libre311Service, ServiceRequestsResponse};
use crate::net::unity_auth::UnityAuthLoginResponse;

pub fn service_request(id: u64) -> ServiceRequest {
    ServiceRequest {
        service_request_id: id,
        service_code: "006".to_owned(),
        status: ServiceRequestStatus::Open,
        status_notes: None,
        service_name: "Sidewalk and Curb Issues".to_owned(),
        description: Some("Cracked curb".to_owned()),
        agency_responsible: Some("Public Works".to_owned()),
        service_notice: None,
        requested_datetime: "2024-04-14T06:37:38-08:00".to_owned(),
        updated_datetime: "2024-04-14T06:37:38-08:00".to_owned(),
        expected_datetime: "2024-04-20T06:37:38-08:00".to_owned(),
        address: "8TH AVE and JUDAH ST".to_owned(),
        address_id: None,
        zipcode: 94122,
        lat: 37.762,
        long: -122.464,
        media_url: None,
    }
}

/// Recording `Libre311Service` double.
///
/// Listing returns one request whose id is the filter's page number (or the
/// requested ids), so tests can tell responses apart. The first listing call
/// waits on `list_gate` when one is installed.
#[derive(Default)]
pub struct MockLibre311Service {
    pub auth: Mutex<Option<String>>,
    pub list_calls: Mutex<Vec<GetServiceRequestsParams>>,
    pub detail_calls: Mutex<Vec<u64>>,
    pub list_error: Mutex<Option<Libre311Error>>,
    pub detail_error: Mutex<Option<Libre311Error>>,
    pub list_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl MockLibre311Service {
    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait(?Send)]
impl Libre311Service for MockLibre311Service {
    fn set_auth_info(&self, auth: Option<&UnityAuthLoginResponse>) {
        *self.auth.lock().unwrap() = auth.map(UnityAuthLoginResponse::authorization);
    }

    fn auth_header(&self) -> Option<String> {
        self.auth.lock().unwrap().clone()
    }

    async fn get_service_list(&self) -> Result<Vec<Service>, Libre311Error> {
        Ok(Vec::new())
    }

    async fn get_service_definition(&self, service_code: &str) -> Result<ServiceDefinition, Libre311Error> {
        Ok(ServiceDefinition { service_code: service_code.to_owned(), attributes: Vec::new() })
    }

    async fn create_service_request(
        &self,
        _params: CreateServiceRequestParams,
    ) -> Result<CreateServiceRequestResponse, Libre311Error> {
        Ok(CreateServiceRequestResponse { service_request_id: 1, service_notice: None, account_id: None })
    }

    async fn get_service_requests(
        &self,
        params: &GetServiceRequestsParams,
    ) -> Result<ServiceRequestsResponse, Libre311Error> {
        self.list_calls.lock().unwrap().push(params.clone());
        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        let requests: Vec<ServiceRequest> = match params {
            GetServiceRequestsParams::Ids(ids) => ids.iter().copied().map(service_request).collect(),
            GetServiceRequestsParams::Filter(filter) => {
                vec![service_request(u64::from(filter.page_number.unwrap_or(0)))]
            }
        };
        let pagination = Pagination::single_page(requests.len());
        Ok(ServiceRequestsResponse::new(requests, pagination))
    }

    async fn get_service_request(&self, id: u64) -> Result<ServiceRequest, Libre311Error> {
        self.detail_calls.lock().unwrap().push(id);
        match self.detail_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(service_request(id)),
        }
    }
}
