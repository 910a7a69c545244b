//! Open311 GeoReport v2 wire model shared by the browser client and the CLI.
//!
//! This crate owns the typed contract for the five GeoReport operations:
//! resource schemas, request parameters, query/form marshaling, pagination
//! metadata and the server error shape. Transport lives elsewhere; both the
//! `gloo-net` client in the browser crate and the `reqwest` client in the CLI
//! build requests and parse responses through the helpers here so the two
//! never drift apart.

pub mod client;
pub mod error;
pub mod pagination;
pub mod params;
pub mod schema;

pub use client::{Endpoint, Open311};
pub use error::{Open311Error, ServerError, ServerErrorResponse};
pub use pagination::{EMPTY_PAGINATION, Pagination};
pub use params::{AttributeResponse, CreateServiceRequestParams, GetServiceRequestsParams, ServiceRequestsFilter};
pub use schema::{
    AttributeDatatype, AttributeValue, CreateServiceRequestResponse, JurisdictionId, Service, ServiceCode,
    ServiceDefinition, ServiceDefinitionAttribute, ServiceRequest, ServiceRequestId, ServiceRequestStatus,
    ServiceType,
};
