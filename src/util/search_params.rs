//! Mapping between the issues page URL query and service request filters.
//!
//! DESIGN
//! ======
//! The page URL is the source of truth for the active filter. Keys are
//! `service_request_id`, `pageNumber`, `serviceCode`, `start_date`, `endDate`
//! and `status`; `service_request_id` wins over every other key when at least
//! one of its ids parses. Values that do not parse are dropped with a console
//! warning rather than failing the whole navigation.

#[cfg(test)]
#[path = "search_params_test.rs"]
mod search_params_test;

use open311::params::{join_ids, join_statuses};
use open311::{GetServiceRequestsParams, Open311Error, ServiceRequestId, ServiceRequestStatus, ServiceRequestsFilter};

pub const SERVICE_REQUEST_ID_KEY: &str = "service_request_id";
pub const PAGE_NUMBER_KEY: &str = "pageNumber";
pub const SERVICE_CODE_KEY: &str = "serviceCode";
pub const START_DATE_KEY: &str = "start_date";
pub const END_DATE_KEY: &str = "endDate";
pub const STATUS_KEY: &str = "status";

/// Derive request parameters from a query string, with or without its `?`.
#[must_use]
pub fn to_service_request_params(search: &str) -> GetServiceRequestsParams {
    let pairs = parse_pairs(search);
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    };

    let ids = get(SERVICE_REQUEST_ID_KEY).map(parse_ids).unwrap_or_default();
    if !ids.is_empty() {
        return GetServiceRequestsParams::Ids(ids);
    }

    let page_number = get(PAGE_NUMBER_KEY).and_then(|raw| match raw.trim().parse::<u32>() {
        Ok(page) => Some(page),
        Err(_) => {
            leptos::logging::warn!("ignoring invalid {PAGE_NUMBER_KEY}: {raw}");
            None
        }
    });

    GetServiceRequestsParams::Filter(ServiceRequestsFilter {
        page_number,
        service_code: get(SERVICE_CODE_KEY).map(str::to_owned),
        start_date: get(START_DATE_KEY).map(str::to_owned),
        end_date: get(END_DATE_KEY).map(str::to_owned),
        status: get(STATUS_KEY).map(parse_statuses).unwrap_or_default(),
    })
}

/// Inverse of [`to_service_request_params`]: URL query pairs for `params`.
#[must_use]
pub fn to_search_params(params: &GetServiceRequestsParams) -> Vec<(&'static str, String)> {
    match params {
        GetServiceRequestsParams::Ids(ids) => vec![(SERVICE_REQUEST_ID_KEY, join_ids(ids))],
        GetServiceRequestsParams::Filter(filter) => {
            let mut pairs = Vec::new();
            if let Some(page_number) = filter.page_number {
                pairs.push((PAGE_NUMBER_KEY, page_number.to_string()));
            }
            if let Some(service_code) = &filter.service_code {
                pairs.push((SERVICE_CODE_KEY, service_code.clone()));
            }
            if let Some(start_date) = &filter.start_date {
                pairs.push((START_DATE_KEY, start_date.clone()));
            }
            if let Some(end_date) = &filter.end_date {
                pairs.push((END_DATE_KEY, end_date.clone()));
            }
            if !filter.status.is_empty() {
                pairs.push((STATUS_KEY, join_statuses(&filter.status)));
            }
            pairs
        }
    }
}

/// Encoded query string (no leading `?`) for `params`.
///
/// # Errors
///
/// Returns [`Open311Error::Encode`] if a value cannot be encoded.
pub fn to_query_string(params: &GetServiceRequestsParams) -> Result<String, Open311Error> {
    open311::params::encode_query(&to_search_params(params))
}

fn parse_pairs(search: &str) -> Vec<(String, String)> {
    let query = search.strip_prefix('?').unwrap_or(search);
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs,
        Err(e) => {
            leptos::logging::warn!("ignoring malformed query string: {e}");
            Vec::new()
        }
    }
}

fn parse_ids(raw: &str) -> Vec<ServiceRequestId> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<ServiceRequestId>() {
            Ok(id) => Some(id),
            Err(_) => {
                leptos::logging::warn!("ignoring invalid {SERVICE_REQUEST_ID_KEY}: {token}");
                None
            }
        })
        .collect()
}

fn parse_statuses(raw: &str) -> Vec<ServiceRequestStatus> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<ServiceRequestStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                leptos::logging::warn!("{e}");
                None
            }
        })
        .collect()
}
