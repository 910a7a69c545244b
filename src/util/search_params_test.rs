use super::*;

// =============================================================
// to_service_request_params
// =============================================================

#[test]
fn ids_take_precedence_over_filters() {
    let params = to_service_request_params("?service_request_id=1,2,3&pageNumber=4&status=Open");
    assert_eq!(params, GetServiceRequestsParams::Ids(vec![1, 2, 3]));
}

#[test]
fn ids_accept_encoded_commas_and_skip_garbage() {
    let params = to_service_request_params("service_request_id=7%2Cx%2C9");
    assert_eq!(params, GetServiceRequestsParams::Ids(vec![7, 9]));
}

#[test]
fn unparseable_ids_fall_back_to_filter() {
    let params = to_service_request_params("?service_request_id=abc&pageNumber=2&status=Open");
    assert_eq!(
        params,
        GetServiceRequestsParams::Filter(ServiceRequestsFilter {
            page_number: Some(2),
            status: vec![ServiceRequestStatus::Open],
            ..ServiceRequestsFilter::default()
        })
    );
    assert!(!params.query_pairs(None).iter().any(|(key, _)| *key == "service_request_id"));
}

#[test]
fn page_number_and_status_are_parsed() {
    let params = to_service_request_params("?pageNumber=2&status=Open,Closed");
    assert_eq!(
        params,
        GetServiceRequestsParams::Filter(ServiceRequestsFilter {
            page_number: Some(2),
            status: vec![ServiceRequestStatus::Open, ServiceRequestStatus::Closed],
            ..ServiceRequestsFilter::default()
        })
    );
}

#[test]
fn all_filter_keys_are_read() {
    let params = to_service_request_params(
        "?serviceCode=001&start_date=2024-01-01T00%3A00%3A00Z&endDate=2024-02-01T00%3A00%3A00Z",
    );
    let GetServiceRequestsParams::Filter(filter) = params else {
        panic!("expected a filter");
    };
    assert_eq!(filter.service_code.as_deref(), Some("001"));
    assert_eq!(filter.start_date.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(filter.end_date.as_deref(), Some("2024-02-01T00:00:00Z"));
    assert_eq!(filter.page_number, None);
    assert!(filter.status.is_empty());
}

#[test]
fn empty_and_invalid_values_are_ignored() {
    let params = to_service_request_params("?service_request_id=&pageNumber=two&status=Pending,Open");
    assert_eq!(
        params,
        GetServiceRequestsParams::Filter(ServiceRequestsFilter {
            status: vec![ServiceRequestStatus::Open],
            ..ServiceRequestsFilter::default()
        })
    );
}

#[test]
fn empty_query_is_default_filter() {
    assert_eq!(to_service_request_params(""), GetServiceRequestsParams::default());
    assert_eq!(to_service_request_params("?"), GetServiceRequestsParams::default());
}

// =============================================================
// to_search_params / to_query_string
// =============================================================

#[test]
fn search_params_use_url_keys() {
    let params = GetServiceRequestsParams::Filter(ServiceRequestsFilter {
        page_number: Some(1),
        service_code: Some("001".to_owned()),
        start_date: None,
        end_date: Some("2024-02-01".to_owned()),
        status: vec![ServiceRequestStatus::Closed],
    });
    assert_eq!(
        to_search_params(&params),
        vec![
            ("pageNumber", "1".to_owned()),
            ("serviceCode", "001".to_owned()),
            ("endDate", "2024-02-01".to_owned()),
            ("status", "Closed".to_owned()),
        ]
    );
}

#[test]
fn query_string_maps_back_to_same_filter() {
    let params = GetServiceRequestsParams::Filter(ServiceRequestsFilter {
        page_number: Some(3),
        service_code: Some("POT HOLE".to_owned()),
        start_date: Some("2024-01-01T00:00:00Z".to_owned()),
        end_date: None,
        status: vec![ServiceRequestStatus::Open, ServiceRequestStatus::Closed],
    });
    let query = to_query_string(&params).expect("query");
    assert_eq!(to_service_request_params(&query), params);
}

#[test]
fn ids_query_string() {
    let query = to_query_string(&GetServiceRequestsParams::Ids(vec![4, 5])).expect("query");
    assert_eq!(query, "service_request_id=4%2C5");
}
