use super::*;
use open311::{EMPTY_PAGINATION, ServiceRequestStatus, ServiceRequestsFilter};

#[test]
fn page_params_keeps_filter_and_sets_page() {
    let params = page_params("?serviceCode=001&status=Open&pageNumber=1", 2);
    assert_eq!(
        params,
        GetServiceRequestsParams::Filter(ServiceRequestsFilter {
            page_number: Some(2),
            service_code: Some("001".to_owned()),
            status: vec![ServiceRequestStatus::Open],
            ..ServiceRequestsFilter::default()
        })
    );
}

#[test]
fn page_params_leaves_id_lookup_unchanged() {
    assert_eq!(page_params("?service_request_id=3,4", 5), GetServiceRequestsParams::Ids(vec![3, 4]));
}

#[test]
fn page_label_is_one_based() {
    let pagination = Pagination { page_number: 1, page_size: 10, total_pages: 4, total_size: 35, offset: 10 };
    assert_eq!(page_label(&pagination), "Page 2 of 4");
}

#[test]
fn page_label_for_empty_results() {
    assert_eq!(page_label(&EMPTY_PAGINATION), "No results");
}
