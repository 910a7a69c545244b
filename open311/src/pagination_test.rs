use super::*;
use std::collections::HashMap;

fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

fn full_headers() -> HashMap<String, String> {
    headers(&[
        (PAGE_NUMBER_HEADER, "1"),
        (PAGE_SIZE_HEADER, "10"),
        (TOTAL_PAGES_HEADER, "4"),
        (TOTAL_SIZE_HEADER, "37"),
        (OFFSET_HEADER, "10"),
    ])
}

#[test]
fn from_headers_reads_every_field() {
    let map = full_headers();
    let pagination = Pagination::from_headers(|name| map.get(name).cloned()).expect("pagination");
    assert_eq!(
        pagination,
        Pagination { page_number: 1, page_size: 10, total_pages: 4, total_size: 37, offset: 10 }
    );
    assert!(pagination.has_next_page());
    assert!(pagination.has_previous_page());
}

#[test]
fn from_headers_requires_all_headers() {
    let mut map = full_headers();
    map.remove(OFFSET_HEADER);
    assert!(Pagination::from_headers(|name| map.get(name).cloned()).is_none());
}

#[test]
fn from_headers_rejects_non_numeric_value() {
    let mut map = full_headers();
    map.insert(PAGE_SIZE_HEADER.to_owned(), "ten".to_owned());
    assert!(Pagination::from_headers(|name| map.get(name).cloned()).is_none());
}

#[test]
fn single_page_covers_whole_listing() {
    let pagination = Pagination::single_page(3);
    assert_eq!(pagination, Pagination { page_number: 0, page_size: 3, total_pages: 1, total_size: 3, offset: 0 });
    assert!(!pagination.has_next_page());
    assert!(!pagination.has_previous_page());
}

#[test]
fn single_page_of_nothing_has_no_pages() {
    assert_eq!(Pagination::single_page(0), EMPTY_PAGINATION);
}

#[test]
fn last_page_has_no_next_page() {
    let pagination = Pagination { page_number: 3, page_size: 10, total_pages: 4, total_size: 37, offset: 30 };
    assert!(!pagination.has_next_page());
}
