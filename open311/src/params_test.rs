use super::*;
use crate::schema::{AttributeDatatype, AttributeValue, ServiceDefinitionAttribute};

// =============================================================
// Helpers
// =============================================================

fn decode(body: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(body).expect("decode form")
}

fn attribute(code: &str, required: bool, variable: bool) -> ServiceDefinitionAttribute {
    ServiceDefinitionAttribute {
        variable,
        code: code.to_owned(),
        datatype: AttributeDatatype::String,
        required,
        datatype_description: None,
        order: 0,
        description: format!("{code}?"),
    }
}

fn list_attribute(code: &str, multi: bool) -> ServiceDefinitionAttribute {
    let values = vec![
        AttributeValue { key: 1, name: "Bike lane".to_owned() },
        AttributeValue { key: 2, name: "Travel lane".to_owned() },
    ];
    let datatype =
        if multi { AttributeDatatype::MultiValueList { values } } else { AttributeDatatype::SingleValueList { values } };
    ServiceDefinitionAttribute { datatype, ..attribute(code, false, true) }
}

fn lanes_definition() -> ServiceDefinition {
    ServiceDefinition {
        service_code: "POTHOLE".to_owned(),
        attributes: vec![list_attribute("LANES", true), list_attribute("SIDE", false), attribute("DEPTH", false, true)],
    }
}

fn pothole_params() -> CreateServiceRequestParams {
    CreateServiceRequestParams {
        jurisdiction_id: Some("city.gov".to_owned()),
        service_code: "POTHOLE".to_owned(),
        lat: 37.76,
        long: -122.46,
        address_string: "8th Ave & Judah St".to_owned(),
        description: "Deep hole in the bike lane".to_owned(),
        ..CreateServiceRequestParams::default()
    }
}

// =============================================================
// Listing
// =============================================================

#[test]
fn id_params_encode_only_ids() {
    let params = GetServiceRequestsParams::Ids(vec![1, 2, 3]);
    assert_eq!(params.query_pairs(None), vec![("service_request_id", "1,2,3".to_owned())]);
}

#[test]
fn jurisdiction_leads_query_pairs() {
    let params = GetServiceRequestsParams::Ids(vec![9]);
    let pairs = params.query_pairs(Some("city.gov"));
    assert_eq!(pairs[0], ("jurisdiction_id", "city.gov".to_owned()));
    assert_eq!(pairs.len(), 2);
}

#[test]
fn filter_params_encode_present_fields_only() {
    let params = GetServiceRequestsParams::Filter(ServiceRequestsFilter {
        page_number: Some(2),
        service_code: Some("001".to_owned()),
        start_date: None,
        end_date: Some("2024-01-31T00:00:00Z".to_owned()),
        status: vec![ServiceRequestStatus::Open, ServiceRequestStatus::Closed],
    });
    assert_eq!(
        params.query_pairs(None),
        vec![
            ("service_code", "001".to_owned()),
            ("end_date", "2024-01-31T00:00:00Z".to_owned()),
            ("status", "Open,Closed".to_owned()),
            ("page", "2".to_owned()),
        ]
    );
}

#[test]
fn default_params_encode_nothing() {
    assert!(GetServiceRequestsParams::default().query_pairs(None).is_empty());
}

#[test]
fn encode_query_percent_encodes_values() {
    let query = encode_query(&[("start_date", "2024-01-01T00:00:00+01:00".to_owned()), ("status", "Open".to_owned())])
        .expect("encode");
    assert_eq!(query, "start_date=2024-01-01T00%3A00%3A00%2B01%3A00&status=Open");
}

// =============================================================
// Creation
// =============================================================

#[test]
fn form_body_contains_core_fields() {
    let pairs = decode(&pothole_params().to_form_body().expect("form"));
    assert_eq!(
        pairs,
        vec![
            ("jurisdiction_id".to_owned(), "city.gov".to_owned()),
            ("service_code".to_owned(), "POTHOLE".to_owned()),
            ("lat".to_owned(), "37.76".to_owned()),
            ("long".to_owned(), "-122.46".to_owned()),
            ("address_string".to_owned(), "8th Ave & Judah St".to_owned()),
            ("description".to_owned(), "Deep hole in the bike lane".to_owned()),
        ]
    );
}

#[test]
fn form_body_includes_optional_contact_fields_when_set() {
    let params = CreateServiceRequestParams {
        jurisdiction_id: None,
        media_url: Some("https://img.example/1.jpg".to_owned()),
        email: Some("resident@example.org".to_owned()),
        ..pothole_params()
    };
    let pairs = decode(&params.to_form_body().expect("form"));
    assert!(!pairs.iter().any(|(k, _)| k == "jurisdiction_id"));
    assert!(pairs.contains(&("media_url".to_owned(), "https://img.example/1.jpg".to_owned())));
    assert!(pairs.contains(&("email".to_owned(), "resident@example.org".to_owned())));
    assert!(!pairs.iter().any(|(k, _)| k == "phone"));
}

#[test]
fn single_attribute_uses_plain_key() {
    let params = CreateServiceRequestParams {
        attributes: vec![AttributeResponse::new("DEPTH", "4")],
        ..pothole_params()
    };
    assert_eq!(params.attribute_pairs(), vec![("attribute[DEPTH]".to_owned(), "4")]);
}

#[test]
fn repeated_attribute_uses_array_key() {
    let params = CreateServiceRequestParams {
        attributes: vec![
            AttributeResponse::new("LANES", "1"),
            AttributeResponse::new("DEPTH", "4"),
            AttributeResponse::new("LANES", "2"),
        ],
        ..pothole_params()
    };
    let pairs = decode(&params.to_form_body().expect("form"));
    let attributes: Vec<_> = pairs.into_iter().filter(|(k, _)| k.starts_with("attribute")).collect();
    assert_eq!(
        attributes,
        vec![
            ("attribute[LANES][]".to_owned(), "1".to_owned()),
            ("attribute[DEPTH]".to_owned(), "4".to_owned()),
            ("attribute[LANES][]".to_owned(), "2".to_owned()),
        ]
    );
}

#[test]
fn missing_required_attributes_ignores_informational_and_optional() {
    let definition = ServiceDefinition {
        service_code: "POTHOLE".to_owned(),
        attributes: vec![
            attribute("DEPTH", true, true),
            attribute("NOTE", true, false),
            attribute("LANE", false, true),
            attribute("SIZE", true, true),
        ],
    };
    let params = CreateServiceRequestParams {
        attributes: vec![AttributeResponse::new("SIZE", "large")],
        ..pothole_params()
    };
    assert_eq!(params.missing_required_attributes(&definition), vec!["DEPTH"]);
}

#[test]
fn single_multi_value_selection_uses_array_key() {
    let params =
        CreateServiceRequestParams { attributes: vec![AttributeResponse::multi("LANES", "1")], ..pothole_params() };
    let pairs = decode(&params.to_form_body().expect("form"));
    assert!(pairs.contains(&("attribute[LANES][]".to_owned(), "1".to_owned())));
    assert!(!pairs.iter().any(|(k, _)| k == "attribute[LANES]"));
}

#[test]
fn apply_definition_marks_multi_value_lists_only() {
    let mut params = CreateServiceRequestParams {
        attributes: vec![
            AttributeResponse::new("LANES", "2"),
            AttributeResponse::new("SIDE", "1"),
            AttributeResponse::new("DEPTH", "4"),
        ],
        ..pothole_params()
    };
    params.apply_definition(&lanes_definition());
    assert_eq!(
        params.attribute_pairs(),
        vec![
            ("attribute[LANES][]".to_owned(), "2"),
            ("attribute[SIDE]".to_owned(), "1"),
            ("attribute[DEPTH]".to_owned(), "4"),
        ]
    );
}

#[test]
fn invalid_list_values_checks_list_keys() {
    let params = CreateServiceRequestParams {
        attributes: vec![
            AttributeResponse::new("LANES", "2"),
            AttributeResponse::new("SIDE", "7"),
            AttributeResponse::new("DEPTH", "deep"),
        ],
        ..pothole_params()
    };
    assert_eq!(params.invalid_list_values(&lanes_definition()), vec![("SIDE", "7")]);
}
