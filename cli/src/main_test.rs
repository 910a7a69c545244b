use super::*;
use open311::schema::{AttributeDatatype, AttributeValue, ServiceDefinitionAttribute};

fn pothole_definition() -> ServiceDefinition {
    let attribute = |code: &str, datatype: AttributeDatatype, required: bool| ServiceDefinitionAttribute {
        variable: true,
        code: code.to_owned(),
        datatype,
        required,
        datatype_description: None,
        order: 0,
        description: format!("{code}?"),
    };
    let lanes = vec![
        AttributeValue { key: 1, name: "Bike".to_owned() },
        AttributeValue { key: 2, name: "Bus".to_owned() },
    ];
    ServiceDefinition {
        service_code: "001".to_owned(),
        attributes: vec![
            attribute("SIZE", AttributeDatatype::Number, true),
            attribute("LANES", AttributeDatatype::MultiValueList { values: lanes }, false),
        ],
    }
}

fn pothole_params(attributes: Vec<AttributeResponse>) -> CreateServiceRequestParams {
    CreateServiceRequestParams { service_code: "001".to_owned(), attributes, ..CreateServiceRequestParams::default() }
}

#[test]
fn parse_attribute_splits_on_first_equals() {
    let attribute = parse_attribute("NOTES=a=b").unwrap();
    assert_eq!(attribute, AttributeResponse::new("NOTES", "a=b"));
}

#[test]
fn parse_attribute_rejects_missing_code() {
    assert!(parse_attribute("=value").is_err());
    assert!(parse_attribute("no-separator").is_err());
}

#[test]
fn list_params_prefer_ids() {
    let args = ListArgs { ids: vec![1, 2], page: Some(3), ..ListArgs::default() };
    assert_eq!(list_params(args), GetServiceRequestsParams::Ids(vec![1, 2]));
}

#[test]
fn list_params_build_filter() {
    let args = ListArgs {
        page: Some(1),
        service_code: Some("001".to_owned()),
        status: vec![ServiceRequestStatus::Open],
        ..ListArgs::default()
    };
    assert_eq!(
        list_params(args),
        GetServiceRequestsParams::Filter(ServiceRequestsFilter {
            page_number: Some(1),
            service_code: Some("001".to_owned()),
            status: vec![ServiceRequestStatus::Open],
            ..ServiceRequestsFilter::default()
        })
    );
}

#[test]
fn cli_parses_create_command() {
    let cli = Cli::try_parse_from([
        "open311-cli",
        "--base-url",
        "https://city.gov/api",
        "--jurisdiction-id",
        "city.gov",
        "requests",
        "create",
        "--service-code",
        "001",
        "--lat",
        "38.6",
        "--long",
        "-90.2",
        "--address",
        "1 Main St",
        "--description",
        "Pothole",
        "--attribute",
        "SIZE=2",
    ])
    .unwrap();
    let Command::Requests(RequestsCommand { command: RequestsSubcommand::Create(args) }) = cli.command else {
        panic!("expected requests create");
    };
    let params = create_params(args, cli.jurisdiction_id);
    assert_eq!(params.jurisdiction_id.as_deref(), Some("city.gov"));
    assert_eq!(params.long, -90.2);
    assert_eq!(params.attributes, vec![AttributeResponse::new("SIZE", "2")]);
}

#[test]
fn cli_parses_repeated_status() {
    let cli =
        Cli::try_parse_from(["open311-cli", "requests", "list", "--status", "Open", "--status", "Closed"]).unwrap();
    let Command::Requests(RequestsCommand { command: RequestsSubcommand::List(args) }) = cli.command else {
        panic!("expected requests list");
    };
    assert_eq!(args.status, vec![ServiceRequestStatus::Open, ServiceRequestStatus::Closed]);
}

#[test]
fn validate_base_url_requires_http_scheme() {
    assert!(validate_base_url("https://city.gov").is_ok());
    assert!(matches!(validate_base_url("city.gov"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn check_attributes_marks_multi_value_answers() {
    let mut params = pothole_params(vec![AttributeResponse::new("SIZE", "2"), AttributeResponse::new("LANES", "1")]);
    check_attributes(&mut params, &pothole_definition()).unwrap();
    assert_eq!(
        params.attribute_pairs(),
        vec![("attribute[SIZE]".to_owned(), "2"), ("attribute[LANES][]".to_owned(), "1")]
    );
}

#[test]
fn check_attributes_rejects_missing_required() {
    let mut params = pothole_params(vec![AttributeResponse::new("LANES", "1")]);
    let err = check_attributes(&mut params, &pothole_definition()).unwrap_err();
    assert_eq!(err.to_string(), "missing required attributes: SIZE");
}

#[test]
fn check_attributes_rejects_unknown_list_value() {
    let mut params = pothole_params(vec![AttributeResponse::new("SIZE", "2"), AttributeResponse::new("LANES", "9")]);
    let err = check_attributes(&mut params, &pothole_definition()).unwrap_err();
    assert!(matches!(err, CliError::InvalidAttributeValue { ref code, ref value } if code == "LANES" && value == "9"));
}
