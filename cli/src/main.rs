mod client;

use clap::{Args, Parser, Subcommand};
use open311::{
    AttributeResponse, CreateServiceRequestParams, GetServiceRequestsParams, Open311, Open311Error, ServiceDefinition,
    ServiceRequestId, ServiceRequestStatus, ServiceRequestsFilter,
};
use serde_json::Value;

use crate::client::HttpClient;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] Open311Error),
    #[error("missing required attributes: {}", .0.join(", "))]
    MissingAttributes(Vec<String>),
    #[error("invalid value `{value}` for list attribute {code}")]
    InvalidAttributeValue { code: String, value: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "open311-cli", about = "Open311 GeoReport v2 API CLI")]
struct Cli {
    #[arg(long, env = "OPEN311_BASE_URL", default_value = "http://127.0.0.1:8080/api")]
    base_url: String,

    #[arg(long, env = "OPEN311_JURISDICTION_ID")]
    jurisdiction_id: Option<String>,

    #[arg(long, env = "OPEN311_RECAPTCHA_TOKEN")]
    recaptcha_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Services(ServicesCommand),
    Requests(RequestsCommand),
}

#[derive(Args, Debug)]
struct ServicesCommand {
    #[command(subcommand)]
    command: ServicesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ServicesSubcommand {
    List,
    Definition { service_code: String },
}

#[derive(Args, Debug)]
struct RequestsCommand {
    #[command(subcommand)]
    command: RequestsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RequestsSubcommand {
    List(ListArgs),
    Get { service_request_id: ServiceRequestId },
    Create(CreateArgs),
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    #[arg(long = "id", help = "Fetch these request ids; other filters are ignored")]
    ids: Vec<ServiceRequestId>,

    #[arg(long, help = "Zero-based page number")]
    page: Option<u32>,

    #[arg(long)]
    service_code: Option<String>,

    #[arg(long, help = "ISO 8601 lower bound")]
    start_date: Option<String>,

    #[arg(long, help = "ISO 8601 upper bound")]
    end_date: Option<String>,

    #[arg(long, help = "Open or Closed; repeatable")]
    status: Vec<ServiceRequestStatus>,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    service_code: String,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    long: f64,

    #[arg(long)]
    address: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    media_url: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long = "attribute", value_parser = parse_attribute, help = "CODE=VALUE; repeat a code for multi-value lists")]
    attributes: Vec<AttributeResponse>,
}

#[derive(Debug, Clone)]
struct CliContext {
    jurisdiction_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    validate_base_url(&cli.base_url)?;
    let client = HttpClient::new(&cli.base_url, cli.recaptcha_token)?;
    let ctx = CliContext { jurisdiction_id: cli.jurisdiction_id };
    tracing::debug!(base_url = %cli.base_url, "open311 client ready");

    match cli.command {
        Command::Services(services) => run_services(&client, &ctx, services).await,
        Command::Requests(requests) => run_requests(&client, &ctx, requests).await,
    }
}

async fn run_services(client: &impl Open311, ctx: &CliContext, services: ServicesCommand) -> Result<(), CliError> {
    let jurisdiction_id = ctx.jurisdiction_id.as_deref();
    match services.command {
        ServicesSubcommand::List => {
            let list = client.get_service_list(jurisdiction_id).await?;
            print_json(&serde_json::to_value(list)?)
        }
        ServicesSubcommand::Definition { service_code } => {
            let definition = client.get_service_definition(jurisdiction_id, &service_code).await?;
            print_json(&serde_json::to_value(definition)?)
        }
    }
}

async fn run_requests(client: &impl Open311, ctx: &CliContext, requests: RequestsCommand) -> Result<(), CliError> {
    let jurisdiction_id = ctx.jurisdiction_id.as_deref();
    match requests.command {
        RequestsSubcommand::List(args) => {
            let params = list_params(args);
            let list = client.get_service_requests(jurisdiction_id, &params).await?;
            tracing::info!(count = list.len(), "service requests fetched");
            print_json(&serde_json::to_value(list)?)
        }
        RequestsSubcommand::Get { service_request_id } => {
            let request = client.get_service_request(jurisdiction_id, service_request_id).await?;
            print_json(&serde_json::to_value(request)?)
        }
        RequestsSubcommand::Create(args) => {
            let mut params = create_params(args, ctx.jurisdiction_id.clone());
            let definition = client.get_service_definition(jurisdiction_id, &params.service_code).await?;
            check_attributes(&mut params, &definition)?;
            let created = client.create_service_request(&params).await?;
            print_json(&serde_json::to_value(created)?)
        }
    }
}

fn list_params(args: ListArgs) -> GetServiceRequestsParams {
    if !args.ids.is_empty() {
        return GetServiceRequestsParams::Ids(args.ids);
    }
    GetServiceRequestsParams::Filter(ServiceRequestsFilter {
        page_number: args.page,
        service_code: args.service_code,
        start_date: args.start_date,
        end_date: args.end_date,
        status: args.status,
    })
}

fn create_params(args: CreateArgs, jurisdiction_id: Option<String>) -> CreateServiceRequestParams {
    CreateServiceRequestParams {
        jurisdiction_id,
        service_code: args.service_code,
        lat: args.lat,
        long: args.long,
        address_string: args.address,
        description: args.description,
        media_url: args.media_url,
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
        attributes: args.attributes,
    }
}

/// Validate attribute responses against the service definition and mark
/// multi-value list answers for encoding.
fn check_attributes(params: &mut CreateServiceRequestParams, definition: &ServiceDefinition) -> Result<(), CliError> {
    let missing = params.missing_required_attributes(definition);
    if !missing.is_empty() {
        return Err(CliError::MissingAttributes(missing.into_iter().map(str::to_owned).collect()));
    }
    if let Some((code, value)) = params.invalid_list_values(definition).first() {
        return Err(CliError::InvalidAttributeValue { code: (*code).to_owned(), value: (*value).to_owned() });
    }
    params.apply_definition(definition);
    Ok(())
}

fn parse_attribute(raw: &str) -> Result<AttributeResponse, String> {
    let (code, value) = raw.split_once('=').ok_or_else(|| format!("expected CODE=VALUE, got `{raw}`"))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing attribute code in `{raw}`"));
    }
    Ok(AttributeResponse::new(code, value))
}

fn validate_base_url(base_url: &str) -> Result<(), CliError> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(CliError::InvalidBaseUrl(base_url.to_owned()))
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
