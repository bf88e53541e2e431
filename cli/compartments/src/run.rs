//! Main execution logic for tfo-compartments.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tfo_identity::{
    CompartmentsDataSource, HttpIdentityClient, IDENTITY_SERVICE, ListingStats,
    MemoryIdentityClient, RetryPolicy,
};
use tfo_traits::IdentityClient;
use tfo_types::{AccessLevel, ClientConfig, ListCompartmentsResponse};
use tracing::info;

use crate::args::{Cli, OutputFormatArg};

/// Execute one data source read; returns the resulting state as JSON.
pub async fn execute(args: &Cli) -> Result<(Value, ListingStats)> {
    let config = build_config(args).await?;
    let retry = build_retry_policy(args);

    match &args.fixture {
        Some(path) => {
            let client = load_fixture(path).await?;
            info!(fixture = %path.display(), pages = client.remaining(), "Replaying recorded pages");
            read(CompartmentsDataSource::new(client, retry), args, config).await
        }
        None => {
            let client = HttpIdentityClient::new(&build_client_config(args))?;
            info!(endpoint = %client.endpoint(), "Calling identity service");
            read(CompartmentsDataSource::new(client, retry), args, config).await
        }
    }
}

async fn read<C: IdentityClient>(
    data_source: CompartmentsDataSource<C>,
    args: &Cli,
    config: Value,
) -> Result<(Value, ListingStats)> {
    let data_source = match args.limit {
        Some(limit) => data_source.with_page_limit(limit),
        None => data_source,
    };
    let (state, stats) = data_source.read(config).await?;
    Ok((state.to_json(), stats))
}

/// Build the data source block from `--config` and the flags.
///
/// Flags override values from the file; `-f` filters are appended to the
/// file's filters.
pub async fn build_config(args: &Cli) -> Result<Value> {
    let mut config = match &args.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;
            match value {
                Value::Object(map) => map,
                _ => bail!("Config file {} must hold a JSON object", path.display()),
            }
        }
        None => Map::new(),
    };

    if let Some(compartment_id) = &args.compartment_id {
        config.insert("compartment_id".to_string(), Value::from(compartment_id.as_str()));
    }
    if let Some(access_level) = args.access_level {
        let access_level: AccessLevel = access_level.into();
        config.insert("access_level".to_string(), Value::from(access_level.as_str()));
    }
    if let Some(in_subtree) = args.compartment_id_in_subtree {
        config.insert("compartment_id_in_subtree".to_string(), Value::from(in_subtree));
    }

    if !args.filters.is_empty() {
        let mut filters = match config.remove("filter") {
            Some(Value::Array(filters)) => filters,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => bail!("\"filter\" in the config file must be a list"),
        };
        for spec in &args.filters {
            filters.push(serde_json::to_value(spec)?);
        }
        config.insert("filter".to_string(), Value::Array(filters));
    }

    if !config.contains_key("compartment_id") {
        bail!("--compartment-id (or compartment_id in --config) is required");
    }

    Ok(Value::Object(config))
}

fn build_retry_policy(args: &Cli) -> RetryPolicy {
    RetryPolicy::for_service(IDENTITY_SERVICE)
        .with_max_retries(args.max_retries)
        .with_initial_backoff_ms(args.initial_backoff_ms)
}

fn build_client_config(args: &Cli) -> ClientConfig {
    let mut config = ClientConfig::new()
        .with_region(&args.region)
        .with_timeout(args.timeout_secs);

    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(token) = &args.auth_token {
        config = config.with_auth_token(token);
    }

    config
}

/// Load recorded pages: a JSON list of `ListCompartments` responses.
pub async fn load_fixture(path: &Path) -> Result<MemoryIdentityClient> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read fixture file {}", path.display()))?;
    let pages: Vec<ListCompartmentsResponse> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid fixture file {}", path.display()))?;

    Ok(MemoryIdentityClient::from_pages(pages))
}

/// Write the state to `out` in the requested format.
///
/// `json` prints the whole state; `jsonl` prints one compartment per line.
pub fn write_state<W: Write>(state: &Value, format: OutputFormatArg, mut out: W) -> Result<()> {
    match format {
        OutputFormatArg::Json => {
            serde_json::to_writer_pretty(&mut out, state)?;
            writeln!(out)?;
        }
        OutputFormatArg::Jsonl => {
            let compartments = state
                .get("compartments")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for compartment in compartments {
                serde_json::to_writer(&mut out, compartment)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
