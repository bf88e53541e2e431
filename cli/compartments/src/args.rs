//! CLI argument definitions for tfo-compartments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tfo_cli_common::LogLevel;
use tfo_identity::FilterSpec;
use tfo_types::{AccessLevel, DEFAULT_REGION};

/// Read the compartments data source.
///
/// Lists every compartment under a root compartment, page by page, and prints
/// the resulting data source state (`id` plus `compartments`) to stdout.
///
/// ## Examples
///
/// Whole tenancy, active compartments only:
///   tfo-compartments -c ocid1.tenancy.oc1..aaa --compartment-id-in-subtree \
///       --access-level any -f state=ACTIVE
///
/// Regex filter on names:
///   tfo-compartments -c ocid1.tenancy.oc1..aaa -f 'name~=^shared-'
///
/// Replay recorded pages instead of calling the service:
///   tfo-compartments --config compartments.json --fixture pages.json
#[derive(Parser, Debug)]
#[command(name = "tfo-compartments")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Data Source Configuration ===
    /// Root compartment (or tenancy) OCID
    #[arg(short, long, env = "TFO_COMPARTMENT_ID")]
    pub compartment_id: Option<String>,

    /// Access level for the listing
    #[arg(long, value_enum)]
    pub access_level: Option<AccessLevelArg>,

    /// List the whole subtree below the root compartment
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub compartment_id_in_subtree: Option<bool>,

    /// Filter on a projected field (can be specified multiple times)
    ///
    /// Supports two forms:
    /// - Equality: "name=value1,value2"
    /// - Regex: "name~=pattern1,pattern2"
    ///
    /// Map fields take a key: "freeform_tags.team=net".
    #[arg(long = "filter", short = 'f', value_parser = parse_filter)]
    pub filters: Vec<FilterSpec>,

    /// JSON file with the data source block; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file with recorded pages to replay instead of calling the service
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    // === Client Options ===
    /// Region used to derive the identity endpoint
    #[arg(long, env = "OCI_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom identity endpoint URL
    #[arg(long, env = "TFO_IDENTITY_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token for the identity service
    #[arg(long, env = "TFO_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Page size requested from the service
    #[arg(long, value_parser = parse_positive_u32)]
    pub limit: Option<u32>,

    // === Retry Options ===
    /// Maximum retries per page request
    #[arg(long, default_value = "8")]
    pub max_retries: u32,

    /// Initial retry backoff in milliseconds
    #[arg(long, default_value = "1000")]
    pub initial_backoff_ms: u64,

    // === Output Options ===
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub output_format: OutputFormatArg,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Access level argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessLevelArg {
    /// Every compartment, accessible or not
    Any,
    /// Only compartments the caller can access
    Accessible,
}

impl From<AccessLevelArg> for AccessLevel {
    fn from(arg: AccessLevelArg) -> Self {
        match arg {
            AccessLevelArg::Any => AccessLevel::Any,
            AccessLevelArg::Accessible => AccessLevel::Accessible,
        }
    }
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// The whole state as pretty-printed JSON
    Json,
    /// One compartment per line
    Jsonl,
}

/// Parse a `-f` filter argument.
///
/// `name~=a,b` is a regex filter, `name=a,b` an equality filter.
pub fn parse_filter(s: &str) -> Result<FilterSpec, String> {
    let eq = s
        .find('=')
        .ok_or_else(|| format!("'{}' is not NAME=VALUES or NAME~=PATTERNS", s))?;

    let (name, regex) = match s[..eq].strip_suffix('~') {
        Some(name) => (name, true),
        None => (&s[..eq], false),
    };
    if name.is_empty() {
        return Err(format!("'{}' has an empty filter name", s));
    }

    let values: Vec<&str> = s[eq + 1..].split(',').collect();
    Ok(FilterSpec::new(name, values).with_regex(regex))
}

/// Parse a positive u32 (>= 1).
fn parse_positive_u32(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}
