use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.sportsdata.io/v3/mma/scores/json";

/// Backend holding the favorites documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// One row per user in a sqlite file, ids kept as a json array.
    Sqlite,
    /// Process memory only; lost on restart.
    Memory,
    /// A single json file of `{userId, fighterIds}` documents.
    JsonFile,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "MMAREC_BIND", value_name = "ADDRESS", default_value = "0.0.0.0")]
    pub bind: String,
    #[arg(short = 'p', long, env = "PORT", value_name = "PORT", default_value = "5001")]
    pub port: u16,

    /// Key for the sports-data api, sent as the `key` query parameter.
    #[arg(short = 'k', long, env = "SPORTSDATA_API_KEY", value_name = "API_KEY")]
    pub api_key: String,
    #[arg(
        long,
        env = "SPORTSDATA_BASE_URL",
        value_name = "URL",
        default_value = DEFAULT_UPSTREAM_BASE_URL
    )]
    pub upstream_base_url: String,
    /// Abort upstream calls after this many milliseconds. 0 disables the timeout.
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", value_name = "MILLIS", default_value = "12000")]
    pub upstream_timeout_ms: u64,
    /// Relay the upstream status and body instead of answering a plain 500.
    #[arg(long, env = "FORWARD_UPSTREAM_ERRORS")]
    pub forward_upstream_errors: bool,

    #[arg(
        short = 's',
        long,
        env = "FAVORITES_STORE",
        value_name = "STORE",
        default_value = "sqlite",
        value_enum
    )]
    pub store: StoreKind,
    /// For sqlite, the database filename. For json-file, the json document path.
    #[arg(short = 'n', long, env = "FAVORITES_DB", value_name = "DATABASE_NAME", default_value = "favorites.db")]
    pub db_name: String,

    /// Comma separated. `*.example.app` matches any origin ending in `.example.app`, `*` matches all.
    #[arg(long, env = "CORS_ORIGINS", value_name = "ORIGINS", default_value = "http://localhost:5173")]
    pub cors_origins: String,
    #[arg(
        long,
        env = "PAGE_SIZE",
        value_name = "PAGE_SIZE",
        default_value = "15",
        value_parser = crate::args::validation::check_page_size
    )]
    pub page_size: usize,
    #[arg(long, env = "ROSTER_MAX_AGE_SECS", value_name = "SECONDS", default_value = "300")]
    pub roster_max_age_secs: u64,
    #[arg(long, env = "STATIC_DIR", value_name = "DIR", default_value = "./static")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(String),
    /// Host suffix including the leading dot, e.g. `.vercel.app`.
    Suffix(String),
}

impl CorsOrigin {
    #[must_use]
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(allowed) => allowed == origin,
            Self::Suffix(suffix) => origin.ends_with(suffix.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub bind: String,
    pub port: u16,
    pub api_key: String,
    pub upstream_base_url: String,
    pub upstream_timeout: Option<Duration>,
    pub forward_upstream_errors: bool,
    pub store: StoreKind,
    pub db_name: String,
    pub cors_origins: Vec<CorsOrigin>,
    pub page_size: usize,
    pub roster_max_age: Duration,
    pub static_dir: PathBuf,
}
