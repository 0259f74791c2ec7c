use clap::Parser;
use std::time::Duration;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, CorsOrigin, StoreKind};

/// Parse the command line (and environment) into validated settings.
///
/// # Errors
///
/// Will return `Err` if the arguments are invalid
pub fn args_checks() -> Result<CleanArgs, String> {
    let args = Args::parse();
    args.validate()?;
    CleanArgs::new(args)
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the cors origin list cannot be parsed
    pub fn new(args: Args) -> Result<Self, String> {
        let cors_origins = validation::parse_cors_origins(&args.cors_origins)?;
        let upstream_timeout = match args.upstream_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        Ok(CleanArgs {
            bind: args.bind,
            port: args.port,
            api_key: args.api_key.trim().to_string(),
            upstream_base_url: args.upstream_base_url.trim().trim_end_matches('/').to_string(),
            upstream_timeout,
            forward_upstream_errors: args.forward_upstream_errors,
            store: args.store,
            db_name: args.db_name,
            cors_origins,
            page_size: args.page_size,
            roster_max_age: Duration::from_secs(args.roster_max_age_secs),
            static_dir: args.static_dir,
        })
    }
}
