//! # storefront-cli
//!
//! Thin orchestration layer over `storefront-core`.
//!
//! ## Startup Sequence
//! 1. Parse arguments (clap)
//! 2. Load configuration (file → env → validate)
//! 3. Initialize tracing with the effective filter
//! 4. Run the command and print its JSON response

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::StorefrontConfig;
use crate::error::{CliError, CliResult, ErrorCode};

/// Runs one CLI invocation and returns what should be printed on stdout.
pub fn run(cli: Cli) -> CliResult<String> {
    let config = match (&cli.command, &cli.config) {
        // `config --init` is how a missing explicit path gets created.
        (Commands::Config { init: true }, Some(path)) if !path.exists() => {
            StorefrontConfig::load_defaults()?
        }
        _ => StorefrontConfig::load(cli.config.clone())?,
    };
    init_tracing(cli.log_filter_override(), &config.log.filter);

    info!(
        products = config.catalog.len(),
        max_lines = config.cart.max_lines,
        "Storefront config loaded"
    );

    match &cli.command {
        Commands::Stock => render(&commands::stock(&config)),
        Commands::Checkout { items, pay } => render(&commands::checkout(&config, items, *pay)?),
        Commands::Config { init } => {
            if *init {
                init_config_file(&cli, &config)?;
            }
            Ok(config.to_toml()?)
        }
    }
}

/// Writes `config` to the target path unless a file is already there.
fn init_config_file(cli: &Cli, config: &StorefrontConfig) -> CliResult<()> {
    let Some(path) = cli.config.clone().or_else(StorefrontConfig::default_config_path) else {
        return Ok(());
    };

    if path.exists() {
        info!(?path, "Config file already exists, leaving it alone");
    } else {
        config.save(&path)?;
        info!(?path, "Wrote config file");
    }
    Ok(())
}

fn render<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Filter Precedence
/// - `-v` / `-q` on the command line
/// - `RUST_LOG`
/// - `[log] filter` from the config (default `info,storefront=debug`)
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(cli_override: Option<&str>, config_filter: &str) {
    let filter = match cli_override {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_filter)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Error body printed on stderr.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl From<&CliError> for ErrorReport {
    fn from(err: &CliError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
