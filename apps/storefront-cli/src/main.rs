//! # Storefront CLI Entry Point
//!
//! The actual setup is in lib.rs for better testability.
//!
//! ## Output Contract
//! - stdout: the command's response (JSON, or TOML for `config`)
//! - stderr: logs, and on failure a JSON `ErrorReport`
//! - exit status: 0 on success, see `CliError::exit_code` otherwise

use std::process::ExitCode;

use clap::Parser;
use storefront_cli::cli::Cli;
use storefront_cli::{run, ErrorReport};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let report = ErrorReport::from(&err);
            match serde_json::to_string(&report) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("error: {err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}
