//! Root CLI structure for the storefront binary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Stage a cart against the configured catalog and check it out", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the catalog with current stock and prices
    Stock,

    /// Stage items, check out and optionally pay
    Checkout {
        /// Item to stage as NAME=QTY (repeatable)
        #[arg(short, long = "item", value_name = "NAME=QTY", value_parser = parse_item, required = true)]
        items: Vec<(String, u32)>,

        /// Authorize payment of the order subtotal
        #[arg(long)]
        pay: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Also write it to the config path if no file exists there yet
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// Log filter forced by -v / -q, if any.
    pub fn log_filter_override(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// Parses `NAME=QTY`. The name may itself contain `=`; the last one splits.
pub fn parse_item(s: &str) -> Result<(String, u32), String> {
    let (name, qty) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got '{s}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing product name in '{s}'"));
    }

    let qty = qty
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity in '{s}': {e}"))?;

    Ok((name.to_string(), qty))
}
