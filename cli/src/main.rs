//! relaycheck CLI — is this address part of Relay Protocol?
//!
//! # Commands
//! ```text
//! relaycheck check    <ADDRESS> [--json] [--full]
//! relaycheck validate <ADDRESS>
//! relaycheck chains   [--json]
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use relaycheck_core::{classify, validate_input, ChainSource, StaticChainSource};
use relaycheck_http::{HttpChainSource, HttpSourceConfig};

mod cmd_chains;
mod cmd_check;
mod logging;

#[derive(Parser)]
#[command(
    name = "relaycheck",
    about = "Check whether an address is a Relay Protocol solver, depository or contract",
    long_about = "
relaycheck: look an address up in the Relay Protocol chain configuration.
Accepts EVM (0x...), Solana (base58) and Bitcoin (P2PKH, P2SH, SegWit, Taproot) addresses.

ENVIRONMENT VARIABLES:
  RELAYCHECK_API_URL   Relay API base URL (default: https://api.relay.link)
  RUST_LOG             Log filter, overrides -v
",
    version
)]
struct Cli {
    /// Relay API base URL (overrides RELAYCHECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read the chain list from a local JSON file instead of the API
    #[arg(long, global = true, conflicts_with = "api_url")]
    chains_file: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 15)]
    timeout_secs: u64,

    /// Enable debug logging (stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an address belongs to Relay Protocol
    Check {
        address: String,
        /// Print the detection result as JSON
        #[arg(long)]
        json: bool,
        /// Show full addresses instead of shortened ones
        #[arg(long)]
        full: bool,
    },

    /// Validate an address and print its detected format
    Validate { address: String },

    /// List the chains the detector scans
    Chains {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&logging::LogConfig::from_flags(cli.verbose, cli.log_json));

    match &cli.command {
        Commands::Check { address, json, full } => {
            cmd_check::run(build_source(&cli)?, address, *json, *full).await
        }
        Commands::Validate { address } => cmd_validate(address),
        Commands::Chains { json } => cmd_chains::run(build_source(&cli)?, *json).await,
    }
}

fn build_source(cli: &Cli) -> Result<Box<dyn ChainSource>> {
    if let Some(path) = &cli.chains_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading chains file '{}'", path.display()))?;
        let source = StaticChainSource::from_json(&json)
            .with_context(|| format!("parsing chains file '{}'", path.display()))?
            .with_label(path.display().to_string());
        return Ok(Box::new(source));
    }

    let mut config = HttpSourceConfig::from_env().with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url.as_str());
    }
    tracing::debug!(url = %config.chains_url(), "using HTTP chain source");
    Ok(Box::new(HttpChainSource::new(config)?))
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_validate(raw: &str) -> Result<()> {
    let address = validate_input(raw)?;
    let format = classify(address).ok_or_else(|| anyhow!("unrecognised address format"))?;
    println!("{address}: valid {format} address");
    Ok(())
}
