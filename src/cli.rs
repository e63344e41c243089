use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigFile;

/// Cash-secured put scanner: pick the put nearest a strike below the last
/// close for each ticker and write its annualized yield to CSV.
#[derive(Parser)]
#[command(name = "put-yield", version, about)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch option chains and write the yield CSV
    Fetch(FetchArgs),

    /// Output the JSON schema for config files
    Schema,

    /// Output an example config file to stdout
    Example,
}

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Path to a JSON config file; flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Comma-separated ticker symbols (default: AAPL,MSFT,GOOGL)
    #[arg(long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,

    /// Option expiration date, YYYY-MM-DD (default: 2024-07-26)
    #[arg(long)]
    pub expiration_date: Option<String>,

    /// Target strike distance below the last close, in percent (default: 15)
    #[arg(long, short = 'p')]
    pub percentage: Option<f64>,

    /// Directory for the CSV file (default: output)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Quote site scheme and host (default: https://finviz.com)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Minimum pause between tickers in seconds (default: 1)
    #[arg(long)]
    pub min_delay_secs: Option<f64>,

    /// Maximum pause between tickers in seconds (default: 5)
    #[arg(long)]
    pub max_delay_secs: Option<f64>,
}

impl FetchArgs {
    /// Flags given on the command line, in config-file shape.
    pub fn overrides(&self) -> ConfigFile {
        ConfigFile {
            symbols: self.symbols.clone(),
            expiration_date: self.expiration_date.clone(),
            percentage_below_close: self.percentage,
            output_dir: self.output_dir.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            min_delay_secs: self.min_delay_secs,
            max_delay_secs: self.max_delay_secs,
            user_agents: None,
        }
    }
}
