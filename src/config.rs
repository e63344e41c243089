use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::DEFAULT_BASE_URL;

pub const DEFAULT_SYMBOLS: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];
pub const DEFAULT_EXPIRATION_DATE: &str = "2024-07-26";
pub const DEFAULT_PERCENTAGE: f64 = 15.0;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MIN_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_MAX_DELAY_SECS: f64 = 5.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No symbols given")]
    NoSymbols,

    #[error("Symbol #{index} is empty")]
    EmptySymbol { index: usize },

    #[error("Invalid expiration date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("percentageBelowClose must be a finite number, got {value}")]
    InvalidPercentage { value: f64 },

    #[error("Delay range {min}s..{max}s is invalid (need 0 <= min <= max)")]
    InvalidDelay { min: f64, max: f64 },

    #[error("timeoutSecs must be at least 1")]
    InvalidTimeout,
}

// ── File format ─────────────────────────────────────────────────────

/// Run parameters as read from a JSON config file. Every field is optional;
/// command-line flags override file values and built-in defaults fill the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Ticker symbols, processed in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
    /// Option expiration date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// How far below the last close to aim the strike, in percent (15 = 15%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_below_close: Option<f64>,
    /// Directory the CSV is written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Scheme and host of the quote site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Lower bound of the random pause between tickers, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_delay_secs: Option<f64>,
    /// Upper bound of the random pause between tickers, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delay_secs: Option<f64>,
    /// User-Agent strings to rotate through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agents: Option<Vec<String>>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Values set in `overrides` win over values in `self`.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            symbols: overrides.symbols.or(self.symbols),
            expiration_date: overrides.expiration_date.or(self.expiration_date),
            percentage_below_close: overrides
                .percentage_below_close
                .or(self.percentage_below_close),
            output_dir: overrides.output_dir.or(self.output_dir),
            base_url: overrides.base_url.or(self.base_url),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
            min_delay_secs: overrides.min_delay_secs.or(self.min_delay_secs),
            max_delay_secs: overrides.max_delay_secs.or(self.max_delay_secs),
            user_agents: overrides.user_agents.or(self.user_agents),
        }
    }
}

// ── Resolved config ─────────────────────────────────────────────────

/// Validated parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub symbols: Vec<String>,
    pub expiration_date: NaiveDate,
    pub percentage_below_close: f64,
    pub output_dir: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    pub user_agents: Vec<String>,
}

impl RunConfig {
    /// Fill defaults, normalise symbols and validate ranges.
    pub fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let symbols = match file.symbols {
            Some(symbols) => normalize_symbols(symbols)?,
            None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        };

        let raw_date = file
            .expiration_date
            .unwrap_or_else(|| DEFAULT_EXPIRATION_DATE.to_string());
        let expiration_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidDate { value: raw_date.clone() })?;

        let percentage = file.percentage_below_close.unwrap_or(DEFAULT_PERCENTAGE);
        if !percentage.is_finite() {
            return Err(ConfigError::InvalidPercentage { value: percentage });
        }

        let min = file.min_delay_secs.unwrap_or(DEFAULT_MIN_DELAY_SECS);
        let max = file.max_delay_secs.unwrap_or(DEFAULT_MAX_DELAY_SECS);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidDelay { min, max });
        }

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(RunConfig {
            symbols,
            expiration_date,
            percentage_below_close: percentage,
            output_dir: file
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            base_url: file
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            min_delay_secs: min,
            max_delay_secs: max,
            user_agents: file.user_agents.unwrap_or_default(),
        })
    }
}

fn normalize_symbols(symbols: Vec<String>) -> Result<Vec<String>, ConfigError> {
    if symbols.is_empty() {
        return Err(ConfigError::NoSymbols);
    }
    symbols
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let s = s.trim().to_uppercase();
            if s.is_empty() {
                Err(ConfigError::EmptySymbol { index: i + 1 })
            } else {
                Ok(s)
            }
        })
        .collect()
}
