use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

pub const CSV_HEADER: [&str; 6] = [
    "symbol",
    "stock_price",
    "strike_price",
    "bid_price",
    "collateral",
    "yield",
];

/// One output row: the selected put for a ticker and its yield.
#[derive(Debug, Clone, PartialEq)]
pub struct StockSnapshot {
    pub ticker: String,
    pub last_close: f64,
    pub strike_price: f64,
    /// Premium per contract.
    pub bid_price: f64,
    pub collateral: f64,
    pub yield_percent: f64,
}

impl StockSnapshot {
    fn record(&self) -> [String; 6] {
        [
            self.ticker.clone(),
            format_number(self.last_close),
            format_number(self.strike_price),
            format_number(self.bid_price),
            format_number(self.collateral),
            format_number(self.yield_percent),
        ]
    }
}

/// Two decimals, or a bare integer when the value is whole at cent precision
/// (`150.0` → `150`, `150.5` → `150.50`).
pub fn format_number(value: f64) -> String {
    let cents = format!("{value:.2}");
    match cents.strip_suffix(".00") {
        Some(whole) if whole == "-0" => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => cents,
    }
}

/// `<dir>/options_data_<date>_<percentage>.csv`
pub fn output_path(dir: &Path, expiration: NaiveDate, percentage: f64) -> PathBuf {
    dir.join(format!(
        "options_data_{}_{}.csv",
        expiration.format("%Y-%m-%d"),
        percentage
    ))
}

/// Write the header plus one row per snapshot, replacing any existing file.
/// Creates the parent directory if needed.
pub fn write_snapshots(path: &Path, rows: &[StockSnapshot]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record(row.record())?;
    }
    wtr.flush()
        .with_context(|| format!("writing CSV file {}", path.display()))?;
    Ok(())
}
