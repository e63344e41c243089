use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;

use crate::config::RunConfig;
use crate::error::TickerError;
use crate::fetch::{self, HeaderRotator, HttpSource, PageSource};
use crate::metrics;
use crate::output::{self, StockSnapshot};

/// Outcome of a pipeline run: rows in input order plus the tickers that
/// were skipped and why.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub snapshots: Vec<StockSnapshot>,
    pub failures: Vec<(String, TickerError)>,
}

/// Sequential fetch → parse → select → compute over a list of tickers.
pub struct Pipeline<'a> {
    source: &'a dyn PageSource,
    rotator: HeaderRotator,
    base_url: String,
    expiration: NaiveDate,
    percentage: f64,
    days_to_expiration: i64,
    delay_secs: (f64, f64),
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        config: &RunConfig,
        days_to_expiration: i64,
    ) -> Self {
        Self {
            source,
            rotator: HeaderRotator::new(config.user_agents.clone()),
            base_url: config.base_url.clone(),
            expiration: config.expiration_date,
            percentage: config.percentage_below_close,
            days_to_expiration,
            delay_secs: (config.min_delay_secs, config.max_delay_secs),
        }
    }

    /// Process every ticker in order. A failing ticker is reported and
    /// skipped; it never stops the run.
    pub async fn run(&mut self, symbols: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (i, ticker) in symbols.iter().enumerate() {
            let url = fetch::quote_url(&self.base_url, ticker, self.expiration);
            println!("[{}/{}] Fetching URL: {url}", i + 1, symbols.len());

            match self.process(ticker, &url).await {
                Ok(snapshot) => {
                    println!(
                        "  OK  {} strike {} premium {} yield {}%",
                        snapshot.ticker,
                        output::format_number(snapshot.strike_price),
                        output::format_number(snapshot.bid_price),
                        output::format_number(snapshot.yield_percent),
                    );
                    summary.snapshots.push(snapshot);
                }
                Err(e) => {
                    println!("  WARN  Error fetching data for {ticker}: {e}");
                    tracing::warn!(ticker = %ticker, kind = e.kind(), error = %e, "ticker skipped");
                    summary.failures.push((ticker.clone(), e));
                }
            }

            if i + 1 < symbols.len() {
                self.pause().await;
            }
        }

        summary
    }

    async fn process(&mut self, ticker: &str, url: &str) -> Result<StockSnapshot, TickerError> {
        // No yield is computable, so don't spend a request on it.
        if self.days_to_expiration <= 0 {
            return Err(TickerError::Expiration {
                days: self.days_to_expiration,
            });
        }
        let user_agent = self.rotator.next_agent().to_string();
        let selected =
            fetch::fetch_put(self.source, url, ticker, self.percentage, &user_agent).await?;
        metrics::snapshot(selected, self.days_to_expiration)
    }

    /// Random politeness pause between requests.
    async fn pause(&self) {
        let (min, max) = self.delay_secs;
        if max <= 0.0 {
            return;
        }
        let secs = rand::rng().random_range(min..=max);
        tracing::debug!(secs, "sleeping before next ticker");
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}

/// What a `fetch` run produced: the CSV path and the per-ticker outcomes.
#[derive(Debug)]
pub struct RunReport {
    pub path: PathBuf,
    pub summary: RunSummary,
}

/// `fetch` command: run the pipeline over the configured tickers and write
/// the CSV. Per-ticker failures never abort the run; the CSV is written
/// even when every ticker was skipped.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let days = metrics::days_to_expiration(config.expiration_date);
    if days <= 0 {
        tracing::warn!(
            days,
            expiration = %config.expiration_date,
            "less than one whole day to expiration; every ticker will be skipped"
        );
    } else {
        tracing::debug!(days, expiration = %config.expiration_date, "days to expiration");
    }

    let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
    let summary = rt.block_on(async {
        let source = HttpSource::new(config.timeout)?;
        let mut pipeline = Pipeline::new(&source, config, days);
        Ok::<RunSummary, anyhow::Error>(pipeline.run(&config.symbols).await)
    })?;

    let path = output::output_path(
        &config.output_dir,
        config.expiration_date,
        config.percentage_below_close,
    );
    output::write_snapshots(&path, &summary.snapshots)?;

    println!(
        "\nDone: {} succeeded, {} failed.",
        summary.snapshots.len(),
        summary.failures.len()
    );
    println!("Data written to {}", path.display());
    Ok(RunReport { path, summary })
}
