use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::TickerError;

pub const DEFAULT_BASE_URL: &str = "https://finviz.com";

/// Raw HTTP response: status code plus body text.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where quote pages come from. The live implementation is [`HttpSource`];
/// tests plug in canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` with the given `User-Agent`. Transport failures are
    /// [`TickerError::Fetch`]; non-2xx statuses are returned as-is.
    async fn get(&self, url: &str, user_agent: &str) -> Result<PageResponse, TickerError>;
}

/// Quote page URL for one ticker and expiration, options-chain view.
pub fn quote_url(base_url: &str, ticker: &str, expiration: NaiveDate) -> String {
    format!(
        "{}/quote.ashx?t={}&ta=1&p=d&ty=oc&e={}",
        base_url.trim_end_matches('/'),
        ticker,
        expiration.format("%Y-%m-%d")
    )
}

// ── reqwest-backed source ───────────────────────────────────────────

pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("creating HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn get(&self, url: &str, user_agent: &str) -> Result<PageResponse, TickerError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        tracing::debug!(url, status, bytes = body.len(), "quote page received");
        Ok(PageResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_url() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 26).unwrap();
        assert_eq!(
            quote_url(DEFAULT_BASE_URL, "AAPL", date),
            "https://finviz.com/quote.ashx?t=AAPL&ta=1&p=d&ty=oc&e=2024-07-26"
        );
        assert_eq!(
            quote_url("http://127.0.0.1:8080/", "MSFT", date),
            "http://127.0.0.1:8080/quote.ashx?t=MSFT&ta=1&p=d&ty=oc&e=2024-07-26"
        );
    }

    #[test]
    fn test_success_range() {
        assert!(PageResponse::ok("").is_success());
        assert!(PageResponse { status: 204, body: String::new() }.is_success());
        assert!(!PageResponse { status: 302, body: String::new() }.is_success());
        assert!(!PageResponse { status: 429, body: String::new() }.is_success());
    }
}
