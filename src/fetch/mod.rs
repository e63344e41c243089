pub mod headers;
pub mod source;

pub use headers::{HeaderRotator, DEFAULT_USER_AGENTS};
pub use source::{quote_url, HttpSource, PageResponse, PageSource, DEFAULT_BASE_URL};

use crate::chain::{self, SelectedPut};
use crate::error::TickerError;

/// Fetch one quote page and reduce it to the selected put.
///
/// Stops at the first failing stage: HTTP status, embedded data block,
/// last close, put selection.
pub async fn fetch_put(
    source: &dyn PageSource,
    url: &str,
    ticker: &str,
    percentage: f64,
    user_agent: &str,
) -> Result<SelectedPut, TickerError> {
    let resp = source.get(url, user_agent).await?;
    if !resp.is_success() {
        return Err(TickerError::Fetch(format!("HTTP {} from {url}", resp.status)));
    }

    let page = chain::parse_chain_page(&resp.body)?;
    let selected = chain::select_put(ticker, &page, percentage)?;
    tracing::debug!(
        ticker,
        last_close = page.last_close,
        strike = selected.strike_price,
        premium = selected.bid_price,
        "selected put"
    );
    Ok(selected)
}
