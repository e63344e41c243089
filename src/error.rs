use thiserror::Error;

/// Why a single ticker produced no row.
///
/// Every variant is recoverable: the pipeline logs it against the ticker and
/// moves on to the next symbol.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TickerError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("bad quote data: {0}")]
    Data(String),

    #[error("no put option found: {0}")]
    Selection(String),

    #[error("expiration is {days} day(s) away; annualized yield needs at least 1")]
    Expiration { days: i64 },
}

impl TickerError {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TickerError::Fetch(_) => "fetch",
            TickerError::Parse(_) => "parse",
            TickerError::Data(_) => "data",
            TickerError::Selection(_) => "selection",
            TickerError::Expiration { .. } => "expiration",
        }
    }
}

impl From<reqwest::Error> for TickerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TickerError::Fetch(format!("request timed out: {err}"))
        } else {
            TickerError::Fetch(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_message_names_days() {
        let err = TickerError::Expiration { days: 0 };
        assert_eq!(
            err.to_string(),
            "expiration is 0 day(s) away; annualized yield needs at least 1"
        );
        assert_eq!(err.kind(), "expiration");
    }
}
