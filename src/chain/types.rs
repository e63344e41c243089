use serde::Deserialize;

/// Standard US equity option contract size (shares per contract).
///
/// The quoted bid is per share; multiplying by this gives the premium
/// collected for writing one contract.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Put,
    Call,
    #[serde(other)]
    Other,
}

/// One contract from the options chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionQuote {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: f64,
    /// Per-share bid. Illiquid strikes come back without one.
    #[serde(rename = "bidPrice", default)]
    pub bid_price: Option<f64>,
}

impl OptionQuote {
    pub fn put(strike: f64, bid_price: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            bid_price: Some(bid_price),
        }
    }

    pub fn call(strike: f64, bid_price: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            bid_price: Some(bid_price),
        }
    }

    pub fn is_put(&self) -> bool {
        self.option_type == OptionType::Put
    }
}

// ── Validated page ──────────────────────────────────────────────────

/// Decoded and validated quote page for one ticker/expiration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainPage {
    pub options: Vec<OptionQuote>,
    /// Always finite and strictly positive.
    pub last_close: f64,
}

/// The put chosen for a ticker, with its bid already scaled to a premium.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPut {
    pub ticker: String,
    pub last_close: f64,
    pub strike_price: f64,
    /// Bid × [`CONTRACT_MULTIPLIER`].
    pub bid_price: f64,
}
