use crate::error::TickerError;

use super::types::{ChainPage, OptionQuote, SelectedPut, CONTRACT_MULTIPLIER};

/// Strike we aim for: `percentage` percent below the last close.
pub fn target_strike(last_close: f64, percentage: f64) -> f64 {
    last_close * (1.0 - percentage / 100.0)
}

/// The put whose strike is closest to `target`.
///
/// Calls and unknown contract types never take part in the comparison.
/// Equidistant puts resolve to the first one in `options` order.
pub fn nearest_put(options: &[OptionQuote], target: f64) -> Option<&OptionQuote> {
    let mut best: Option<(&OptionQuote, f64)> = None;
    for quote in options.iter().filter(|q| q.is_put()) {
        let distance = (quote.strike - target).abs();
        match best {
            // Ties keep the earlier quote.
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((quote, distance)),
        }
    }
    best.map(|(quote, _)| quote)
}

/// Pick the put nearest to `percentage` below the last close and scale its
/// bid into a per-contract premium.
pub fn select_put(
    ticker: &str,
    chain: &ChainPage,
    percentage: f64,
) -> Result<SelectedPut, TickerError> {
    let target = target_strike(chain.last_close, percentage);
    let quote = nearest_put(&chain.options, target).ok_or_else(|| {
        TickerError::Selection(format!(
            "{} quotes, none of them puts (target strike {target:.2})",
            chain.options.len()
        ))
    })?;

    let bid = quote.bid_price.ok_or_else(|| {
        TickerError::Data(format!("put at strike {} has no bid price", quote.strike))
    })?;

    Ok(SelectedPut {
        ticker: ticker.to_string(),
        last_close: chain.last_close,
        strike_price: quote.strike,
        bid_price: bid * CONTRACT_MULTIPLIER,
    })
}
