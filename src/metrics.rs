//! Collateral and annualized yield for a cash-secured put.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::chain::SelectedPut;
use crate::error::TickerError;
use crate::output::StockSnapshot;

/// Collateral assumed per position, as a multiple of the last close.
pub const COLLATERAL_MULTIPLIER: f64 = 20.0;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Whole days from now until `expiration` (local midnight), truncated toward
/// zero. Zero for today, negative once the date has passed.
pub fn days_to_expiration(expiration: NaiveDate) -> i64 {
    days_to_expiration_from(expiration, Local::now().naive_local())
}

pub fn days_to_expiration_from(expiration: NaiveDate, now: NaiveDateTime) -> i64 {
    (expiration.and_time(NaiveTime::MIN) - now).num_days()
}

pub fn collateral(last_close: f64) -> f64 {
    last_close * COLLATERAL_MULTIPLIER
}

/// `(premium / collateral)` scaled to a yearly rate, in percent.
///
/// Rejects `days_to_expiration <= 0` instead of dividing by it.
pub fn annualized_yield(
    premium: f64,
    collateral: f64,
    days_to_expiration: i64,
) -> Result<f64, TickerError> {
    if days_to_expiration <= 0 {
        return Err(TickerError::Expiration {
            days: days_to_expiration,
        });
    }
    let days = days_to_expiration as f64;
    Ok((1.0 / collateral) * (premium / days * DAYS_PER_YEAR) * 100.0)
}

/// Attach collateral and yield to a selected put.
pub fn snapshot(
    selected: SelectedPut,
    days_to_expiration: i64,
) -> Result<StockSnapshot, TickerError> {
    let collateral = collateral(selected.last_close);
    let yield_percent = annualized_yield(selected.bid_price, collateral, days_to_expiration)?;
    Ok(StockSnapshot {
        ticker: selected.ticker,
        last_close: selected.last_close,
        strike_price: selected.strike_price,
        bid_price: selected.bid_price,
        collateral,
        yield_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_days_to_expiration_today_is_zero() {
        let now = at("2024-07-26", "14:30:00");
        assert_eq!(days_to_expiration_from(date("2024-07-26"), now), 0);
    }

    #[test]
    fn test_days_to_expiration_truncates_toward_zero() {
        let now = at("2024-04-17", "09:00:00");
        // 99 days and 15 hours.
        assert_eq!(days_to_expiration_from(date("2024-07-26"), now), 99);
        assert_eq!(
            days_to_expiration_from(date("2024-07-26"), at("2024-04-17", "00:00:00")),
            100
        );
        // 1 day and 9 hours in the past.
        assert_eq!(days_to_expiration_from(date("2024-04-16"), now), -1);
    }

    #[test]
    fn test_collateral() {
        assert_eq!(collateral(200.0), 4000.0);
    }

    #[test]
    fn test_annualized_yield() {
        let y = annualized_yield(210.0, 4000.0, 100).unwrap();
        assert!((y - 19.1625).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_days_rejected() {
        assert_eq!(
            annualized_yield(210.0, 4000.0, 0),
            Err(TickerError::Expiration { days: 0 })
        );
        assert_eq!(
            annualized_yield(210.0, 4000.0, -3),
            Err(TickerError::Expiration { days: -3 })
        );
    }

    #[test]
    fn test_snapshot() {
        let selected = SelectedPut {
            ticker: "AAPL".into(),
            last_close: 200.0,
            strike_price: 170.0,
            bid_price: 210.0,
        };
        let snap = snapshot(selected, 100).unwrap();
        assert_eq!(snap.ticker, "AAPL");
        assert_eq!(snap.collateral, 4000.0);
        assert!((snap.yield_percent - 19.1625).abs() < 1e-9);
    }
}
