//! Liquidity Normalizer
//!
//! Turns each source's raw price history into trading-activity ratios that
//! are comparable across sources. The raw histories cover different absolute
//! windows (BME from a fixed start date, Euronext roughly two years, the
//! Portfolio exchange roughly one year), so a raw "total market days" count
//! is biased: a product trading for two full years would show twice the
//! market days of an identical product on a one-year source.
//!
//! The correction computes an effective one-year-equivalent period bounded by
//! the listing date, then scales the reported day count onto it. Every ratio
//! degrades to `0.0` when the effective period is empty — never NaN, never an
//! error.

use chrono::{Months, NaiveDate};
use tracing::warn;

use crate::constants::{expected_window, ONE_YEAR_MAX_DAYS};
use crate::models::{DailyPrice, Liquidity, MarketFamily};

/// What counts as a day with trading activity for a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRule {
    /// The series includes inactive days; only nonzero turnover counts.
    NonZeroTurnover,
    /// The series only contains rows for days the product traded.
    PresenceOfPrice,
}

/// Raw liquidity inputs of one product.
#[derive(Debug, Clone)]
pub struct LiquidityInputs<'a> {
    pub prices: &'a [DailyPrice],
    pub shares: Option<u64>,
    pub listing_date: Option<NaiveDate>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Trading-day count as reported by the source; falls back to the
    /// number of price rows.
    pub reported_market_days: Option<u32>,
    pub activity: ActivityRule,
}

/// Normalize one product's liquidity over its bias-corrected period.
pub fn normalize(family: MarketFamily, inputs: LiquidityInputs<'_>) -> Liquidity {
    let period_end = match inputs.period_end.or_else(|| last_date(inputs.prices)) {
        Some(date) => date,
        None => return Liquidity::default(),
    };
    let period_start = inputs
        .period_start
        .or_else(|| first_date(inputs.prices))
        .unwrap_or(period_end);

    check_window_drift(family, period_start, period_end);

    let one_year_ago = period_end
        .checked_sub_months(Months::new(12))
        .unwrap_or(period_start);

    let mut effective_start = period_start.max(one_year_ago);
    if let Some(listing) = inputs.listing_date {
        effective_start = effective_start.max(listing);
    }

    let total_days = inputs
        .reported_market_days
        .unwrap_or(inputs.prices.len() as u32);
    let effective_days = effective_market_days(
        total_days,
        inputs.listing_date,
        period_start,
        period_end,
        one_year_ago,
        effective_start,
    );

    let relevant: Vec<&DailyPrice> = inputs
        .prices
        .iter()
        .filter(|p| p.date >= effective_start)
        .collect();

    if relevant.is_empty() || effective_days == 0 {
        return Liquidity::default();
    }

    let turnover: f64 = relevant.iter().map(|p| p.turnover).sum();
    let volume: u64 = relevant.iter().map(|p| p.volume).sum();

    let active_days = match inputs.activity {
        ActivityRule::NonZeroTurnover => relevant.iter().filter(|p| p.turnover > 0.0).count(),
        ActivityRule::PresenceOfPrice => relevant.len(),
    };

    let avg_daily_turnover = turnover / effective_days as f64;
    let trading_days_ratio = active_days as f64 / effective_days as f64;

    let avg_close: f64 =
        relevant.iter().map(|p| p.close).sum::<f64>() / relevant.len() as f64;
    let turnover_velocity = match inputs.shares {
        Some(shares) if shares > 0 && avg_close > 0.0 => {
            turnover / (avg_close * shares as f64)
        }
        _ => 0.0,
    };

    Liquidity {
        turnover,
        volume,
        avg_daily_turnover,
        trading_days_ratio,
        turnover_velocity,
    }
}

/// Scale the reported trading-day count onto the effective period.
///
/// A recently listed product on a source whose window already covers at most
/// one year has an unbiased count; trust it. Otherwise shrink the count to a
/// one-year equivalent first, then to the effective span, rounding to the
/// nearest day at each step.
fn effective_market_days(
    total_days: u32,
    listing_date: Option<NaiveDate>,
    period_start: NaiveDate,
    period_end: NaiveDate,
    one_year_ago: NaiveDate,
    effective_start: NaiveDate,
) -> u32 {
    let full_span = (period_end - period_start).num_days();
    let listed_recently = listing_date.map_or(false, |listing| listing > one_year_ago);
    if listed_recently && full_span <= ONE_YEAR_MAX_DAYS {
        return total_days;
    }

    let one_year_span = (period_end - one_year_ago).num_days();
    let effective_span = (period_end - effective_start).num_days();
    if full_span <= 0 || one_year_span <= 0 || effective_span <= 0 {
        return 0;
    }

    let one_year_equivalent =
        (total_days as f64 * one_year_span as f64 / full_span as f64).round();
    (one_year_equivalent * effective_span as f64 / one_year_span as f64).round() as u32
}

/// Warn when a source's raw window no longer matches its expected length.
///
/// The scaling above assumes each source's window length; a silent upstream
/// change would corrupt every ratio without this check.
fn check_window_drift(family: MarketFamily, period_start: NaiveDate, period_end: NaiveDate) {
    let actual = (period_end - period_start).num_days();
    let expected = match family {
        MarketFamily::Bme => {
            let (y, m, d) = expected_window::BME_START;
            match NaiveDate::from_ymd_opt(y, m, d) {
                Some(start) if period_end > start => (period_end - start).num_days(),
                _ => return,
            }
        }
        MarketFamily::Euronext => expected_window::EURONEXT_DAYS,
        MarketFamily::Portfolio => expected_window::PORTFOLIO_DAYS,
    };

    if (actual - expected).abs() > expected_window::DRIFT_TOLERANCE_DAYS {
        warn!(
            market = %family,
            actual_days = actual,
            expected_days = expected,
            "Raw price window deviates from the expected source window"
        );
    }
}

fn first_date(prices: &[DailyPrice]) -> Option<NaiveDate> {
    prices.iter().map(|p| p.date).min()
}

fn last_date(prices: &[DailyPrice]) -> Option<NaiveDate> {
    prices.iter().map(|p| p.date).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inputs(prices: &[DailyPrice]) -> LiquidityInputs<'_> {
        LiquidityInputs {
            prices,
            shares: Some(1_000_000),
            listing_date: None,
            period_start: None,
            period_end: None,
            reported_market_days: None,
            activity: ActivityRule::NonZeroTurnover,
        }
    }

    #[test]
    fn test_zero_prices_all_fields_zero() {
        let liquidity = normalize(MarketFamily::Euronext, inputs(&[]));
        assert_eq!(liquidity, Liquidity::default());
        assert_eq!(liquidity.turnover, 0.0);
        assert_eq!(liquidity.avg_daily_turnover, 0.0);
        assert_eq!(liquidity.trading_days_ratio, 0.0);
        assert_eq!(liquidity.turnover_velocity, 0.0);
        assert!(liquidity.avg_daily_turnover.is_finite());
    }

    #[test]
    fn test_two_year_window_does_not_inflate_average() {
        // 508 trading days spread uniformly over a 2-year window, constant
        // daily turnover T. The average must come out near T, not 2T.
        let period_end = date(2024, 1, 1);
        let period_start = period_end - Duration::days(730);
        let daily_turnover = 50_000.0;

        let prices: Vec<DailyPrice> = (0..508)
            .map(|i| DailyPrice {
                date: period_start + Duration::days(i * 730 / 508),
                close: 10.0,
                volume: 5_000,
                turnover: daily_turnover,
            })
            .collect();

        let liquidity = normalize(
            MarketFamily::Euronext,
            LiquidityInputs {
                prices: &prices,
                shares: Some(1_000_000),
                listing_date: Some(period_start),
                period_start: Some(period_start),
                period_end: Some(period_end),
                reported_market_days: Some(508),
                activity: ActivityRule::PresenceOfPrice,
            },
        );

        let relative_error = (liquidity.avg_daily_turnover - daily_turnover).abs() / daily_turnover;
        assert!(
            relative_error < 0.01,
            "avg_daily_turnover {} should be close to {}",
            liquidity.avg_daily_turnover,
            daily_turnover
        );
    }

    #[test]
    fn test_recent_listing_short_window_trusts_reported_count() {
        let period_end = date(2024, 6, 1);
        let listing = date(2024, 1, 10);
        let prices: Vec<DailyPrice> = (0..100)
            .map(|i| DailyPrice {
                date: listing + Duration::days(i),
                close: 2.0,
                volume: 100,
                turnover: 200.0,
            })
            .collect();

        let liquidity = normalize(
            MarketFamily::Portfolio,
            LiquidityInputs {
                prices: &prices,
                shares: Some(10_000),
                listing_date: Some(listing),
                period_start: Some(listing),
                period_end: Some(period_end),
                reported_market_days: Some(100),
                activity: ActivityRule::NonZeroTurnover,
            },
        );

        // 100 active days over 100 reported market days.
        assert!((liquidity.trading_days_ratio - 1.0).abs() < 1e-9);
        assert!((liquidity.avg_daily_turnover - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_rule_nonzero_turnover() {
        let start = date(2024, 1, 1);
        let prices: Vec<DailyPrice> = (0..10)
            .map(|i| DailyPrice {
                date: start + Duration::days(i),
                close: 1.0,
                volume: if i % 2 == 0 { 10 } else { 0 },
                turnover: if i % 2 == 0 { 10.0 } else { 0.0 },
            })
            .collect();

        let liquidity = normalize(
            MarketFamily::Portfolio,
            LiquidityInputs {
                prices: &prices,
                shares: Some(100),
                listing_date: Some(start),
                period_start: Some(start),
                period_end: Some(start + Duration::days(9)),
                reported_market_days: Some(10),
                activity: ActivityRule::NonZeroTurnover,
            },
        );

        assert!((liquidity.trading_days_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_turnover_velocity() {
        let start = date(2024, 1, 1);
        let prices = vec![
            DailyPrice { date: start, close: 4.0, volume: 100, turnover: 400.0 },
            DailyPrice {
                date: start + Duration::days(1),
                close: 6.0,
                volume: 100,
                turnover: 600.0,
            },
        ];

        let liquidity = normalize(
            MarketFamily::Portfolio,
            LiquidityInputs {
                prices: &prices,
                shares: Some(1_000),
                listing_date: Some(start),
                period_start: Some(start),
                period_end: Some(start + Duration::days(1)),
                reported_market_days: Some(2),
                activity: ActivityRule::NonZeroTurnover,
            },
        );

        // turnover 1000 / (avg close 5 * 1000 shares) = 0.2
        assert!((liquidity.turnover_velocity - 0.2).abs() < 1e-9);
        assert_eq!(liquidity.volume, 200);
    }

    #[test]
    fn test_no_shares_zero_velocity_not_nan() {
        let start = date(2024, 1, 1);
        let prices = vec![DailyPrice { date: start, close: 4.0, volume: 100, turnover: 400.0 }];
        let mut raw = inputs(&prices);
        raw.shares = None;
        raw.listing_date = Some(start);

        let liquidity = normalize(MarketFamily::Portfolio, raw);
        assert_eq!(liquidity.turnover_velocity, 0.0);
        assert!(liquidity.turnover > 0.0);
    }
}
