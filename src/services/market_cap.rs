//! Yearly Market-Cap Builder
//!
//! Reconstructs a per-calendar-year market-capitalization series. Two input
//! shapes exist: daily price series (Euronext, Portfolio) and BME's yearly
//! summary table.
//!
//! Common rule: the series covers `max(horizon year, listing year)` through
//! the current year. Daily-series sources carry the last computed value
//! forward over years with no observation; BME only ever emits years it
//! observed, so its series has no fill.

use chrono::Datelike;

use crate::models::{BmeYearlyRow, DailyPrice, YearlyMarketCap};

/// Build the series from a daily price history.
///
/// The cap for a year is the chronologically last close within that year
/// times shares outstanding; years after the first valid value with no
/// observation repeat the prior value.
pub fn build_from_daily(
    prices: &[DailyPrice],
    shares: Option<u64>,
    listing_year: Option<i32>,
    horizon_year: i32,
    current_year: i32,
) -> Vec<YearlyMarketCap> {
    let shares = match shares {
        Some(shares) if shares > 0 => shares as f64,
        _ => return Vec::new(),
    };

    let start_year = listing_year.unwrap_or(horizon_year).max(horizon_year);
    if start_year > current_year {
        return Vec::new();
    }

    let mut sorted: Vec<&DailyPrice> = prices.iter().collect();
    sorted.sort_by_key(|p| p.date);

    let mut history = Vec::new();
    let mut carried: Option<f64> = None;

    for year in start_year..=current_year {
        let last_close = sorted
            .iter()
            .rev()
            .find(|p| p.date.year() == year)
            .map(|p| p.close);

        let market_cap = match last_close {
            Some(close) => {
                let cap = close * shares;
                carried = Some(cap);
                Some(cap)
            }
            None => carried,
        };

        if let Some(market_cap) = market_cap {
            history.push(YearlyMarketCap { year, market_cap });
        }
    }

    history
}

/// Build the series from BME's yearly summary table.
///
/// Only observed years appear; there is no carry-forward because the source
/// itself omits years without data.
pub fn build_from_yearly(
    rows: &[BmeYearlyRow],
    shares: Option<u64>,
    listing_year: Option<i32>,
    horizon_year: i32,
    current_year: i32,
) -> Vec<YearlyMarketCap> {
    let shares = match shares {
        Some(shares) if shares > 0 => shares as f64,
        _ => return Vec::new(),
    };

    let start_year = listing_year.unwrap_or(horizon_year).max(horizon_year);

    let mut history: Vec<YearlyMarketCap> = rows
        .iter()
        .filter(|row| row.year >= start_year && row.year <= current_year)
        .filter_map(|row| {
            row.last_price.map(|price| YearlyMarketCap {
                year: row.year,
                market_cap: price * shares,
            })
        })
        .collect();

    history.sort_by_key(|entry| entry.year);
    history.dedup_by_key(|entry| entry.year);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn price(y: i32, m: u32, d: u32, close: f64) -> DailyPrice {
        DailyPrice {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
            volume: 1000,
            turnover: close * 1000.0,
        }
    }

    #[test]
    fn test_daily_uses_last_observation_per_year() {
        let prices = vec![
            price(2022, 3, 1, 10.0),
            price(2022, 11, 20, 12.0),
            price(2023, 6, 1, 8.0),
        ];
        let history = build_from_daily(&prices, Some(1_000_000), Some(2022), 2015, 2023);
        assert_eq!(
            history,
            vec![
                YearlyMarketCap { year: 2022, market_cap: 12_000_000.0 },
                YearlyMarketCap { year: 2023, market_cap: 8_000_000.0 },
            ]
        );
    }

    #[test]
    fn test_daily_carry_forward_fills_gaps() {
        let prices = vec![price(2020, 12, 30, 5.0), price(2023, 2, 1, 7.0)];
        let history = build_from_daily(&prices, Some(100), Some(2019), 2015, 2023);
        let years: Vec<i32> = history.iter().map(|h| h.year).collect();
        // 2019 has no value yet (nothing to carry), then every year appears.
        assert_eq!(years, vec![2020, 2021, 2022, 2023]);
        assert_eq!(history[1].market_cap, 500.0); // carried from 2020
        assert_eq!(history[2].market_cap, 500.0);
        assert_eq!(history[3].market_cap, 700.0);
    }

    #[test]
    fn test_daily_horizon_clamps_start() {
        let prices = vec![price(2010, 6, 1, 3.0), price(2016, 6, 1, 4.0)];
        let history = build_from_daily(&prices, Some(10), Some(2005), 2015, 2016);
        // 2015 has no in-range observation and nothing carried from before
        // the horizon; the series starts at 2016.
        assert_eq!(history, vec![YearlyMarketCap { year: 2016, market_cap: 40.0 }]);
    }

    #[test]
    fn test_daily_without_shares_is_empty() {
        let prices = vec![price(2022, 1, 1, 10.0)];
        assert!(build_from_daily(&prices, None, Some(2022), 2015, 2023).is_empty());
        assert!(build_from_daily(&prices, Some(0), Some(2022), 2015, 2023).is_empty());
    }

    #[test]
    fn test_yearly_observed_years_only() {
        let rows = vec![
            BmeYearlyRow { year: 2019, last_price: Some(2.0), volume: None, turnover: None },
            BmeYearlyRow { year: 2022, last_price: Some(3.0), volume: None, turnover: None },
            BmeYearlyRow { year: 2021, last_price: None, volume: None, turnover: None },
        ];
        let history = build_from_yearly(&rows, Some(100), Some(2016), 2015, 2023);
        // 2020/2021/2023 absent, no fill; sorted ascending.
        assert_eq!(
            history,
            vec![
                YearlyMarketCap { year: 2019, market_cap: 200.0 },
                YearlyMarketCap { year: 2022, market_cap: 300.0 },
            ]
        );
    }

    #[test]
    fn test_yearly_respects_listing_year() {
        let rows = vec![
            BmeYearlyRow { year: 2016, last_price: Some(1.0), volume: None, turnover: None },
            BmeYearlyRow { year: 2020, last_price: Some(2.0), volume: None, turnover: None },
        ];
        let history = build_from_yearly(&rows, Some(10), Some(2018), 2015, 2023);
        assert_eq!(history, vec![YearlyMarketCap { year: 2020, market_cap: 20.0 }]);
    }
}
