//! Canonical output shapes.
//!
//! Everything here is plain serializable data consumed by reporting: no
//! behavior beyond construction helpers, and nothing is mutated after a
//! processor assembles it.

use serde::{Deserialize, Serialize};

use super::market::MarketId;

/// The unified corporate-action timeline of one product.
///
/// Intentionally reduced to presence/timing: amounts and ratios do not
/// survive unification because the sources disagree on them. Invariant:
/// every list is ISO-formatted (`YYYY-MM-DD`), sorted ascending and
/// de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedCorporateActions {
    pub dividends: Vec<String>,
    pub splits: Vec<String>,
    pub reverse_splits: Vec<String>,
    pub capital_increases: Vec<String>,
    pub capital_decreases: Vec<String>,
    pub listings: Vec<String>,
    pub delistings: Vec<String>,
    pub takeovers: Vec<String>,
    pub trading_suspensions: Vec<String>,
    pub trading_resumptions: Vec<String>,
    pub market_changes: Vec<String>,
    pub name_changes: Vec<String>,
    pub free_allocations: Vec<String>,
}

impl UnifiedCorporateActions {
    /// All lists with their field names, for invariant checks and reporting.
    pub fn fields(&self) -> [(&'static str, &Vec<String>); 13] {
        [
            ("dividends", &self.dividends),
            ("splits", &self.splits),
            ("reverseSplits", &self.reverse_splits),
            ("capitalIncreases", &self.capital_increases),
            ("capitalDecreases", &self.capital_decreases),
            ("listings", &self.listings),
            ("delistings", &self.delistings),
            ("takeovers", &self.takeovers),
            ("tradingSuspensions", &self.trading_suspensions),
            ("tradingResumptions", &self.trading_resumptions),
            ("marketChanges", &self.market_changes),
            ("nameChanges", &self.name_changes),
            ("freeAllocations", &self.free_allocations),
        ]
    }
}

/// One historical segment-to-segment transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMigration {
    /// ISO date of the transfer.
    pub date: String,
    pub from: MarketId,
    pub to: MarketId,
    /// Product name, carried for reporting.
    pub name: String,
}

/// Market capitalization at the end of one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyMarketCap {
    pub year: i32,
    pub market_cap: f64,
}

/// Bias-corrected trading-activity figures, comparable across sources.
///
/// All ratios are `0.0` (never NaN or infinite) when the effective period is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liquidity {
    pub turnover: f64,
    pub volume: u64,
    pub avg_daily_turnover: f64,
    pub trading_days_ratio: f64,
    pub turnover_velocity: f64,
}

/// The canonical, source-agnostic product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProduct {
    pub isin: Option<String>,
    pub name: String,
    pub ticker: Option<String>,
    pub currency: Option<String>,
    pub market: MarketId,
    pub sector: String,
    pub subsector: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub shares: Option<u64>,
    pub last_price: Option<f64>,
    pub market_cap: Option<f64>,
    /// First listing on any market, ISO date.
    pub listing_date: Option<String>,
    /// Listing on the current market, ISO date.
    pub market_listing_date: Option<String>,
    pub is_suspended: bool,
    pub suspended_date: Option<String>,
    pub corporate_actions: UnifiedCorporateActions,
    pub market_migrations: Vec<MarketMigration>,
    pub liquidity: Liquidity,
    pub yearly_history: Vec<YearlyMarketCap>,
    /// Family-specific extra: ISINs of related listed instruments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_instruments: Vec<String>,
    pub url: Option<String>,
}

/// Uniform processor envelope: either a record or an error, never both.
///
/// `missing_fields` rides alongside a successful record; it marks advisory
/// gaps, not failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl<T> ProductResult<T> {
    /// A successful result; an empty gap list is dropped entirely.
    pub fn success(data: T, missing_fields: Vec<String>) -> Self {
        Self {
            data: Some(data),
            error: None,
            missing_fields: if missing_fields.is_empty() {
                None
            } else {
                Some(missing_fields)
            },
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            missing_fields: None,
        }
    }
}

/// A record that could not be normalized at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductError {
    pub name: String,
    pub error: String,
}

/// A normalized record with advisory gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMissingFields {
    pub name: String,
    pub missing_fields: Vec<String>,
}

/// Outcome of processing every raw record of one market.
///
/// A product with missing fields appears in both `products` and
/// `products_with_missing_fields`; errored records appear only in
/// `products_with_error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBatchResult {
    pub products: Vec<ProcessedProduct>,
    pub products_with_error: Vec<ProductError>,
    pub products_with_missing_fields: Vec<ProductMissingFields>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_result_success_drops_empty_gap_list() {
        let result = ProductResult::success(1u32, vec![]);
        assert!(result.data.is_some());
        assert!(result.error.is_none());
        assert!(result.missing_fields.is_none());

        let result = ProductResult::success(1u32, vec!["isin".to_string()]);
        assert_eq!(result.missing_fields.unwrap(), vec!["isin".to_string()]);
    }

    #[test]
    fn test_product_result_failure_has_no_data() {
        let result: ProductResult<u32> = ProductResult::failure("boom");
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_corporate_actions_serialize_camel_case() {
        let actions = UnifiedCorporateActions {
            reverse_splits: vec!["2023-01-01".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&actions).unwrap();
        assert!(json.get("reverseSplits").is_some());
        assert!(json.get("freeAllocations").is_some());
    }
}
