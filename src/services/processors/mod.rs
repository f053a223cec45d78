//! Per-Market Product Processors
//!
//! One processor per market family. Each is a pure assembly step: it feeds
//! the shared leaf components (sector, suspension, corporate actions,
//! migrations, yearly caps, liquidity), builds the canonical record, then
//! runs the missing-field validator over it. Any internal failure becomes a
//! `ProductResult` error; nothing propagates past the processor boundary.
//!
//! The only I/O inside the core sits behind `CorporateActionsStore`: the BME
//! Growth segment needs a market-wide snapshot that is read once per market
//! (by the orchestrator) before any company is processed.

pub mod bme;
pub mod euronext;
pub mod portfolio;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{GrowthActionsSnapshot, ProcessedProduct, ProductResult};
use crate::services::validator;

/// Read-only storage collaborator for the BME Growth corporate-actions
/// snapshot. `Ok(None)` means no snapshot exists for the slug.
pub trait CorporateActionsStore: Send + Sync {
    fn load(&self, market_slug: &str) -> Result<Option<GrowthActionsSnapshot>>;
}

/// Validate the assembled record against the required field paths.
pub(crate) fn finalize(
    product: ProcessedProduct,
    required_fields: &[String],
) -> Result<ProductResult<ProcessedProduct>> {
    let serialized = serde_json::to_value(&product)?;
    let missing = validator::missing_fields(&serialized, required_fields);
    Ok(ProductResult::success(product, missing))
}

pub(crate) fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Current market cap, preferring the source's own figure.
pub(crate) fn market_cap_of(
    reported: Option<f64>,
    last_price: Option<f64>,
    shares: Option<u64>,
) -> Option<f64> {
    reported.or_else(|| match (last_price, shares) {
        (Some(price), Some(shares)) if shares > 0 => Some(price * shares as f64),
        _ => None,
    })
}
