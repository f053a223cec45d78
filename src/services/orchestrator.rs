//! Market Batch Orchestrator
//!
//! Fans one market's raw records out over the per-family processors and
//! folds the outcomes into a batch result. One record failing never aborts
//! its siblings: every task runs to completion and errors are collected, not
//! propagated.
//!
//! The BME Growth corporate-actions snapshot is the one shared input: it is
//! read from storage exactly once, before the fan-out, and shared read-only
//! across the record tasks.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::config::ProcessingConfig;
use crate::models::{
    GrowthActionsSnapshot, MarketBatchResult, MarketId, ProcessedProduct, ProductError,
    ProductMissingFields, ProductResult, RawProductDetails,
};
use crate::services::processors::{self, CorporateActionsStore};

/// Route one raw record to its family's processor.
///
/// Exhaustive over the closed union: a new source family fails to compile
/// until it is handled here.
fn dispatch(
    record: &RawProductDetails,
    config: &ProcessingConfig,
    snapshot: Option<&GrowthActionsSnapshot>,
) -> ProductResult<ProcessedProduct> {
    let required = config.required_for(record.family());
    match record {
        RawProductDetails::Bme(details) => {
            processors::bme::process(details, required, snapshot, config.horizon_year)
        }
        RawProductDetails::Euronext(details) => {
            processors::euronext::process(details, required, config.horizon_year)
        }
        RawProductDetails::Portfolio(details) => {
            processors::portfolio::process(details, required, config.horizon_year)
        }
    }
}

/// Process every raw record of one market concurrently.
pub async fn process_market(
    records: Vec<RawProductDetails>,
    config: Arc<ProcessingConfig>,
    store: Arc<dyn CorporateActionsStore>,
) -> MarketBatchResult {
    let record_count = records.len();

    // One-time prerequisite read; per-record tasks never touch storage.
    let needs_snapshot = records.iter().any(|record| {
        matches!(record, RawProductDetails::Bme(details) if details.segment == MarketId::BmeGrowth)
    });
    let snapshot: Arc<Option<GrowthActionsSnapshot>> = Arc::new(if needs_snapshot {
        match store.load(MarketId::BmeGrowth.slug()) {
            Ok(snapshot) => {
                if snapshot.is_none() {
                    warn!("No corporate-actions snapshot available for bme-growth");
                }
                snapshot
            }
            Err(error) => {
                warn!(%error, "Failed to load corporate-actions snapshot");
                None
            }
        }
    } else {
        None
    });

    let mut names = Vec::with_capacity(records.len());
    let mut tasks = Vec::with_capacity(records.len());
    for record in records {
        let config = Arc::clone(&config);
        let snapshot = Arc::clone(&snapshot);
        names.push(record.name().to_string());
        tasks.push(tokio::spawn(async move {
            dispatch(&record, &config, snapshot.as_ref().as_ref())
        }));
    }

    let results = join_all(tasks).await;

    let mut batch = MarketBatchResult::default();
    for (name, joined) in names.into_iter().zip(results) {
        let result = match joined {
            Ok(result) => result,
            Err(error) => {
                warn!(%name, %error, "Record task did not complete");
                ProductResult::failure(format!("processing task failed: {}", error))
            }
        };

        match result.data {
            Some(product) => {
                if let Some(missing_fields) = result.missing_fields {
                    batch.products_with_missing_fields.push(ProductMissingFields {
                        name: name.clone(),
                        missing_fields,
                    });
                }
                batch.products.push(product);
            }
            None => batch.products_with_error.push(ProductError {
                name,
                error: result.error.unwrap_or_else(|| "unknown error".to_string()),
            }),
        }
    }

    info!(
        records = record_count,
        products = batch.products.len(),
        errors = batch.products_with_error.len(),
        with_missing_fields = batch.products_with_missing_fields.len(),
        "Market batch processed"
    );

    batch
}

/// Process several markets concurrently, one batch result per market.
pub async fn process_markets(
    markets: Vec<Vec<RawProductDetails>>,
    config: Arc<ProcessingConfig>,
    store: Arc<dyn CorporateActionsStore>,
) -> Vec<MarketBatchResult> {
    let futures = markets
        .into_iter()
        .map(|records| process_market(records, Arc::clone(&config), Arc::clone(&store)));
    join_all(futures).await
}
