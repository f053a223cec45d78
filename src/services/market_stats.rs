//! Market statistics over normalized products.
//!
//! Downstream of the reconciliation engine: consumes `ProcessedProduct`s and
//! produces the distributions and summaries the cross-market reports are
//! built from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ProcessedProduct;

/// Summary statistics of one market's normalized products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatistics {
    pub total_products: usize,
    pub suspended_products: usize,
    pub products_with_migrations: usize,
    pub sector_distribution: HashMap<String, usize>,
    pub total_market_cap: f64,
    pub median_avg_daily_turnover: f64,
    pub average_turnover_velocity: f64,
}

/// Compute summary statistics over one market's products.
pub fn compute(products: &[ProcessedProduct]) -> MarketStatistics {
    let mut sector_distribution: HashMap<String, usize> = HashMap::new();
    let mut total_market_cap = 0.0;
    let mut suspended_products = 0;
    let mut products_with_migrations = 0;

    for product in products {
        *sector_distribution.entry(product.sector.clone()).or_default() += 1;
        total_market_cap += product.market_cap.unwrap_or(0.0);
        if product.is_suspended {
            suspended_products += 1;
        }
        if !product.market_migrations.is_empty() {
            products_with_migrations += 1;
        }
    }

    let turnovers: Vec<f64> = products
        .iter()
        .map(|p| p.liquidity.avg_daily_turnover)
        .collect();
    let velocities: Vec<f64> = products
        .iter()
        .map(|p| p.liquidity.turnover_velocity)
        .collect();

    MarketStatistics {
        total_products: products.len(),
        suspended_products,
        products_with_migrations,
        sector_distribution,
        total_market_cap,
        median_avg_daily_turnover: median(turnovers),
        average_turnover_velocity: mean(&velocities),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
