//! Processing configuration.
//!
//! Which fields count as "required" is a reporting decision, not an engine
//! decision, so the lists live here and are handed to the processors. Paths
//! use the dot syntax understood by `services::validator`.

use serde::{Deserialize, Serialize};

use crate::constants::MARKET_CAP_HORIZON_YEAR;
use crate::models::MarketFamily;

/// Per-family lists of required field paths.
///
/// A required field that resolves empty is an advisory gap: the record is
/// still produced, the gap is reported alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredFields {
    pub bme: Vec<String>,
    pub euronext: Vec<String>,
    pub portfolio: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingConfig {
    /// First year of the yearly market-cap history.
    #[serde(default = "default_horizon_year")]
    pub horizon_year: i32,

    #[serde(default = "default_required_fields")]
    pub required_fields: RequiredFields,
}

fn default_horizon_year() -> i32 {
    MARKET_CAP_HORIZON_YEAR
}

fn default_required_fields() -> RequiredFields {
    let common = [
        "isin",
        "name",
        "ticker",
        "currency",
        "sector",
        "shares",
        "lastPrice",
        "listingDate",
    ];

    RequiredFields {
        bme: common.iter().map(|s| s.to_string()).collect(),
        euronext: common
            .iter()
            .chain(["country", "city"].iter())
            .map(|s| s.to_string())
            .collect(),
        portfolio: common.iter().map(|s| s.to_string()).collect(),
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            horizon_year: default_horizon_year(),
            required_fields: default_required_fields(),
        }
    }
}

impl ProcessingConfig {
    /// Required field paths for one market family.
    pub fn required_for(&self, family: MarketFamily) -> &[String] {
        match family {
            MarketFamily::Bme => &self.required_fields.bme,
            MarketFamily::Euronext => &self.required_fields.euronext,
            MarketFamily::Portfolio => &self.required_fields.portfolio,
        }
    }
}
