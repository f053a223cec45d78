//! Processor for Euronext REST-API records.
//!
//! Corporate actions come from notice-title classification; the suspension
//! state is derived from the classified suspension/resumption pair; the
//! migration timeline comes from the chronological listing entries.

use chrono::{Datelike, Utc};
use tracing::warn;

use crate::error::Result;
use crate::models::{EuronextProductDetails, MarketFamily, MarketId, ProcessedProduct, ProductResult};
use crate::services::corporate_actions::notices;
use crate::services::liquidity::{self, ActivityRule, LiquidityInputs};
use crate::services::{market_cap, migrations, sectors, suspension};

use super::{finalize, iso, market_cap_of};

pub fn process(
    details: &EuronextProductDetails,
    required_fields: &[String],
    horizon_year: i32,
) -> ProductResult<ProcessedProduct> {
    match build(details, required_fields, horizon_year) {
        Ok(result) => result,
        Err(error) => {
            warn!(name = %details.name, %error, "Euronext record failed to normalize");
            ProductResult::failure(error.to_string())
        }
    }
}

fn build(
    details: &EuronextProductDetails,
    required_fields: &[String],
    horizon_year: i32,
) -> Result<ProductResult<ProcessedProduct>> {
    let corporate_actions = notices::unify(&details.notices);
    let suspension = suspension::from_notice_pair(&corporate_actions);

    let sector = sectors::normalize(
        MarketFamily::Euronext,
        details.icb_sector.as_deref(),
        details.icb_subsector.as_deref(),
        details.icb_supersector.as_deref(),
    );

    let market_migrations = migrations::from_listing_entries(&details.name, &details.listing_entries);

    // The market-listing date is the most recent listing entry; products
    // without entries fall back to their first listing date.
    let market_listing_date = details
        .listing_entries
        .last()
        .map(|entry| entry.date)
        .or(details.listing_date);

    let yearly_history = market_cap::build_from_daily(
        &details.prices,
        details.shares,
        details.listing_date.map(|d| d.year()),
        horizon_year,
        Utc::now().year(),
    );

    // Euronext only serves rows for days the product traded, so presence in
    // the series is the activity signal and the row count is the day count.
    let liquidity = liquidity::normalize(
        MarketFamily::Euronext,
        LiquidityInputs {
            prices: &details.prices,
            shares: details.shares,
            listing_date: details.listing_date,
            period_start: None,
            period_end: None,
            reported_market_days: None,
            activity: ActivityRule::PresenceOfPrice,
        },
    );

    let product = ProcessedProduct {
        isin: details.isin.clone(),
        name: details.name.clone(),
        ticker: details.ticker.clone(),
        currency: details.currency.clone(),
        market: MarketId::from_label(&details.market_label),
        sector: sector.sector,
        subsector: sector.subsector,
        country: details.country.clone(),
        city: details.city.clone(),
        shares: details.shares,
        last_price: details.last_price,
        market_cap: market_cap_of(details.market_cap, details.last_price, details.shares),
        listing_date: details.listing_date.map(iso),
        market_listing_date: market_listing_date.map(iso),
        is_suspended: suspension.is_suspended,
        suspended_date: suspension.suspended_date.map(iso),
        corporate_actions,
        market_migrations,
        liquidity,
        yearly_history,
        related_instruments: details.related_instruments.clone(),
        url: details.url.clone(),
    };

    finalize(product, required_fields)
}
