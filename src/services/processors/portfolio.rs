//! Processor for the Portfolio micro-exchange.
//!
//! Corporate actions come from the typed-document subtype table; the
//! suspension state from the explicit halt flag (with the halted-until
//! timestamp as fallback); migrations from the hand-maintained table.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::warn;

use crate::error::Result;
use crate::models::{MarketFamily, MarketId, PortfolioProductDetails, ProcessedProduct, ProductResult};
use crate::services::corporate_actions::portfolio as portfolio_actions;
use crate::services::liquidity::{self, ActivityRule, LiquidityInputs};
use crate::services::{market_cap, migrations, sectors, suspension};

use super::{finalize, iso, market_cap_of};

pub fn process(
    details: &PortfolioProductDetails,
    required_fields: &[String],
    horizon_year: i32,
) -> ProductResult<ProcessedProduct> {
    match build(details, required_fields, horizon_year) {
        Ok(result) => result,
        Err(error) => {
            warn!(name = %details.name, %error, "Portfolio record failed to normalize");
            ProductResult::failure(error.to_string())
        }
    }
}

fn build(
    details: &PortfolioProductDetails,
    required_fields: &[String],
    horizon_year: i32,
) -> Result<ProductResult<ProcessedProduct>> {
    let corporate_actions = portfolio_actions::unify(&details.documents);

    let state = suspension::from_explicit_flag(details.halted, details.halted_until, Utc::now());
    // The flag carries no date; the latest classified halt document does.
    let suspended_date = if state.is_suspended {
        state.suspended_date.or_else(|| {
            corporate_actions
                .trading_suspensions
                .last()
                .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        })
    } else {
        None
    };

    let sector = sectors::normalize(MarketFamily::Portfolio, details.sector.as_deref(), None, None);

    let market_migrations =
        migrations::portfolio_migrations(details.ticker.as_deref().unwrap_or(""), &details.name);

    let yearly_history = market_cap::build_from_daily(
        &details.prices,
        details.shares,
        details.listing_date.map(|d| d.year()),
        horizon_year,
        Utc::now().year(),
    );

    let liquidity = liquidity::normalize(
        MarketFamily::Portfolio,
        LiquidityInputs {
            prices: &details.prices,
            shares: details.shares,
            listing_date: details.listing_date,
            period_start: details.period_start,
            period_end: details.period_end,
            reported_market_days: details.total_market_days,
            activity: ActivityRule::NonZeroTurnover,
        },
    );

    let product = ProcessedProduct {
        isin: details.isin.clone(),
        name: details.name.clone(),
        ticker: details.ticker.clone(),
        currency: details.currency.clone(),
        market: MarketId::Portfolio,
        sector: sector.sector,
        subsector: sector.subsector,
        country: details.country.clone(),
        city: details.city.clone(),
        shares: details.shares,
        last_price: details.last_price,
        market_cap: market_cap_of(details.market_cap, details.last_price, details.shares),
        listing_date: details.listing_date.map(iso),
        market_listing_date: details.listing_date.map(iso),
        is_suspended: state.is_suspended,
        suspended_date: suspended_date.map(iso),
        corporate_actions,
        market_migrations,
        liquidity,
        yearly_history,
        related_instruments: Vec::new(),
        url: details.url.clone(),
    };

    finalize(product, required_fields)
}
