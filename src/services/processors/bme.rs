//! Processor for the BME family (continuous market and Growth segment).
//!
//! The two segments share scraped page structure but encode corporate
//! actions differently: continuous-market records carry typed event rows
//! inline, Growth records rely on the market-wide snapshot handed in by the
//! orchestrator. A Growth record without a snapshot is a hard error — its
//! corporate actions cannot be reconstructed from the record alone.

use chrono::{Datelike, Utc};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::{
    BmeProductDetails, GrowthActionsSnapshot, MarketFamily, MarketId, ProcessedProduct,
    ProductResult,
};
use crate::services::corporate_actions::{bme as bme_actions, growth as growth_actions};
use crate::services::liquidity::{self, ActivityRule, LiquidityInputs};
use crate::services::{market_cap, migrations, sectors, suspension};

use super::{finalize, iso, market_cap_of};

pub fn process(
    details: &BmeProductDetails,
    required_fields: &[String],
    snapshot: Option<&GrowthActionsSnapshot>,
    horizon_year: i32,
) -> ProductResult<ProcessedProduct> {
    match build(details, required_fields, snapshot, horizon_year) {
        Ok(result) => result,
        Err(error) => {
            warn!(name = %details.name, %error, "BME record failed to normalize");
            ProductResult::failure(error.to_string())
        }
    }
}

fn build(
    details: &BmeProductDetails,
    required_fields: &[String],
    snapshot: Option<&GrowthActionsSnapshot>,
    horizon_year: i32,
) -> Result<ProductResult<ProcessedProduct>> {
    let corporate_actions = match details.segment {
        MarketId::BmeGrowth => {
            let snapshot = snapshot.ok_or_else(|| {
                AppError::NotFound(format!(
                    "corporate-actions snapshot for {}",
                    MarketId::BmeGrowth.slug()
                ))
            })?;
            growth_actions::unify(&snapshot.for_company(&details.name))
        }
        _ => bme_actions::unify(&details.corporate_events),
    };

    let market_migrations = match details.segment {
        MarketId::BmeGrowth => migrations::from_growth_documents(&details.name, &details.documents),
        _ => Vec::new(),
    };

    let suspension = suspension::from_flag_or_date(details.suspended.as_deref());
    let sector = sectors::normalize(
        MarketFamily::Bme,
        details.sector.as_deref(),
        details.subsector.as_deref(),
        None,
    );

    let yearly_history = market_cap::build_from_yearly(
        &details.yearly_summary,
        details.shares,
        details.listing_date.map(|d| d.year()),
        horizon_year,
        Utc::now().year(),
    );

    let liquidity = liquidity::normalize(
        MarketFamily::Bme,
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
        market: details.segment,
        sector: sector.sector,
        subsector: sector.subsector,
        country: details.country.clone(),
        city: details.city.clone(),
        shares: details.shares,
        last_price: details.last_price,
        market_cap: market_cap_of(details.market_cap, details.last_price, details.shares),
        listing_date: details.listing_date.map(iso),
        market_listing_date: details.market_listing_date.or(details.listing_date).map(iso),
        is_suspended: suspension.is_suspended,
        suspended_date: suspension.suspended_date.map(iso),
        corporate_actions,
        market_migrations,
        liquidity,
        yearly_history,
        related_instruments: Vec::new(),
        url: details.url.clone(),
    };

    finalize(product, required_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    use crate::models::{BmeCorporateEvent, BmeEventKind, GrowthActionKind, GrowthActionRecord};

    fn details(name: &str, segment: MarketId) -> BmeProductDetails {
        BmeProductDetails {
            name: name.to_string(),
            isin: Some("ES0113900J37".to_string()),
            ticker: Some("TST".to_string()),
            currency: Some("EUR".to_string()),
            segment,
            sector: None,
            subsector: None,
            country: Some("Spain".to_string()),
            city: None,
            shares: Some(1_000_000),
            last_price: Some(3.5),
            market_cap: None,
            listing_date: NaiveDate::from_ymd_opt(2018, 4, 2),
            market_listing_date: None,
            suspended: None,
            yearly_summary: Vec::new(),
            corporate_events: Vec::new(),
            documents: Vec::new(),
            prices: Vec::new(),
            period_start: None,
            period_end: None,
            total_market_days: None,
            url: Some("https://example.test/tst".to_string()),
            fetched_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_continuous_market_end_to_end() {
        let mut raw = details("Banco Test", MarketId::BmeMain);
        raw.sector = Some("Servicios Financieros e Inmobiliarios".to_string());
        raw.subsector = Some("Bancos y Cajas de Ahorro".to_string());
        raw.suspended = Some("S".to_string());
        raw.corporate_events = vec![
            BmeCorporateEvent {
                kind: BmeEventKind::Dividend,
                date: "20240301".to_string(),
                detail: None,
            },
            BmeCorporateEvent {
                kind: BmeEventKind::Split,
                date: "20230101".to_string(),
                detail: None,
            },
        ];

        let result = process(&raw, &[], None, 2015);
        let product = result.data.expect("record should normalize");

        assert_eq!(product.sector, "Banks");
        assert_eq!(product.subsector, "Banks");
        assert!(product.is_suspended);
        assert!(product.suspended_date.is_none());
        assert_eq!(product.corporate_actions.dividends, vec!["2024-03-01"]);
        assert_eq!(product.corporate_actions.splits, vec!["2023-01-01"]);
        assert_eq!(product.market_cap, Some(3_500_000.0));
    }

    #[test]
    fn test_growth_requires_snapshot() {
        let raw = details("Acme Growth", MarketId::BmeGrowth);
        let result = process(&raw, &[], None, 2015);
        assert!(result.data.is_none());
        assert!(result.error.unwrap().contains("bme-growth"));
    }

    #[test]
    fn test_growth_uses_snapshot_filtered_to_company() {
        let raw = details("Acme Growth", MarketId::BmeGrowth);
        let snapshot = GrowthActionsSnapshot {
            records: vec![
                GrowthActionRecord {
                    company: "Acme Growth".to_string(),
                    date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
                    kind: GrowthActionKind::Dividend,
                    payment_class: None,
                },
                GrowthActionRecord {
                    company: "Someone Else".to_string(),
                    date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                    kind: GrowthActionKind::Dividend,
                    payment_class: None,
                },
            ],
        };

        let result = process(&raw, &[], Some(&snapshot), 2015);
        let product = result.data.unwrap();
        assert_eq!(product.corporate_actions.dividends, vec!["2023-05-01"]);
    }

    #[test]
    fn test_missing_required_fields_are_advisory() {
        let mut raw = details("Gappy", MarketId::BmeMain);
        raw.isin = None;
        raw.currency = None;

        let required = ["isin", "currency", "name"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let result = process(&raw, &required, None, 2015);

        assert!(result.data.is_some());
        assert_eq!(
            result.missing_fields.unwrap(),
            vec!["isin".to_string(), "currency".to_string()]
        );
    }
}
