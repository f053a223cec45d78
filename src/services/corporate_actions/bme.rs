//! Unifier for BME continuous-market corporate-event rows.
//!
//! Source quirks handled here: dates arrive as compact `YYYYMMDD` strings;
//! share "mergers" are reverse splits; "other payments" split into dividends
//! vs. free allocations on their payment class; public offerings are folded
//! into listings.

use chrono::NaiveDate;
use tracing::debug;

use crate::constants::SCRIP_PAYMENT_CLASS;
use crate::models::{BmeCorporateEvent, BmeEventKind, UnifiedCorporateActions};

use super::{ActionType, ActionsBuilder};

/// Unify one product's typed event rows.
///
/// Rows with an unparseable date are dropped, never fail the record.
pub fn unify(events: &[BmeCorporateEvent]) -> UnifiedCorporateActions {
    let mut builder = ActionsBuilder::new();

    for event in events {
        let date = match parse_compact_date(&event.date) {
            Some(date) => date,
            None => {
                debug!(raw = %event.date, "Skipping BME event with malformed date");
                continue;
            }
        };

        let action = match event.kind {
            BmeEventKind::Dividend => ActionType::Dividend,
            BmeEventKind::Split => ActionType::Split,
            BmeEventKind::Merger => ActionType::ReverseSplit,
            BmeEventKind::OtherPayment => classify_payment(event.detail.as_deref()),
            BmeEventKind::PublicOffering => ActionType::Listing,
            BmeEventKind::CapitalIncrease => ActionType::CapitalIncrease,
            BmeEventKind::CapitalDecrease => ActionType::CapitalDecrease,
            BmeEventKind::Delisting => ActionType::Delisting,
            BmeEventKind::Takeover => ActionType::Takeover,
            BmeEventKind::Suspension => ActionType::TradingSuspension,
            BmeEventKind::Resumption => ActionType::TradingResumption,
            BmeEventKind::NameChange => ActionType::NameChange,
        };

        builder.push(action, date);
    }

    builder.finish()
}

/// Scrip payments are free share allocations; everything else is a dividend.
fn classify_payment(payment_class: Option<&str>) -> ActionType {
    match payment_class {
        Some(class) if class.trim() == SCRIP_PAYMENT_CLASS => ActionType::FreeAllocation,
        _ => ActionType::Dividend,
    }
}

/// Parse a compact `YYYYMMDD` date.
fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d").ok()
}
