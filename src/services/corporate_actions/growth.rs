//! Unifier for the BME Growth market-wide snapshot.
//!
//! Input records are already filtered to one company. Every record kind maps
//! 1:1 onto a unified list except special payments, which branch on their
//! payment class.

use crate::constants::SCRIP_PAYMENT_CLASS;
use crate::models::{GrowthActionKind, GrowthActionRecord, UnifiedCorporateActions};

use super::{ActionType, ActionsBuilder};

/// Unify one company's snapshot records.
pub fn unify(records: &[&GrowthActionRecord]) -> UnifiedCorporateActions {
    let mut builder = ActionsBuilder::new();

    for record in records {
        let action = match record.kind {
            GrowthActionKind::Dividend => ActionType::Dividend,
            GrowthActionKind::Split => ActionType::Split,
            GrowthActionKind::ReverseSplit => ActionType::ReverseSplit,
            GrowthActionKind::CapitalIncrease => ActionType::CapitalIncrease,
            GrowthActionKind::CapitalDecrease => ActionType::CapitalDecrease,
            GrowthActionKind::Listing => ActionType::Listing,
            GrowthActionKind::Delisting => ActionType::Delisting,
            GrowthActionKind::Takeover => ActionType::Takeover,
            GrowthActionKind::Suspension => ActionType::TradingSuspension,
            GrowthActionKind::Resumption => ActionType::TradingResumption,
            GrowthActionKind::MarketChange => ActionType::MarketChange,
            GrowthActionKind::NameChange => ActionType::NameChange,
            GrowthActionKind::SpecialPayment => match record.payment_class.as_deref() {
                Some(class) if class.trim() == SCRIP_PAYMENT_CLASS => ActionType::FreeAllocation,
                _ => ActionType::Dividend,
            },
        };
        builder.push(action, record.date);
    }

    builder.finish()
}
