//! Corporate-Actions Unifier
//!
//! Four source-specific classifiers converge on one
//! `UnifiedCorporateActions` shape:
//!
//! - `bme` — typed continuous-market event rows with compact `YYYYMMDD` dates
//! - `growth` — the BME Growth market-wide snapshot, pre-filtered to one company
//! - `notices` — regex classification of free-text Euronext notice titles
//! - `portfolio` — static subtype lookup over typed disclosure documents
//!
//! All of them go through `ActionsBuilder`, which enforces the shared
//! invariant once: every output list is ISO-formatted, sorted ascending and
//! de-duplicated.

pub mod bme;
pub mod growth;
pub mod notices;
pub mod portfolio;

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::UnifiedCorporateActions;

/// The closed set of unified corporate-action categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    Dividend,
    Split,
    ReverseSplit,
    CapitalIncrease,
    CapitalDecrease,
    Listing,
    Delisting,
    Takeover,
    TradingSuspension,
    TradingResumption,
    MarketChange,
    NameChange,
    FreeAllocation,
}

/// Accumulates classified dates and materializes the unified shape.
///
/// Backed by ordered sets, so sortedness and de-duplication hold for
/// arbitrarily shuffled or duplicated input.
#[derive(Debug, Default)]
pub struct ActionsBuilder {
    dividends: BTreeSet<NaiveDate>,
    splits: BTreeSet<NaiveDate>,
    reverse_splits: BTreeSet<NaiveDate>,
    capital_increases: BTreeSet<NaiveDate>,
    capital_decreases: BTreeSet<NaiveDate>,
    listings: BTreeSet<NaiveDate>,
    delistings: BTreeSet<NaiveDate>,
    takeovers: BTreeSet<NaiveDate>,
    trading_suspensions: BTreeSet<NaiveDate>,
    trading_resumptions: BTreeSet<NaiveDate>,
    market_changes: BTreeSet<NaiveDate>,
    name_changes: BTreeSet<NaiveDate>,
    free_allocations: BTreeSet<NaiveDate>,
}

impl ActionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: ActionType, date: NaiveDate) {
        let target = match action {
            ActionType::Dividend => &mut self.dividends,
            ActionType::Split => &mut self.splits,
            ActionType::ReverseSplit => &mut self.reverse_splits,
            ActionType::CapitalIncrease => &mut self.capital_increases,
            ActionType::CapitalDecrease => &mut self.capital_decreases,
            ActionType::Listing => &mut self.listings,
            ActionType::Delisting => &mut self.delistings,
            ActionType::Takeover => &mut self.takeovers,
            ActionType::TradingSuspension => &mut self.trading_suspensions,
            ActionType::TradingResumption => &mut self.trading_resumptions,
            ActionType::MarketChange => &mut self.market_changes,
            ActionType::NameChange => &mut self.name_changes,
            ActionType::FreeAllocation => &mut self.free_allocations,
        };
        target.insert(date);
    }

    pub fn finish(self) -> UnifiedCorporateActions {
        fn iso(dates: BTreeSet<NaiveDate>) -> Vec<String> {
            dates.into_iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
        }

        UnifiedCorporateActions {
            dividends: iso(self.dividends),
            splits: iso(self.splits),
            reverse_splits: iso(self.reverse_splits),
            capital_increases: iso(self.capital_increases),
            capital_decreases: iso(self.capital_decreases),
            listings: iso(self.listings),
            delistings: iso(self.delistings),
            takeovers: iso(self.takeovers),
            trading_suspensions: iso(self.trading_suspensions),
            trading_resumptions: iso(self.trading_resumptions),
            market_changes: iso(self.market_changes),
            name_changes: iso(self.name_changes),
            free_allocations: iso(self.free_allocations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_sorts_and_dedups_shuffled_input() {
        let mut builder = ActionsBuilder::new();
        for (y, m, d) in [(2024, 3, 1), (2021, 1, 15), (2024, 3, 1), (2022, 7, 30), (2021, 1, 15)] {
            builder.push(ActionType::Dividend, date(y, m, d));
        }
        let actions = builder.finish();
        assert_eq!(actions.dividends, vec!["2021-01-15", "2022-07-30", "2024-03-01"]);
    }

    #[test]
    fn test_every_field_sorted_and_unique() {
        let mut builder = ActionsBuilder::new();
        let all = [
            ActionType::Dividend,
            ActionType::Split,
            ActionType::ReverseSplit,
            ActionType::CapitalIncrease,
            ActionType::CapitalDecrease,
            ActionType::Listing,
            ActionType::Delisting,
            ActionType::Takeover,
            ActionType::TradingSuspension,
            ActionType::TradingResumption,
            ActionType::MarketChange,
            ActionType::NameChange,
            ActionType::FreeAllocation,
        ];
        for action in all {
            builder.push(action, date(2023, 6, 2));
            builder.push(action, date(2023, 6, 1));
            builder.push(action, date(2023, 6, 2));
        }
        let actions = builder.finish();
        for (name, list) in actions.fields() {
            assert_eq!(list, &vec!["2023-06-01".to_string(), "2023-06-02".to_string()], "{}", name);
        }
    }
}
