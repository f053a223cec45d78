//! Classifier for Portfolio exchange disclosure documents.
//!
//! Documents carry an enumerated subtype; classification is a static lookup.
//! Governance and administrative subtypes (board changes, meetings, accounts)
//! are deliberately excluded — they are disclosures, not corporate actions.

use crate::models::{TypedDocument, UnifiedCorporateActions};

use super::{ActionType, ActionsBuilder};

/// Map one document subtype to a unified category; `None` means excluded.
pub fn classify_subtype(subtype: &str) -> Option<ActionType> {
    let action = match subtype.trim() {
        "DIVIDEND_ANNOUNCEMENT" | "DIVIDEND_PAYMENT" => ActionType::Dividend,
        "SHARE_SPLIT" => ActionType::Split,
        "REVERSE_SHARE_SPLIT" => ActionType::ReverseSplit,
        "CAPITAL_INCREASE" => ActionType::CapitalIncrease,
        "CAPITAL_REDUCTION" => ActionType::CapitalDecrease,
        "ADMISSION_TO_TRADING" => ActionType::Listing,
        "EXCLUSION_FROM_TRADING" | "DELISTING" => ActionType::Delisting,
        "TAKEOVER_BID" => ActionType::Takeover,
        "TRADING_HALT" => ActionType::TradingSuspension,
        "TRADING_RESUMPTION" => ActionType::TradingResumption,
        "MARKET_TRANSFER" => ActionType::MarketChange,
        "NAME_CHANGE" => ActionType::NameChange,
        "BONUS_ISSUE" => ActionType::FreeAllocation,
        // Not corporate actions: governance, personnel and periodic filings.
        "BOARD_CHANGE" | "GENERAL_MEETING" | "ANNUAL_ACCOUNTS" | "INTERIM_ACCOUNTS"
        | "AUDITOR_CHANGE" | "REGISTERED_ADVISOR_CHANGE" | "OTHER" => return None,
        _ => return None,
    };
    Some(action)
}

/// Unify one product's document list.
pub fn unify(documents: &[TypedDocument]) -> UnifiedCorporateActions {
    let mut builder = ActionsBuilder::new();
    for document in documents {
        if let Some(action) = classify_subtype(&document.subtype) {
            builder.push(action, document.date);
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(date: (i32, u32, u32), subtype: &str) -> TypedDocument {
        TypedDocument {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            subtype: subtype.to_string(),
        }
    }

    #[test]
    fn test_subtype_lookup() {
        assert_eq!(classify_subtype("SHARE_SPLIT"), Some(ActionType::Split));
        assert_eq!(
            classify_subtype("REVERSE_SHARE_SPLIT"),
            Some(ActionType::ReverseSplit)
        );
        assert_eq!(classify_subtype("TRADING_HALT"), Some(ActionType::TradingSuspension));
    }

    #[test]
    fn test_governance_subtypes_excluded() {
        for subtype in ["BOARD_CHANGE", "GENERAL_MEETING", "ANNUAL_ACCOUNTS", "OTHER"] {
            assert_eq!(classify_subtype(subtype), None, "{}", subtype);
        }
    }

    #[test]
    fn test_unknown_subtype_excluded() {
        assert_eq!(classify_subtype("SOMETHING_NEW"), None);
    }

    #[test]
    fn test_unify_skips_excluded_and_sorts() {
        let actions = unify(&[
            doc((2024, 6, 1), "DIVIDEND_PAYMENT"),
            doc((2024, 1, 1), "BOARD_CHANGE"),
            doc((2023, 6, 1), "DIVIDEND_ANNOUNCEMENT"),
        ]);
        assert_eq!(actions.dividends, vec!["2023-06-01", "2024-06-01"]);
        assert!(actions.name_changes.is_empty());
    }
}
