//! Regex classifier for free-text Euronext notice titles.
//!
//! Classification walks `NOTICE_PATTERNS` in order and the first match wins,
//! so specific categories must sit above their generic counterparts:
//! `ReverseSplit` before `Split`, `TradingResumption` before
//! `TradingSuspension`. A title matching nothing is dropped silently — most
//! notices are not corporate actions.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Notice, UnifiedCorporateActions};

use super::{ActionType, ActionsBuilder};

/// Ordered `(category, pattern)` pairs. Order is load-bearing.
pub const NOTICE_PATTERNS: &[(ActionType, &str)] = &[
    (
        ActionType::ReverseSplit,
        r"(?i)reverse\s+(?:stock\s+)?split|regroupement d'actions|contrasplit",
    ),
    (
        ActionType::Split,
        r"(?i)\bstock\s+split\b|\bsplit\b|division d'actions|desdoblamiento",
    ),
    (
        ActionType::TradingResumption,
        r"(?i)resumption of trading|trading resum\w*|reprise de cotation",
    ),
    (
        ActionType::TradingSuspension,
        r"(?i)suspension of trading|trading suspen\w*|suspension de cotation",
    ),
    (ActionType::Dividend, r"(?i)\bdividend\b|coupon payment|\bcoupon\b"),
    (
        ActionType::CapitalIncrease,
        r"(?i)capital increase|rights issue|augmentation de capital",
    ),
    (
        ActionType::CapitalDecrease,
        r"(?i)capital (?:decrease|reduction)|r[ée]duction de capital",
    ),
    (
        ActionType::Listing,
        r"(?i)admission to trading|initial public offering|\bIPO\b|first listing|first trading day",
    ),
    (
        ActionType::Delisting,
        r"(?i)delisting|withdrawal from trading|removal from trading|radiation",
    ),
    (
        ActionType::Takeover,
        r"(?i)takeover|tender offer|public offer|offre publique",
    ),
    (
        ActionType::MarketChange,
        r"(?i)transfer (?:to|from) (?:euronext|the)|market transfer",
    ),
    (
        ActionType::NameChange,
        r"(?i)(?:change of|new) (?:company )?name|name change|changement de d[ée]nomination",
    ),
    (
        ActionType::FreeAllocation,
        r"(?i)free (?:share )?allocation|bonus (?:share|issue)|attribution gratuite",
    ),
];

fn compiled_patterns() -> &'static Vec<(ActionType, Regex)> {
    static PATTERNS: OnceLock<Vec<(ActionType, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        NOTICE_PATTERNS
            .iter()
            .map(|(action, pattern)| {
                // Patterns are compile-time constants; a failure here is a
                // programming error caught by the pattern tests below.
                (*action, Regex::new(pattern).expect("invalid notice pattern"))
            })
            .collect()
    })
}

/// Classify one notice title, first matching pattern wins.
pub fn classify(title: &str) -> Option<ActionType> {
    compiled_patterns()
        .iter()
        .find(|(_, regex)| regex.is_match(title))
        .map(|(action, _)| *action)
}

/// Unify one product's notices; unclassifiable notices are dropped.
pub fn unify(notices: &[Notice]) -> UnifiedCorporateActions {
    let mut builder = ActionsBuilder::new();
    for notice in notices {
        if let Some(action) = classify(&notice.title) {
            builder.push(action, notice.date);
        }
    }
    builder.finish()
}
