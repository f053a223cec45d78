//! Suspension Resolver
//!
//! Three incompatible raw signals, one answer: is the product suspended now,
//! and since when. One predicate per source family.

use chrono::{DateTime, NaiveDate, Utc};

use crate::constants::BME_SUSPENSION_SENTINEL;
use crate::models::UnifiedCorporateActions;

/// Current suspension state of one product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuspensionState {
    pub is_suspended: bool,
    pub suspended_date: Option<NaiveDate>,
}

impl SuspensionState {
    fn suspended(date: Option<NaiveDate>) -> Self {
        Self {
            is_suspended: true,
            suspended_date: date,
        }
    }

    fn trading() -> Self {
        Self::default()
    }
}

/// BME: a raw cell that is empty, a sentinel flag, or a date.
///
/// The sentinel means suspended with no known date. Any other non-empty
/// value means suspended since that date; BME prints both `DD/MM/YYYY` and
/// ISO depending on the page, and a value that parses as neither still
/// counts as suspended, just without a usable date.
pub fn from_flag_or_date(raw: Option<&str>) -> SuspensionState {
    let raw = raw.unwrap_or("").trim();
    if raw.is_empty() {
        return SuspensionState::trading();
    }
    if raw == BME_SUSPENSION_SENTINEL {
        return SuspensionState::suspended(None);
    }
    SuspensionState::suspended(parse_flexible_date(raw))
}

/// Euronext: compare the latest suspension notice against the latest
/// resumption notice.
///
/// Both lists come from the unifier, so they are ISO-formatted and sorted
/// ascending; the lexicographically last entry is the chronologically last
/// one. Suspended iff the last suspension is strictly after the last
/// resumption, or suspensions exist without any resumption.
pub fn from_notice_pair(actions: &UnifiedCorporateActions) -> SuspensionState {
    let last_suspension = actions.trading_suspensions.last();
    let last_resumption = actions.trading_resumptions.last();

    match (last_suspension, last_resumption) {
        (Some(susp), Some(resu)) if susp.as_str() > resu.as_str() => {
            SuspensionState::suspended(parse_flexible_date(susp))
        }
        (Some(susp), None) => SuspensionState::suspended(parse_flexible_date(susp)),
        _ => SuspensionState::trading(),
    }
}

/// Portfolio: an explicit halt flag wins; without it, a halted-until
/// timestamp in the future means currently halted.
pub fn from_explicit_flag(
    halted: Option<bool>,
    halted_until: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> SuspensionState {
    match halted {
        Some(true) => SuspensionState::suspended(None),
        Some(false) => SuspensionState::trading(),
        None => match halted_until {
            Some(until) if until > now => SuspensionState::suspended(None),
            _ => SuspensionState::trading(),
        },
    }
}

fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_flag_or_date_sentinel() {
        let state = from_flag_or_date(Some("S"));
        assert!(state.is_suspended);
        assert!(state.suspended_date.is_none());
    }

    #[test]
    fn test_flag_or_date_with_dates() {
        let state = from_flag_or_date(Some("15/03/2023"));
        assert!(state.is_suspended);
        assert_eq!(state.suspended_date, Some(date(2023, 3, 15)));

        let state = from_flag_or_date(Some("2023-03-15"));
        assert_eq!(state.suspended_date, Some(date(2023, 3, 15)));
    }

    #[test]
    fn test_flag_or_date_empty_means_trading() {
        assert!(!from_flag_or_date(None).is_suspended);
        assert!(!from_flag_or_date(Some("")).is_suspended);
        assert!(!from_flag_or_date(Some("  ")).is_suspended);
    }

    #[test]
    fn test_notice_pair_suspended_after_resumption() {
        let actions = UnifiedCorporateActions {
            trading_suspensions: vec!["2022-01-01".to_string(), "2024-05-01".to_string()],
            trading_resumptions: vec!["2022-02-01".to_string()],
            ..Default::default()
        };
        let state = from_notice_pair(&actions);
        assert!(state.is_suspended);
        assert_eq!(state.suspended_date, Some(date(2024, 5, 1)));
    }

    #[test]
    fn test_notice_pair_resumed() {
        let actions = UnifiedCorporateActions {
            trading_suspensions: vec!["2022-01-01".to_string()],
            trading_resumptions: vec!["2022-02-01".to_string()],
            ..Default::default()
        };
        assert!(!from_notice_pair(&actions).is_suspended);

        // Same-day suspension and resumption is not "strictly after".
        let actions = UnifiedCorporateActions {
            trading_suspensions: vec!["2022-01-01".to_string()],
            trading_resumptions: vec!["2022-01-01".to_string()],
            ..Default::default()
        };
        assert!(!from_notice_pair(&actions).is_suspended);
    }

    #[test]
    fn test_notice_pair_suspension_without_resumption() {
        let actions = UnifiedCorporateActions {
            trading_suspensions: vec!["2023-07-01".to_string()],
            ..Default::default()
        };
        assert!(from_notice_pair(&actions).is_suspended);
    }

    #[test]
    fn test_explicit_flag_wins_over_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        // halted=true with a past halted-until is still suspended.
        assert!(from_explicit_flag(Some(true), Some(past), now).is_suspended);
        // halted=false with a future halted-until is not suspended.
        assert!(!from_explicit_flag(Some(false), Some(future), now).is_suspended);
    }

    #[test]
    fn test_timestamp_fallback_without_flag() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        assert!(from_explicit_flag(None, Some(future), now).is_suspended);
        assert!(!from_explicit_flag(None, Some(past), now).is_suspended);
        assert!(!from_explicit_flag(None, None, now).is_suspended);
    }
}
