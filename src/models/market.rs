use serde::{Deserialize, Serialize};
use std::fmt;

/// Source market family
///
/// Closed set: each family has exactly one processor, matched exhaustively.
/// Adding a market family is a compile-time change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketFamily {
    /// Legacy server-rendered exchange (continuous market + Growth segment).
    Bme,
    /// REST-API exchange using the ICB classification.
    Euronext,
    /// JSON REST micro exchange.
    Portfolio,
}

impl MarketFamily {
    /// Stable slug used for storage keys and logging.
    pub fn slug(&self) -> &'static str {
        match self {
            MarketFamily::Bme => "bme",
            MarketFamily::Euronext => "euronext",
            MarketFamily::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for MarketFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A concrete market segment a product can be listed on.
///
/// Migrations reference segments, not families: a transfer from Euronext
/// Access to Euronext Growth stays inside one family. `Unknown` is the
/// well-defined degradation for labels no table maps (never an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketId {
    BmeMain,
    BmeGrowth,
    EuronextAccess,
    EuronextGrowth,
    EuronextMain,
    Portfolio,
    Unknown,
}

impl MarketId {
    /// Stable slug ("bme-growth", "euronext-access", ...).
    pub fn slug(&self) -> &'static str {
        match self {
            MarketId::BmeMain => "bme",
            MarketId::BmeGrowth => "bme-growth",
            MarketId::EuronextAccess => "euronext-access",
            MarketId::EuronextGrowth => "euronext-growth",
            MarketId::EuronextMain => "euronext",
            MarketId::Portfolio => "portfolio",
            MarketId::Unknown => "unknown",
        }
    }

    /// Family the segment belongs to (`None` for `Unknown`).
    pub fn family(&self) -> Option<MarketFamily> {
        match self {
            MarketId::BmeMain | MarketId::BmeGrowth => Some(MarketFamily::Bme),
            MarketId::EuronextAccess | MarketId::EuronextGrowth | MarketId::EuronextMain => {
                Some(MarketFamily::Euronext)
            }
            MarketId::Portfolio => Some(MarketFamily::Portfolio),
            MarketId::Unknown => None,
        }
    }

    /// Normalize a raw market label as emitted by any of the sources.
    ///
    /// Labels appear in notice texts, listing entries and regulatory
    /// documents in many spellings ("Mercado Continuo", "Euronext Growth
    /// Paris", "MAB", ...). Matching is case-insensitive and specific labels
    /// are tested before generic ones, so "Euronext Growth Milan" never falls
    /// through to plain Euronext. Unmapped labels resolve to `Unknown`.
    pub fn from_label(label: &str) -> MarketId {
        let normalized = label.trim().to_lowercase();
        if normalized.is_empty() {
            return MarketId::Unknown;
        }

        // Alternative/growth segments before their parent markets.
        if normalized.contains("bme growth")
            || normalized.contains("mab")
            || normalized.contains("mercado alternativo")
        {
            return MarketId::BmeGrowth;
        }
        if normalized.contains("mercado continuo")
            || normalized.contains("bolsa de madrid")
            || normalized.contains("sibe")
            || normalized == "bme"
        {
            return MarketId::BmeMain;
        }
        if normalized.contains("euronext access") || normalized.contains("marché libre") {
            return MarketId::EuronextAccess;
        }
        if normalized.contains("euronext growth") || normalized.contains("alternext") {
            return MarketId::EuronextGrowth;
        }
        if normalized.contains("euronext") || normalized.contains("eurolist") {
            return MarketId::EuronextMain;
        }
        if normalized.contains("portfolio") {
            return MarketId::Portfolio;
        }

        MarketId::Unknown
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_specific_before_generic() {
        assert_eq!(MarketId::from_label("Euronext Growth Paris"), MarketId::EuronextGrowth);
        assert_eq!(MarketId::from_label("Euronext Access Paris"), MarketId::EuronextAccess);
        assert_eq!(MarketId::from_label("Euronext Paris"), MarketId::EuronextMain);
        assert_eq!(MarketId::from_label("BME Growth"), MarketId::BmeGrowth);
        assert_eq!(MarketId::from_label("Mercado Continuo"), MarketId::BmeMain);
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(MarketId::from_label(""), MarketId::Unknown);
        assert_eq!(MarketId::from_label("NYSE"), MarketId::Unknown);
    }

    #[test]
    fn test_family_mapping() {
        assert_eq!(MarketId::BmeGrowth.family(), Some(MarketFamily::Bme));
        assert_eq!(MarketId::EuronextAccess.family(), Some(MarketFamily::Euronext));
        assert_eq!(MarketId::Unknown.family(), None);
    }
}
