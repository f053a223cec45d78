//! Market-Migration Resolver
//!
//! Infers the timeline of segment-to-segment transfers of one product from
//! whatever signal its source offers:
//!
//! - BME Growth: regex over free-text regulatory documents announcing
//!   exclusion from one segment with simultaneous admission to another
//! - Euronext: the product's chronological IPO/listing entries, some flagged
//!   as transfers
//! - Portfolio: a hand-maintained table of known historical moves
//!
//! Resolution is heuristic by design: an unresolvable endpoint degrades to
//! `MarketId::Unknown`, never to an error.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::models::{ListingEntry, MarketId, MarketMigration, RegulatoryDocument};

/// Segment-label alternation shared by the document patterns.
const SEGMENT_LABELS: &str = "BME Growth|Mercado Continuo|Mercado Alternativo Bursátil|MAB";

fn document_patterns() -> &'static Vec<(Regex, bool)> {
    static PATTERNS: OnceLock<Vec<(Regex, bool)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // The bool marks whether the first capture is the origin segment.
        // Both sentence orders occur in the documents: exclusion first
        // ("exclusión ... de X ... admisión ... en Y") and admission first.
        let exclusion_first = format!(
            r"(?i)exclusi[oó]n[^.]*?\b({SEGMENT_LABELS})\b[^.]*?(?:admisi[oó]n|incorporaci[oó]n)[^.]*?\b({SEGMENT_LABELS})\b"
        );
        let admission_first = format!(
            r"(?i)(?:admisi[oó]n|incorporaci[oó]n)[^.]*?\b({SEGMENT_LABELS})\b[^.]*?exclusi[oó]n[^.]*?\b({SEGMENT_LABELS})\b"
        );
        vec![
            (Regex::new(&exclusion_first).expect("invalid document pattern"), true),
            (Regex::new(&admission_first).expect("invalid document pattern"), false),
        ]
    })
}

/// Scan BME Growth regulatory documents for segment transfers.
///
/// At most one migration per document; duplicates over
/// `(date, from, to)` collapse.
pub fn from_growth_documents(name: &str, documents: &[RegulatoryDocument]) -> Vec<MarketMigration> {
    let mut seen: HashSet<(String, MarketId, MarketId)> = HashSet::new();
    let mut migrations = Vec::new();

    for document in documents {
        let matched = document_patterns().iter().find_map(|(regex, from_first)| {
            regex.captures(&document.title).map(|caps| {
                let first = MarketId::from_label(&caps[1]);
                let second = MarketId::from_label(&caps[2]);
                if *from_first {
                    (first, second)
                } else {
                    (second, first)
                }
            })
        });

        let (from, to) = match matched {
            Some(pair) => pair,
            None => continue,
        };
        if from == to {
            debug!(name, title = %document.title, "Discarding self-referential transfer");
            continue;
        }

        let date = document.date.format("%Y-%m-%d").to_string();
        if seen.insert((date.clone(), from, to)) {
            migrations.push(MarketMigration {
                date,
                from,
                to,
                name: name.to_string(),
            });
        }
    }

    migrations
}

fn transfer_detail_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // Most explicit first. Each pattern captures the origin market.
        [
            r"(?i)^\s*from\s+(.+?)\s+to\s+.+$",
            r"(?i)^\s*(.+?)\s+to\s+.+$",
            r"^\s*(.+?)\s+-\s+.+$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid transfer-detail pattern"))
        .collect()
    })
}

/// Resolve transfers from a product's chronological listing entries.
///
/// For each entry flagged as a transfer, `to` comes from the entry's own
/// market label. `from` comes from the transfer-details text when one of the
/// sentence patterns parses it, otherwise from the nearest earlier
/// non-transfer entry, otherwise `Unknown`. Entries whose target label maps
/// to nothing, or whose endpoints coincide, are discarded.
pub fn from_listing_entries(name: &str, entries: &[ListingEntry]) -> Vec<MarketMigration> {
    let mut migrations = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_transfer {
            continue;
        }

        let to = MarketId::from_label(&entry.market_label);
        if to == MarketId::Unknown {
            debug!(name, label = %entry.market_label, "Discarding transfer to unmappable market");
            continue;
        }

        let from = entry
            .transfer_details
            .as_deref()
            .and_then(parse_transfer_origin)
            .or_else(|| {
                entries[..index]
                    .iter()
                    .rev()
                    .find(|earlier| !earlier.is_transfer)
                    .map(|earlier| MarketId::from_label(&earlier.market_label))
            })
            .unwrap_or(MarketId::Unknown);

        if from == to {
            debug!(name, "Discarding self-referential transfer entry");
            continue;
        }

        migrations.push(MarketMigration {
            date: entry.date.format("%Y-%m-%d").to_string(),
            from,
            to,
            name: name.to_string(),
        });
    }

    migrations
}

/// Parse the origin market out of a free-text transfer description.
fn parse_transfer_origin(details: &str) -> Option<MarketId> {
    for regex in transfer_detail_patterns() {
        if let Some(caps) = regex.captures(details) {
            let origin = MarketId::from_label(&caps[1]);
            if origin != MarketId::Unknown {
                return Some(origin);
            }
        }
    }
    None
}

/// Known historical migrations on the Portfolio exchange.
///
/// The exchange publishes no transfer signal at all; this table is kept by
/// hand from its circulars.
pub fn portfolio_migrations(ticker: &str, name: &str) -> Vec<MarketMigration> {
    let moves: &[(&str, MarketId, MarketId)] = match ticker {
        "ALQ" => &[("2022-03-14", MarketId::BmeGrowth, MarketId::Portfolio)],
        "GSE" => &[("2023-01-30", MarketId::EuronextAccess, MarketId::Portfolio)],
        "URB" => &[("2021-11-02", MarketId::Unknown, MarketId::Portfolio)],
        _ => &[],
    };

    moves
        .iter()
        .map(|(date, from, to)| MarketMigration {
            date: date.to_string(),
            from: *from,
            to: *to,
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(date: (i32, u32, u32), title: &str) -> RegulatoryDocument {
        RegulatoryDocument {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title: title.to_string(),
        }
    }

    fn entry(
        date: (i32, u32, u32),
        market_label: &str,
        is_transfer: bool,
        transfer_details: Option<&str>,
    ) -> ListingEntry {
        ListingEntry {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            market_label: market_label.to_string(),
            is_transfer,
            transfer_details: transfer_details.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_growth_document_exclusion_first() {
        let migrations = from_growth_documents(
            "Acme",
            &[doc(
                (2023, 9, 18),
                "Exclusión de negociación de las acciones en BME Growth y \
                 simultánea admisión en el Mercado Continuo",
            )],
        );
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].from, MarketId::BmeGrowth);
        assert_eq!(migrations[0].to, MarketId::BmeMain);
        assert_eq!(migrations[0].date, "2023-09-18");
    }

    #[test]
    fn test_growth_document_admission_first() {
        let migrations = from_growth_documents(
            "Acme",
            &[doc(
                (2022, 2, 1),
                "Admisión a negociación en el Mercado Continuo tras la \
                 exclusión del Mercado Alternativo Bursátil",
            )],
        );
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].from, MarketId::BmeGrowth);
        assert_eq!(migrations[0].to, MarketId::BmeMain);
    }

    #[test]
    fn test_growth_documents_dedup_and_ignore_noise() {
        let transfer = "Exclusión de BME Growth y admisión en Mercado Continuo";
        let migrations = from_growth_documents(
            "Acme",
            &[
                doc((2023, 9, 18), transfer),
                doc((2023, 9, 18), transfer),
                doc((2023, 10, 1), "Convocatoria de Junta General Ordinaria"),
            ],
        );
        assert_eq!(migrations.len(), 1);
    }

    #[test]
    fn test_listing_entries_from_transfer_details() {
        let migrations = from_listing_entries(
            "Acme",
            &[
                entry((2019, 5, 1), "Euronext Access Paris", false, None),
                entry(
                    (2022, 6, 1),
                    "Euronext Growth Paris",
                    true,
                    Some("from Euronext Access to Euronext Growth"),
                ),
            ],
        );
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].from, MarketId::EuronextAccess);
        assert_eq!(migrations[0].to, MarketId::EuronextGrowth);
    }

    #[test]
    fn test_listing_entries_dash_pattern() {
        let migrations = from_listing_entries(
            "Acme",
            &[entry(
                (2022, 6, 1),
                "Euronext Growth Paris",
                true,
                Some("Euronext Access - Euronext Growth"),
            )],
        );
        assert_eq!(migrations[0].from, MarketId::EuronextAccess);
    }

    #[test]
    fn test_listing_entries_backward_walk_fallback() {
        let migrations = from_listing_entries(
            "Acme",
            &[
                entry((2018, 1, 1), "Euronext Access Paris", false, None),
                entry((2020, 1, 1), "Euronext Growth Paris", true, Some("upgrade")),
            ],
        );
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].from, MarketId::EuronextAccess);
    }

    #[test]
    fn test_listing_entries_unknown_origin_kept() {
        let migrations = from_listing_entries(
            "Acme",
            &[entry((2020, 1, 1), "Euronext Growth Paris", true, None)],
        );
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].from, MarketId::Unknown);
    }

    #[test]
    fn test_listing_entries_self_referential_discarded() {
        let migrations = from_listing_entries(
            "Acme",
            &[
                entry((2018, 1, 1), "Euronext Growth Paris", false, None),
                entry((2020, 1, 1), "Euronext Growth Paris", true, None),
            ],
        );
        assert!(migrations.is_empty());
    }

    #[test]
    fn test_portfolio_static_table() {
        let migrations = portfolio_migrations("ALQ", "Alquiber");
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].from, MarketId::BmeGrowth);
        assert_eq!(migrations[0].to, MarketId::Portfolio);

        assert!(portfolio_migrations("NOPE", "Nope").is_empty());
    }
}
