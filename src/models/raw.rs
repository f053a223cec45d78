//! Raw per-source product shapes, as handed over by the fetch layer.
//!
//! These records are immutable snapshots: the engine never mutates them and
//! never fetches them itself. Optionality is explicit — a field that a source
//! sometimes omits is an `Option` here, so no downstream code has to assume a
//! value is present.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::market::{MarketFamily, MarketId};

/// One raw product record from any source.
///
/// Closed tagged union: the orchestrator dispatches on this exhaustively, so
/// a new source family is a compile-time change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum RawProductDetails {
    Bme(Box<BmeProductDetails>),
    Euronext(Box<EuronextProductDetails>),
    Portfolio(Box<PortfolioProductDetails>),
}

impl RawProductDetails {
    pub fn family(&self) -> MarketFamily {
        match self {
            RawProductDetails::Bme(_) => MarketFamily::Bme,
            RawProductDetails::Euronext(_) => MarketFamily::Euronext,
            RawProductDetails::Portfolio(_) => MarketFamily::Portfolio,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RawProductDetails::Bme(d) => &d.name,
            RawProductDetails::Euronext(d) => &d.name,
            RawProductDetails::Portfolio(d) => &d.name,
        }
    }
}

/// One daily price observation, shared by every source that serves a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub turnover: f64,
}

/// One row of the BME yearly summary table (one per observed year only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmeYearlyRow {
    pub year: i32,
    pub last_price: Option<f64>,
    pub volume: Option<u64>,
    pub turnover: Option<f64>,
}

/// Corporate-event row types as the BME continuous-market pages emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BmeEventKind {
    Dividend,
    Split,
    /// BME reports reverse splits as "mergers" of shares.
    Merger,
    /// Branches on the payment class: scrip payments are free allocations.
    OtherPayment,
    /// Folded into listings downstream.
    PublicOffering,
    CapitalIncrease,
    CapitalDecrease,
    Delisting,
    Takeover,
    Suspension,
    Resumption,
    NameChange,
}

/// One typed corporate-event row from the BME continuous market.
///
/// `date` is kept raw (`YYYYMMDD`) because reformatting it is an engine
/// concern; `detail` carries the payment class for `OtherPayment` rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmeCorporateEvent {
    pub kind: BmeEventKind,
    pub date: String,
    pub detail: Option<String>,
}

/// A free-text regulatory document attached to a product (BME Growth).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryDocument {
    pub date: NaiveDate,
    pub title: String,
}

/// Raw details scraped from either BME segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmeProductDetails {
    pub name: String,
    pub isin: Option<String>,
    pub ticker: Option<String>,
    pub currency: Option<String>,
    /// Segment the product is currently listed on (`BmeMain` or `BmeGrowth`).
    pub segment: MarketId,
    pub sector: Option<String>,
    pub subsector: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub shares: Option<u64>,
    pub last_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub listing_date: Option<NaiveDate>,
    pub market_listing_date: Option<NaiveDate>,
    /// Raw suspension cell: empty, the sentinel flag, or a date.
    pub suspended: Option<String>,
    /// Yearly summary table (continuous market only; observed years only).
    pub yearly_summary: Vec<BmeYearlyRow>,
    /// Typed corporate-event rows (continuous market only).
    pub corporate_events: Vec<BmeCorporateEvent>,
    /// Free-text regulatory documents (Growth segment only).
    pub documents: Vec<RegulatoryDocument>,
    pub prices: Vec<DailyPrice>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Trading-day count as reported by the source's own statistics page.
    pub total_market_days: Option<u32>,
    pub url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// One free-text market notice (Euronext).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub date: NaiveDate,
    pub title: String,
}

/// One entry of a product's chronological IPO/listing history (Euronext).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub date: NaiveDate,
    /// Raw market label as printed by the source.
    pub market_label: String,
    pub is_transfer: bool,
    /// Free-text transfer description ("A - B", "A to B", "from A to B").
    pub transfer_details: Option<String>,
}

/// Raw details from the Euronext REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuronextProductDetails {
    pub name: String,
    pub isin: Option<String>,
    pub ticker: Option<String>,
    pub currency: Option<String>,
    /// Raw label of the current market segment.
    pub market_label: String,
    pub icb_supersector: Option<String>,
    pub icb_sector: Option<String>,
    pub icb_subsector: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub shares: Option<u64>,
    pub last_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub listing_date: Option<NaiveDate>,
    pub notices: Vec<Notice>,
    /// Chronological, oldest first.
    pub listing_entries: Vec<ListingEntry>,
    /// Daily prices; Euronext only emits rows for days the product traded.
    pub prices: Vec<DailyPrice>,
    pub related_instruments: Vec<String>,
    pub url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// A generically-typed disclosure document (Portfolio exchange).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDocument {
    pub date: NaiveDate,
    /// Enumerated subtype string as served by the API.
    pub subtype: String,
}

/// Raw details from the Portfolio micro exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProductDetails {
    pub name: String,
    pub isin: Option<String>,
    pub ticker: Option<String>,
    pub currency: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub shares: Option<u64>,
    pub last_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub listing_date: Option<NaiveDate>,
    /// Explicit halt flag; wins over `halted_until` when present.
    pub halted: Option<bool>,
    pub halted_until: Option<DateTime<Utc>>,
    pub documents: Vec<TypedDocument>,
    /// Daily prices including zero-turnover days.
    pub prices: Vec<DailyPrice>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub total_market_days: Option<u32>,
    pub url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Kinds of corporate-action records in the BME Growth market-wide snapshot.
///
/// Every kind maps 1:1 onto one unified action list, except `SpecialPayment`
/// which branches on its payment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrowthActionKind {
    Dividend,
    Split,
    ReverseSplit,
    CapitalIncrease,
    CapitalDecrease,
    Listing,
    Delisting,
    Takeover,
    Suspension,
    Resumption,
    MarketChange,
    NameChange,
    SpecialPayment,
}

/// One record of the BME Growth market-wide corporate-actions snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthActionRecord {
    pub company: String,
    pub date: NaiveDate,
    pub kind: GrowthActionKind,
    /// Present on `SpecialPayment` records ("En Acciones" = scrip payment).
    pub payment_class: Option<String>,
}

/// Market-wide corporate-actions snapshot for the BME Growth segment.
///
/// Loaded once per market from storage before per-company processing, then
/// filtered down to one company at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthActionsSnapshot {
    pub records: Vec<GrowthActionRecord>,
}

impl GrowthActionsSnapshot {
    /// Records belonging to one company (case-insensitive name match).
    pub fn for_company<'a>(&'a self, company: &str) -> Vec<&'a GrowthActionRecord> {
        let wanted = company.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| r.company.trim().to_lowercase() == wanted)
            .collect()
    }
}
