//! Reconciliation Constants
//!
//! Fixed parameters shared by the normalization components: the yearly-history
//! horizon, suspension sentinels, and the expected raw price-history window of
//! each source market.
//!
//! Each source reports price history over a different absolute window. The
//! liquidity normalizer relies on these lengths when bias-correcting day
//! counts, so a silent upstream change to a window would corrupt ratios. The
//! expected lengths live here and are checked (with a logged warning, never an
//! error) against every processed record.

/// First calendar year covered by the yearly market-cap history.
///
/// Products listed earlier than this still start their history here; products
/// listed later start at their listing year.
pub const MARKET_CAP_HORIZON_YEAR: i32 = 2015;

/// Single-character flag the BME feed uses for "suspended, date unknown".
pub const BME_SUSPENSION_SENTINEL: &str = "S";

/// Payment-class literal that marks a scrip payment (free allocation of
/// shares) rather than a cash dividend, as emitted by both BME feeds.
pub const SCRIP_PAYMENT_CLASS: &str = "En Acciones";

/// Expected raw window lengths per source, in calendar days
pub mod expected_window {
    /// Euronext serves roughly two years of daily prices.
    pub const EURONEXT_DAYS: i64 = 730;

    /// The Portfolio exchange serves roughly one year of daily prices.
    pub const PORTFOLIO_DAYS: i64 = 365;

    /// BME serves daily prices from a fixed start date onward; the expected
    /// window is computed from this date, not a fixed length.
    pub const BME_START: (i32, u32, u32) = (2019, 1, 1);

    /// Tolerated deviation between a record's actual window span and the
    /// source's expected span before a warning is logged.
    pub const DRIFT_TOLERANCE_DAYS: i64 = 45;
}

/// Calendar days treated as "at most one year" when deciding whether a
/// source-reported trading-day count can be trusted without scaling.
pub const ONE_YEAR_MAX_DAYS: i64 = 366;
