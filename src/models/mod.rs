mod market;
mod processed;
mod raw;

pub use market::{MarketFamily, MarketId};
pub use processed::{
    Liquidity, MarketBatchResult, MarketMigration, ProcessedProduct, ProductError,
    ProductMissingFields, ProductResult, UnifiedCorporateActions, YearlyMarketCap,
};
pub use raw::{
    BmeCorporateEvent, BmeEventKind, BmeProductDetails, BmeYearlyRow, DailyPrice,
    EuronextProductDetails, GrowthActionKind, GrowthActionRecord, GrowthActionsSnapshot,
    ListingEntry, Notice, PortfolioProductDetails, RawProductDetails, RegulatoryDocument,
    TypedDocument,
};
