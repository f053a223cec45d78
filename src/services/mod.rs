pub mod corporate_actions;
pub mod liquidity;
pub mod market_cap;
pub mod market_stats;
pub mod migrations;
pub mod orchestrator;
pub mod processors;
pub mod sectors;
pub mod suspension;
pub mod validator;

pub use market_stats::MarketStatistics;
pub use orchestrator::{process_market, process_markets};
pub use processors::CorporateActionsStore;
pub use sectors::NormalizedSector;
pub use suspension::SuspensionState;
