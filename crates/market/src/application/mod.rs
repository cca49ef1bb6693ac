mod market;
mod service;

pub use market::{DistributionMarket, MarketSnapshot};
pub use service::MarketService;
