//! Liquidity market simulation: the pool ledger, the event sampler and
//! trade-driven obstacle placement.

pub mod events;
pub mod ledger;
pub mod trades;

pub use events::{EventGenerator, MarketEvent};
pub use ledger::LiquidityLedger;
pub use trades::{DeviationCooldown, ObstacleGeometry, TradeDirection, TradeEngine};
