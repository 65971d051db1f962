//! Hypers Drive - market-driven obstacle generation.
//!
//! The engine-agnostic core of the Hypers Drive arcade game: a simulated
//! liquidity pool, a weighted market event sampler and the trade-driven
//! obstacle placement that turns market activity into gaps the player has
//! to fly through. Rendering, physics and audio belong to the host engine.

pub mod core;
pub mod highscore;
pub mod market;
pub mod session;
pub mod utils;

pub use crate::core::{Difficulty, Settings, SettingsError};
pub use highscore::{HighScore, HighScoreStore};
pub use market::{
    DeviationCooldown, EventGenerator, LiquidityLedger, MarketEvent, ObstacleGeometry,
    TradeDirection, TradeEngine,
};
pub use session::{EventFeed, Session, StatLine, TickEvent, TickResult};
