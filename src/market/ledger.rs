//! The simulated liquidity pool and per-session trade counters.

use crate::core::constants::{DEFAULT_LIQUIDITY, MAX_LIQUIDITY, MIN_LIQUIDITY};
use serde::{Deserialize, Serialize};

/// Pool liquidity plus running trade volumes for one game session.
///
/// Liquidity always stays within `[MIN_LIQUIDITY, MAX_LIQUIDITY]`; every
/// mutation saturates at the bounds instead of failing. Volumes only grow
/// until [`LiquidityLedger::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityLedger {
    liquidity: f64,
    shorts_volume: f64,
    longs_volume: f64,
    top_speed: f64,
    score: u64,
}

impl Default for LiquidityLedger {
    fn default() -> Self {
        Self {
            liquidity: DEFAULT_LIQUIDITY,
            shorts_volume: 0.0,
            longs_volume: 0.0,
            top_speed: 0.0,
            score: 0,
        }
    }
}

impl LiquidityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn liquidity(&self) -> f64 {
        self.liquidity
    }

    pub fn shorts_volume(&self) -> f64 {
        self.shorts_volume
    }

    pub fn longs_volume(&self) -> f64 {
        self.longs_volume
    }

    /// Derived from the two sides so it always equals their sum.
    pub fn total_volume(&self) -> f64 {
        self.longs_volume + self.shorts_volume
    }

    pub fn top_speed(&self) -> f64 {
        self.top_speed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn add_liquidity(&mut self, amount: f64) {
        self.liquidity = (self.liquidity + amount).min(MAX_LIQUIDITY);
    }

    pub fn remove_liquidity(&mut self, amount: f64) {
        self.liquidity = (self.liquidity - amount).max(MIN_LIQUIDITY);
    }

    pub fn add_long(&mut self, amount: f64) {
        self.longs_volume += amount;
    }

    pub fn add_short(&mut self, amount: f64) {
        self.shorts_volume += amount;
    }

    /// Raise the top-speed high-water mark if `speed` beats it.
    pub fn record_speed(&mut self, speed: f64) {
        if speed > self.top_speed {
            self.top_speed = speed;
        }
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Back to session-start defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
