//! Per-tick market event sampling.

use crate::core::settings::{Settings, SettingsError};
use crate::utils::math::{gcd_all, random_index};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the market does on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A trade lands: a new obstacle pair is placed.
    AddTrade,
    /// Liquidity flows in: gaps widen.
    AddLiquidity,
    /// Liquidity flows out: gaps narrow.
    RemoveLiquidity,
}

impl MarketEvent {
    pub const ALL: [MarketEvent; 3] = [
        MarketEvent::AddTrade,
        MarketEvent::AddLiquidity,
        MarketEvent::RemoveLiquidity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AddTrade => "ADD_TRADE",
            Self::AddLiquidity => "ADD_LIQUIDITY",
            Self::RemoveLiquidity => "REMOVE_LIQUIDITY",
        }
    }
}

/// Weighted categorical sampler over [`MarketEvent`], gated by an overall
/// per-tick event chance.
///
/// Weights are reduced by their gcd and stored as cumulative upper bounds;
/// a draw picks a uniform slot in `[0, total)` and binary-searches for the
/// owning event.
#[derive(Debug, Clone)]
pub struct EventGenerator {
    event_chance: f64,
    cumulative: [u64; 3],
}

impl EventGenerator {
    /// Build from `(trade, add liquidity, remove liquidity)` weights and an
    /// event chance percentage in `[0, 100]`.
    pub fn new(weights: [u32; 3], event_chance: f64) -> Result<Self, SettingsError> {
        let divisor = gcd_all(&weights);
        if divisor == 0 {
            return Err(SettingsError::AllEventWeightsZero);
        }
        if !(0.0..=100.0).contains(&event_chance) {
            return Err(SettingsError::InvalidEventChance(event_chance));
        }

        let mut cumulative = [0u64; 3];
        let mut running = 0u64;
        for (slot, weight) in cumulative.iter_mut().zip(weights) {
            running += u64::from(weight / divisor);
            *slot = running;
        }

        Ok(Self {
            event_chance,
            cumulative,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        Self::new(settings.event_weights(), settings.event_chance)
    }

    /// Number of slots in the reduced table (sum of weights / gcd).
    pub fn total_weight(&self) -> u64 {
        self.cumulative[2]
    }

    /// Reduced weight for one event kind.
    pub fn weight_of(&self, event: MarketEvent) -> u64 {
        let idx = event as usize;
        let lower = if idx == 0 { 0 } else { self.cumulative[idx - 1] };
        self.cumulative[idx] - lower
    }

    /// Roll for this tick's event. `None` means a quiet tick.
    pub fn generate_event<R: Rng>(&self, rng: &mut R) -> Option<MarketEvent> {
        let roll: f64 = rng.gen();
        if roll >= self.event_chance / 100.0 {
            return None;
        }
        let slot = random_index(rng, self.total_weight());
        // First cumulative bound strictly above the slot; zero-weight kinds
        // share their predecessor's bound and are skipped.
        let idx = self.cumulative.partition_point(|&bound| bound <= slot);
        MarketEvent::ALL.get(idx).copied()
    }
}
