//! Trade-driven obstacle placement.
//!
//! Each trade becomes a pair of bars (top and bottom) with a gap between
//! them. Gap width follows pool liquidity; the gap centre moves by an amount
//! proportional to the trade size, so consecutive obstacles trace a price
//! chart. Long trades push the centre toward the upper bound of its range,
//! short trades toward the lower bound.

use super::ledger::LiquidityLedger;
use crate::core::constants::{GAP_MARGIN, MAX_LIQUIDITY, MIN_LIQUIDITY};
use crate::core::settings::Settings;
use crate::utils::math::scale;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }

    /// RGB bar colour for the host renderer: red for longs, green for shorts.
    pub fn bar_color(&self) -> [u8; 3] {
        match self {
            Self::Long => [255, 0, 0],
            Self::Short => [0, 255, 0],
        }
    }
}

/// Geometry of one obstacle pair, ready for the host to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleGeometry {
    pub gap_width: f64,
    pub top_bar_height: f64,
    pub bottom_bar_height: f64,
    pub gap_center_y: f64,
}

/// Places obstacle gaps and remembers where the last one was.
#[derive(Debug, Clone)]
pub struct TradeEngine {
    play_area_height: f64,
    min_gap: f64,
    max_gap: f64,
    min_bar_height: f64,
    gap_center_y: f64,
}

impl TradeEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            play_area_height: settings.play_area_height,
            min_gap: settings.min_gap,
            max_gap: settings.max_gap,
            min_bar_height: settings.min_bar_height,
            gap_center_y: settings.play_area_height / 2.0,
        }
    }

    pub fn gap_center_y(&self) -> f64 {
        self.gap_center_y
    }

    pub fn play_area_height(&self) -> f64 {
        self.play_area_height
    }

    /// Gap width for the ledger's current liquidity. Thin pools make
    /// narrow gaps.
    pub fn gap_width(&self, ledger: &LiquidityLedger) -> f64 {
        scale(
            ledger.liquidity(),
            MIN_LIQUIDITY,
            MAX_LIQUIDITY,
            self.min_gap,
            self.max_gap,
        )
    }

    /// Place the obstacle pair for a trade and book its volume on the ledger.
    ///
    /// `max_deviation` caps how far the centre may move this time; `None`
    /// allows the full remaining travel range in one step.
    pub fn place_trade(
        &mut self,
        ledger: &mut LiquidityLedger,
        amount: f64,
        direction: TradeDirection,
        max_deviation: Option<f64>,
    ) -> ObstacleGeometry {
        let height = self.play_area_height;
        let gap_width = self.gap_width(ledger);
        let half_gap = gap_width / 2.0;

        let travel = max_deviation.unwrap_or((height - gap_width) / 2.0);
        let movement = scale(amount, 0.0, ledger.liquidity(), 0.0, travel);

        // Bars taller than the margin widen the inset so neither gets clamped.
        let inset = GAP_MARGIN.max(self.min_bar_height);
        let upper = height - inset - half_gap;
        let lower = half_gap + inset;
        let target = match direction {
            TradeDirection::Long => self.gap_center_y + movement,
            TradeDirection::Short => self.gap_center_y - movement,
        };
        // A liquidity change since the last trade can leave the old centre
        // outside the bounds of the new gap width, so clamp on both sides.
        let gap_center_y = target.min(upper).max(lower);

        let top_bar_height = self.min_bar_height.max(gap_center_y - half_gap);
        let bottom_bar_height = self
            .min_bar_height
            .max(height - top_bar_height - gap_width);

        self.gap_center_y = gap_center_y;
        match direction {
            TradeDirection::Long => ledger.add_long(amount),
            TradeDirection::Short => ledger.add_short(amount),
        }

        ObstacleGeometry {
            gap_width,
            top_bar_height,
            bottom_bar_height,
            gap_center_y,
        }
    }

    /// Re-centre the gap for a new round.
    pub fn reset(&mut self) {
        self.gap_center_y = self.play_area_height / 2.0;
    }
}

/// Tracks quiet ticks between trades and decides the deviation cap.
///
/// Right after a trade the cap is the fixed `deviation`. Once
/// `cooldown_ticks` ticks pass with no trade the cap is lifted, letting the
/// next trade jump anywhere; that trade re-tightens it.
#[derive(Debug, Clone)]
pub struct DeviationCooldown {
    deviation: f64,
    cooldown_ticks: u32,
    quiet_ticks: u32,
}

impl DeviationCooldown {
    pub fn new(deviation: f64, cooldown_ticks: u32) -> Self {
        Self {
            deviation,
            cooldown_ticks,
            quiet_ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.deviation, settings.deviation_cooldown)
    }

    /// Cap for the next trade, `None` when unconstrained.
    pub fn current_cap(&self) -> Option<f64> {
        if self.quiet_ticks >= self.cooldown_ticks {
            None
        } else {
            Some(self.deviation)
        }
    }

    pub fn quiet_ticks(&self) -> u32 {
        self.quiet_ticks
    }

    pub fn on_quiet_tick(&mut self) {
        self.quiet_ticks = self.quiet_ticks.saturating_add(1);
    }

    pub fn on_trade(&mut self) {
        self.quiet_ticks = 0;
    }
}
