//! The per-tick market loop.
//!
//! [`Session::tick`] rolls one market event, applies it to the ledger and
//! the obstacle engine, and returns a [`TickResult`] describing what
//! happened. The host engine spawns bars from the returned geometry and
//! renders the feed and stats; nothing here touches presentation types.

use super::feed::EventFeed;
use super::stats::{snapshot, StatLine};
use crate::core::constants::MAX_LIQUIDITY;
use crate::core::settings::{Settings, SettingsError};
use crate::market::{
    DeviationCooldown, EventGenerator, LiquidityLedger, MarketEvent, ObstacleGeometry,
    TradeDirection, TradeEngine,
};
use crate::utils::format::commify;
use crate::utils::math::{rand_num, scale};
use rand::Rng;

/// A single event produced by a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// A trade placed a new obstacle pair.
    Trade {
        direction: TradeDirection,
        amount: f64,
        geometry: ObstacleGeometry,
    },
    LiquidityAdded { amount: f64, liquidity: f64 },
    LiquidityRemoved { amount: f64, liquidity: f64 },
}

impl TickEvent {
    /// Feed line for this event, e.g. `LONG 12,345`.
    pub fn message(&self) -> String {
        match self {
            Self::Trade {
                direction, amount, ..
            } => format!("{} {}", direction.label(), commify(*amount)),
            Self::LiquidityAdded { amount, .. } => format!("+{} liquidity", commify(*amount)),
            Self::LiquidityRemoved { amount, .. } => format!("-{} liquidity", commify(*amount)),
        }
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number, starting at 1 for the first tick of a round.
    pub tick: u64,
    /// The market event, or `None` on a quiet tick.
    pub event: Option<TickEvent>,
    /// Obstacle scroll speed after this tick.
    pub speed: f64,
}

/// One round of play: ledger, event sampler, obstacle engine and feed.
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    ledger: LiquidityLedger,
    events: EventGenerator,
    trades: TradeEngine,
    cooldown: DeviationCooldown,
    feed: EventFeed,
    tick_count: u64,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let events = EventGenerator::from_settings(&settings)?;
        Ok(Self {
            ledger: LiquidityLedger::new(),
            events,
            trades: TradeEngine::new(&settings),
            cooldown: DeviationCooldown::from_settings(&settings),
            feed: EventFeed::new(settings.feed_max, settings.feed_ttl_ticks),
            tick_count: 0,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ledger(&self) -> &LiquidityLedger {
        &self.ledger
    }

    pub fn feed(&self) -> &EventFeed {
        &self.feed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn gap_center_y(&self) -> f64 {
        self.trades.gap_center_y()
    }

    /// Current gap width, for hosts that preview the next obstacle.
    pub fn gap_width(&self) -> f64 {
        self.trades.gap_width(&self.ledger)
    }

    /// Scroll speed: base speed plus a ramp that tops out once traded
    /// volume reaches the pool's maximum liquidity.
    pub fn current_speed(&self) -> f64 {
        let volume = self.ledger.total_volume().min(MAX_LIQUIDITY);
        self.settings.speed + scale(volume, 0.0, MAX_LIQUIDITY, 0.0, self.settings.speed_ramp)
    }

    pub fn stats(&self) -> Vec<StatLine> {
        snapshot(&self.ledger)
    }

    /// The player cleared an obstacle pair. Returns the new score.
    pub fn pass_obstacle(&mut self) -> u64 {
        self.ledger.add_score(1);
        self.ledger.score()
    }

    /// Advance one tick.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickResult {
        self.tick_count += 1;
        self.feed.advance();

        let event = match self.events.generate_event(rng) {
            Some(MarketEvent::AddTrade) => Some(self.apply_trade(rng)),
            Some(MarketEvent::AddLiquidity) => {
                let amount = self.liquidity_event_amount(rng);
                self.ledger.add_liquidity(amount);
                Some(TickEvent::LiquidityAdded {
                    amount,
                    liquidity: self.ledger.liquidity(),
                })
            }
            Some(MarketEvent::RemoveLiquidity) => {
                let amount = self.liquidity_event_amount(rng);
                self.ledger.remove_liquidity(amount);
                Some(TickEvent::LiquidityRemoved {
                    amount,
                    liquidity: self.ledger.liquidity(),
                })
            }
            None => None,
        };

        if !matches!(event, Some(TickEvent::Trade { .. })) {
            self.cooldown.on_quiet_tick();
        }
        if let Some(ref e) = event {
            self.feed.add(e.message());
        }

        let speed = self.current_speed();
        self.ledger.record_speed(speed);

        TickResult {
            tick: self.tick_count,
            event,
            speed,
        }
    }

    /// Start a new round with the same settings.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.trades.reset();
        self.cooldown.on_trade();
        self.feed.clear();
        self.tick_count = 0;
    }

    fn apply_trade<R: Rng>(&mut self, rng: &mut R) -> TickEvent {
        let amount = rand_num(rng, 0, self.ledger.liquidity() as u64) as f64;
        let direction = if rng.gen_bool(0.5) {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        };
        let cap = self.cooldown.current_cap();
        let geometry = self
            .trades
            .place_trade(&mut self.ledger, amount, direction, cap);
        self.cooldown.on_trade();
        TickEvent::Trade {
            direction,
            amount,
            geometry,
        }
    }

    fn liquidity_event_amount<R: Rng>(&self, rng: &mut R) -> f64 {
        rand_num(rng, 0, self.settings.max_liquidity_event as u64) as f64
    }
}
