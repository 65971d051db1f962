//! Property tests for the market core: ledger bounds, volume bookkeeping,
//! event distribution and obstacle geometry.
//!
//! Randomised inputs come from a seeded ChaCha8Rng so failures reproduce.

use hypers_drive::core::constants::{GAP_MARGIN, MAX_LIQUIDITY, MIN_LIQUIDITY};
use hypers_drive::{
    EventGenerator, LiquidityLedger, MarketEvent, Settings, TradeDirection, TradeEngine,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

#[test]
fn test_liquidity_never_leaves_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ledger = LiquidityLedger::new();
    for _ in 0..10_000 {
        let amount = rng.gen_range(0.0..500_000.0);
        if rng.gen_bool(0.5) {
            ledger.add_liquidity(amount);
        } else {
            ledger.remove_liquidity(amount);
        }
        assert!(ledger.liquidity() >= MIN_LIQUIDITY);
        assert!(ledger.liquidity() <= MAX_LIQUIDITY);
    }
}

#[test]
fn test_total_volume_is_sum_of_sides() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut ledger = LiquidityLedger::new();
    for _ in 0..5_000 {
        let amount = rng.gen_range(0.0..100_000.0);
        if rng.gen_bool(0.5) {
            ledger.add_long(amount);
        } else {
            ledger.add_short(amount);
        }
        assert_eq!(
            ledger.total_volume(),
            ledger.longs_volume() + ledger.shorts_volume()
        );
    }
}

#[test]
fn test_event_distribution_matches_weights() {
    let generator = EventGenerator::new([50, 25, 25], 100.0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let draws = 100_000;
    let mut counts: HashMap<MarketEvent, u32> = HashMap::new();
    for _ in 0..draws {
        let event = generator
            .generate_event(&mut rng)
            .expect("100% event chance always fires");
        *counts.entry(event).or_insert(0) += 1;
    }

    let share = |e: MarketEvent| counts.get(&e).copied().unwrap_or(0) as f64 / draws as f64;
    assert!((share(MarketEvent::AddTrade) - 0.50).abs() < 0.01);
    assert!((share(MarketEvent::AddLiquidity) - 0.25).abs() < 0.01);
    assert!((share(MarketEvent::RemoveLiquidity) - 0.25).abs() < 0.01);
}

#[test]
fn test_zero_event_chance_is_always_quiet() {
    let generator = EventGenerator::new([50, 25, 25], 0.0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert!((0..10_000).all(|_| generator.generate_event(&mut rng).is_none()));
}

#[test]
fn test_bar_heights_respect_minimum_and_fill_area() {
    let settings = Settings::default();
    let mut engine = TradeEngine::new(&settings);
    let mut ledger = LiquidityLedger::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..2_000 {
        if rng.gen_bool(0.3) {
            ledger.add_liquidity(rng.gen_range(0.0..60_000.0));
        } else if rng.gen_bool(0.3) {
            ledger.remove_liquidity(rng.gen_range(0.0..60_000.0));
        }
        let amount = rng.gen_range(0.0..=ledger.liquidity());
        let direction = if rng.gen_bool(0.5) {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        };
        let cap = if rng.gen_bool(0.5) {
            Some(settings.deviation)
        } else {
            None
        };
        let g = engine.place_trade(&mut ledger, amount, direction, cap);

        assert!(g.top_bar_height >= settings.min_bar_height);
        assert!(g.bottom_bar_height >= settings.min_bar_height);
        let total = g.top_bar_height + g.gap_width + g.bottom_bar_height;
        assert!(
            (total - settings.play_area_height).abs() < 1e-6,
            "bars and gap cover {total}"
        );
    }
}

#[test]
fn test_repeated_longs_climb_then_saturate() {
    let settings = Settings::default();
    let mut engine = TradeEngine::new(&settings);
    let mut ledger = LiquidityLedger::new();
    let gap = engine.gap_width(&ledger);
    let upper = settings.play_area_height - GAP_MARGIN - gap / 2.0;

    let mut previous = engine.gap_center_y();
    let mut reached_top = false;
    for _ in 0..50 {
        let g = engine.place_trade(&mut ledger, 10_000.0, TradeDirection::Long, None);
        assert!(g.gap_center_y >= previous);
        assert!(g.gap_center_y <= upper + 1e-9);
        if reached_top {
            assert_eq!(g.gap_center_y, previous);
        }
        reached_top |= (g.gap_center_y - upper).abs() < 1e-9;
        previous = g.gap_center_y;
    }
    assert!(reached_top);
}

#[test]
fn test_gap_width_scenario() {
    let settings = Settings {
        min_gap: 150.0,
        max_gap: 400.0,
        ..Settings::default()
    };
    let engine = TradeEngine::new(&settings);
    let ledger = LiquidityLedger::new();
    assert!((engine.gap_width(&ledger) - 233.33).abs() < 0.01);
}

#[test]
fn test_reset_restores_exact_defaults() {
    let mut ledger = LiquidityLedger::new();
    ledger.add_liquidity(45_000.0);
    ledger.add_long(3_000.0);
    ledger.add_short(7_000.0);
    ledger.record_speed(11.0);
    ledger.add_score(8);

    ledger.reset();
    assert_eq!(ledger.liquidity(), 100_000.0);
    assert_eq!(ledger.shorts_volume(), 0.0);
    assert_eq!(ledger.longs_volume(), 0.0);
    assert_eq!(ledger.total_volume(), 0.0);
    assert_eq!(ledger.top_speed(), 0.0);
    assert_eq!(ledger.score(), 0);
}
