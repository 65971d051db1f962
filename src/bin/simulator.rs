//! Hypers Drive Headless Market Simulator
//!
//! Runs the session tick loop without a host engine, collecting obstacle and
//! liquidity metrics for tuning. Uses the same `Session::tick()` the game
//! calls. The simulated player clears every obstacle it is given.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --ticks N            Ticks to simulate (default: 600)
//!   --seed N             RNG seed (default: 42)
//!   --runs N             Number of runs with incrementing seeds (default: 1)
//!   --difficulty NAME    Novice | Apprentice | Journeyman | Master
//!   --settings FILE      JSON settings file (overrides --difficulty)
//!   --verbose            Per-tick event logging
//!   --quiet              Only final summary line
//!   --save-high-score    Record the best run in ~/.hypers-drive/

use chrono::Utc;
use hypers_drive::utils::build_info::version_banner;
use hypers_drive::{
    Difficulty, HighScore, HighScoreStore, Session, Settings, TickEvent, TickResult,
    TradeDirection,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    ticks: u64,
    seed: u64,
    runs: u32,
    difficulty: Difficulty,
    settings_path: Option<PathBuf>,
    verbose: bool,
    quiet: bool,
    save_high_score: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            seed: 42,
            runs: 1,
            difficulty: Difficulty::Novice,
            settings_path: None,
            verbose: false,
            quiet: false,
            save_high_score: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                config.ticks = arg_value(&args, i, "--ticks");
            }
            "--seed" => {
                i += 1;
                config.seed = arg_value(&args, i, "--seed");
            }
            "--runs" => {
                i += 1;
                config.runs = arg_value(&args, i, "--runs");
            }
            "--difficulty" => {
                i += 1;
                let name = args.get(i).map(String::as_str).unwrap_or_default();
                config.difficulty = Difficulty::parse(name).unwrap_or_else(|| {
                    eprintln!("Unknown difficulty: {name}");
                    process::exit(1);
                });
            }
            "--settings" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config.settings_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--settings requires a file path");
                        process::exit(1);
                    }
                }
            }
            "--verbose" => config.verbose = true,
            "--quiet" => config.quiet = true,
            "--save-high-score" => config.save_high_score = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn arg_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(value) => value,
        None => {
            eprintln!("{flag} requires a number");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Hypers Drive Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --ticks N            Ticks to simulate (default: 600)\n\
         \x20 --seed N             RNG seed (default: 42)\n\
         \x20 --runs N             Number of runs with incrementing seeds (default: 1)\n\
         \x20 --difficulty NAME    Novice | Apprentice | Journeyman | Master\n\
         \x20 --settings FILE      JSON settings file (overrides --difficulty)\n\
         \x20 --verbose            Per-tick event logging\n\
         \x20 --quiet              Only final summary line\n\
         \x20 --save-high-score    Record the best run in ~/.hypers-drive/\n\
         \x20 --help, -h           Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct SimStats {
    total_ticks: u64,
    quiet_ticks: u64,
    longs: u64,
    shorts: u64,
    liquidity_adds: u64,
    liquidity_removes: u64,
    narrowest_gap: Option<f64>,
    widest_gap: Option<f64>,
    largest_jump: f64,
    min_liquidity_seen: Option<f64>,
    max_liquidity_seen: Option<f64>,
    final_liquidity: f64,
    final_volume: f64,
    final_score: u64,
    top_speed: f64,
}

impl SimStats {
    fn process_tick(&mut self, result: &TickResult, previous_center: f64) {
        self.total_ticks = result.tick;
        match &result.event {
            None => self.quiet_ticks += 1,
            Some(TickEvent::Trade {
                direction,
                geometry,
                ..
            }) => {
                match direction {
                    TradeDirection::Long => self.longs += 1,
                    TradeDirection::Short => self.shorts += 1,
                }
                let width = geometry.gap_width;
                self.narrowest_gap = Some(self.narrowest_gap.map_or(width, |w| w.min(width)));
                self.widest_gap = Some(self.widest_gap.map_or(width, |w| w.max(width)));
                self.largest_jump = self
                    .largest_jump
                    .max((geometry.gap_center_y - previous_center).abs());
            }
            Some(TickEvent::LiquidityAdded { liquidity, .. }) => {
                self.liquidity_adds += 1;
                self.track_liquidity(*liquidity);
            }
            Some(TickEvent::LiquidityRemoved { liquidity, .. }) => {
                self.liquidity_removes += 1;
                self.track_liquidity(*liquidity);
            }
        }
    }

    fn track_liquidity(&mut self, liquidity: f64) {
        self.min_liquidity_seen = Some(
            self.min_liquidity_seen
                .map_or(liquidity, |l| l.min(liquidity)),
        );
        self.max_liquidity_seen = Some(
            self.max_liquidity_seen
                .map_or(liquidity, |l| l.max(liquidity)),
        );
    }

    fn finalize(&mut self, session: &Session) {
        let ledger = session.ledger();
        self.final_liquidity = ledger.liquidity();
        self.final_volume = ledger.total_volume();
        self.final_score = ledger.score();
        self.top_speed = ledger.top_speed();
    }
}

// ── Core Simulation Loop ─────────────────────────────────────────────

fn run_simulation(config: &SimConfig, settings: &Settings, seed: u64) -> (SimStats, Session) {
    let mut session = match Session::new(settings.clone()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid settings: {e}");
            process::exit(1);
        }
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut stats = SimStats::default();

    for _ in 0..config.ticks {
        let previous_center = session.gap_center_y();
        let result = session.tick(&mut rng);

        if let Some(TickEvent::Trade { .. }) = result.event {
            session.pass_obstacle();
        }
        if config.verbose {
            if let Some(event) = &result.event {
                println!(
                    "[tick {:>5}] {:<22} speed={:.2} gap_y={:.1}",
                    result.tick,
                    event.message(),
                    result.speed,
                    session.gap_center_y()
                );
            }
        }
        stats.process_tick(&result, previous_center);
    }

    stats.finalize(&session);
    (stats, session)
}

fn load_settings(config: &SimConfig) -> Settings {
    match &config.settings_path {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load {}: {e}", path.display());
            process::exit(1);
        }),
        None => Settings::for_difficulty(config.difficulty),
    }
}

fn print_summary(stats: &SimStats, session: &Session, seed: u64) {
    println!("=== Simulation Summary (seed={seed}) ===");
    println!(
        "Ticks: {} ({} quiet)  Trades: {} long / {} short  Liquidity events: +{} / -{}",
        stats.total_ticks,
        stats.quiet_ticks,
        stats.longs,
        stats.shorts,
        stats.liquidity_adds,
        stats.liquidity_removes,
    );
    if let (Some(narrow), Some(wide)) = (stats.narrowest_gap, stats.widest_gap) {
        println!(
            "Gap width: {narrow:.1}..{wide:.1}  Largest centre jump: {:.1}",
            stats.largest_jump
        );
    }
    if let (Some(low), Some(high)) = (stats.min_liquidity_seen, stats.max_liquidity_seen) {
        println!("Liquidity range seen: {low:.0}..{high:.0}");
    }
    println!("--- Final Stats ---");
    for line in session.stats() {
        println!("  {line}");
    }
    let recent: Vec<&str> = session.feed().lines().collect();
    if !recent.is_empty() {
        println!("--- Recent Events ---");
        for line in recent {
            println!("  {line}");
        }
    }
}

fn main() {
    let config = parse_args();
    let settings = load_settings(&config);

    if !config.quiet {
        eprintln!(
            "{}: {} ticks x {} run(s), seed={}, difficulty={}",
            version_banner(),
            config.ticks,
            config.runs,
            config.seed,
            if config.settings_path.is_some() {
                "custom"
            } else {
                config.difficulty.name()
            },
        );
    }

    let mut best: Option<HighScore> = None;

    for run in 0..config.runs {
        let seed = config.seed + run as u64;
        let (stats, session) = run_simulation(&config, &settings, seed);

        if config.quiet {
            println!(
                "seed={} score={} volume={:.0} liquidity={:.0} top_speed={:.2}",
                seed, stats.final_score, stats.final_volume, stats.final_liquidity, stats.top_speed
            );
        } else if config.runs == 1 {
            print_summary(&stats, &session, seed);
        } else {
            println!(
                "  Run {}: score={} trades={} liquidity={:.0} top_speed={:.2}",
                run + 1,
                stats.final_score,
                stats.longs + stats.shorts,
                stats.final_liquidity,
                stats.top_speed,
            );
        }

        let candidate = HighScore::from_ledger(session.ledger(), Utc::now());
        if best.as_ref().map_or(true, |b| candidate.beats(b)) {
            best = Some(candidate);
        }
    }

    if config.save_high_score {
        if let Some(best) = best {
            let saved = HighScoreStore::new().and_then(|store| store.record_if_best(&best));
            match saved {
                Ok(true) => eprintln!("New high score: {}", best.score),
                Ok(false) => eprintln!("High score unchanged"),
                Err(e) => {
                    eprintln!("Failed to save high score: {e}");
                    process::exit(1);
                }
            }
        }
    }
}
