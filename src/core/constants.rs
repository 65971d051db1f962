// Liquidity pool bounds
pub const MIN_LIQUIDITY: f64 = 50_000.0;
pub const MAX_LIQUIDITY: f64 = 200_000.0;
pub const DEFAULT_LIQUIDITY: f64 = 100_000.0;

// Obstacle geometry
pub const GAP_MARGIN: f64 = 10.0; // inset keeping the gap off the play-area edges
pub const MIN_BAR_HEIGHT: f64 = 10.0;
pub const DEFAULT_PLAY_AREA_HEIGHT: f64 = 720.0;

// Tick timing
pub const DEFAULT_TICK_RATE_SECS: f64 = 0.5;

// Event feed
pub const MAX_FEED_LINES: usize = 100;

// High score file under ~/.hypers-drive/
pub const HIGH_SCORE_FILE: &str = "highscore.json";
