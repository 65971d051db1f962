//! Game tuning shared by the market simulation and the host engine.
//!
//! A single flat value passed into each component at session start. Physics
//! fields (`gravity`, `jump_force`, `falling_velocity`) are only carried
//! through for the host; the simulation core never reads them.

use super::constants::{
    DEFAULT_PLAY_AREA_HEIGHT, DEFAULT_TICK_RATE_SECS, GAP_MARGIN, MAX_FEED_LINES, MIN_BAR_HEIGHT,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Generate `ALL`, `from_index()`, `name()` and `parse()` for a
/// four-variant difficulty enum (Novice / Apprentice / Journeyman / Master).
macro_rules! difficulty_enum_impl {
    ($name:ident) => {
        impl $name {
            pub const ALL: [$name; 4] = [
                $name::Novice,
                $name::Apprentice,
                $name::Journeyman,
                $name::Master,
            ];

            pub fn from_index(index: usize) -> Self {
                Self::ALL.get(index).copied().unwrap_or($name::Novice)
            }

            pub fn name(&self) -> &'static str {
                match self {
                    Self::Novice => "Novice",
                    Self::Apprentice => "Apprentice",
                    Self::Journeyman => "Journeyman",
                    Self::Master => "Master",
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|d| d.name().eq_ignore_ascii_case(value))
            }
        }
    };
}

/// Difficulty presets for [`Settings::for_difficulty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(Difficulty);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Downward pull on the player.
    pub gravity: f64,
    /// Upward impulse per jump.
    pub jump_force: f64,
    /// Terminal falling velocity.
    pub falling_velocity: f64,
    /// Base horizontal scroll speed of obstacles.
    pub speed: f64,
    /// Extra scroll speed reached once traded volume hits the liquidity cap.
    pub speed_ramp: f64,
    /// Narrowest gap, used at minimum liquidity.
    pub min_gap: f64,
    /// Widest gap, used at maximum liquidity.
    pub max_gap: f64,
    /// Max distance a gap centre may move from the previous one while the
    /// cooldown is active.
    pub deviation: f64,
    /// Quiet ticks after which the deviation cap is lifted for one trade.
    pub deviation_cooldown: u32,
    /// Seconds between ticks.
    pub tick_rate_secs: f64,
    /// Percent chance of any event on a tick.
    pub event_chance: f64,
    pub add_trade_chance: u32,
    pub add_liquidity_chance: u32,
    pub remove_liquidity_chance: u32,
    pub play_area_height: f64,
    pub min_bar_height: f64,
    /// Largest single liquidity add/remove.
    pub max_liquidity_event: f64,
    /// Lines kept in the event feed.
    pub feed_max: usize,
    /// Ticks before a feed line expires.
    pub feed_ttl_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: 1600.0,
            jump_force: 600.0,
            falling_velocity: 800.0,
            speed: 4.0,
            speed_ramp: 4.0,
            min_gap: 150.0,
            max_gap: 400.0,
            deviation: 80.0,
            deviation_cooldown: 5,
            tick_rate_secs: DEFAULT_TICK_RATE_SECS,
            event_chance: 60.0,
            add_trade_chance: 50,
            add_liquidity_chance: 25,
            remove_liquidity_chance: 25,
            play_area_height: DEFAULT_PLAY_AREA_HEIGHT,
            min_bar_height: MIN_BAR_HEIGHT,
            max_liquidity_event: 25_000.0,
            feed_max: 5,
            feed_ttl_ticks: 10,
        }
    }
}

impl Settings {
    /// Preset tuning for a difficulty. `Novice` is the default tuning.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let base = Self::default();
        match difficulty {
            Difficulty::Novice => base,
            Difficulty::Apprentice => Self {
                speed: 5.0,
                min_gap: 140.0,
                max_gap: 360.0,
                deviation: 100.0,
                event_chance: 70.0,
                ..base
            },
            Difficulty::Journeyman => Self {
                speed: 6.0,
                min_gap: 130.0,
                max_gap: 320.0,
                deviation: 120.0,
                deviation_cooldown: 4,
                event_chance: 80.0,
                add_trade_chance: 60,
                add_liquidity_chance: 15,
                remove_liquidity_chance: 25,
                ..base
            },
            Difficulty::Master => Self {
                speed: 7.0,
                speed_ramp: 6.0,
                min_gap: 120.0,
                max_gap: 280.0,
                deviation: 150.0,
                deviation_cooldown: 3,
                event_chance: 90.0,
                add_trade_chance: 70,
                add_liquidity_chance: 10,
                remove_liquidity_chance: 20,
                ..base
            },
        }
    }

    /// Event weights in `(trade, add liquidity, remove liquidity)` order.
    pub fn event_weights(&self) -> [u32; 3] {
        [
            self.add_trade_chance,
            self.add_liquidity_chance,
            self.remove_liquidity_chance,
        ]
    }

    /// Reject tunings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.event_weights().iter().all(|&w| w == 0) {
            return Err(SettingsError::AllEventWeightsZero);
        }
        if !(0.0..=100.0).contains(&self.event_chance) {
            return Err(SettingsError::InvalidEventChance(self.event_chance));
        }
        if !self.play_area_height.is_finite() || self.play_area_height <= 0.0 {
            return Err(SettingsError::InvalidPlayArea(self.play_area_height));
        }
        if !self.min_gap.is_finite()
            || !self.max_gap.is_finite()
            || self.min_gap <= 0.0
            || self.min_gap > self.max_gap
        {
            return Err(SettingsError::InvalidGapRange {
                min_gap: self.min_gap,
                max_gap: self.max_gap,
            });
        }
        if self.max_gap + 2.0 * GAP_MARGIN > self.play_area_height {
            return Err(SettingsError::GapExceedsPlayArea {
                max_gap: self.max_gap,
                play_area_height: self.play_area_height,
            });
        }
        for (field, value) in [
            ("speed", self.speed),
            ("speed_ramp", self.speed_ramp),
            ("deviation", self.deviation),
            ("min_bar_height", self.min_bar_height),
            ("max_liquidity_event", self.max_liquidity_event),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::NegativeValue { field, value });
            }
        }
        if 2.0 * self.min_bar_height + self.max_gap > self.play_area_height {
            return Err(SettingsError::BarsExceedPlayArea {
                min_bar_height: self.min_bar_height,
                max_gap: self.max_gap,
                play_area_height: self.play_area_height,
            });
        }
        if self.feed_max > MAX_FEED_LINES {
            return Err(SettingsError::FeedTooLarge(self.feed_max));
        }
        if !self.tick_rate_secs.is_finite() || self.tick_rate_secs <= 0.0 {
            return Err(SettingsError::NegativeValue {
                field: "tick_rate_secs",
                value: self.tick_rate_secs,
            });
        }
        Ok(())
    }

    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(SettingsError::Io)?;
        Self::from_json(&json)
    }
}

#[derive(Debug)]
pub enum SettingsError {
    AllEventWeightsZero,
    InvalidEventChance(f64),
    InvalidPlayArea(f64),
    InvalidGapRange { min_gap: f64, max_gap: f64 },
    GapExceedsPlayArea { max_gap: f64, play_area_height: f64 },
    BarsExceedPlayArea {
        min_bar_height: f64,
        max_gap: f64,
        play_area_height: f64,
    },
    NegativeValue { field: &'static str, value: f64 },
    FeedTooLarge(usize),
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllEventWeightsZero => {
                write!(f, "at least one event chance weight must be non-zero")
            }
            Self::InvalidEventChance(value) => {
                write!(f, "event_chance must be a percentage between 0 and 100, got {value}")
            }
            Self::InvalidPlayArea(value) => {
                write!(f, "play_area_height must be positive, got {value}")
            }
            Self::InvalidGapRange { min_gap, max_gap } => {
                write!(
                    f,
                    "gap range must satisfy 0 < min_gap <= max_gap, got {min_gap}..{max_gap}"
                )
            }
            Self::GapExceedsPlayArea {
                max_gap,
                play_area_height,
            } => {
                write!(
                    f,
                    "max_gap {max_gap} plus margins does not fit a play area of {play_area_height}"
                )
            }
            Self::BarsExceedPlayArea {
                min_bar_height,
                max_gap,
                play_area_height,
            } => {
                write!(
                    f,
                    "two bars of min_bar_height {min_bar_height} around a max_gap of {max_gap} \
                     do not fit a play area of {play_area_height}"
                )
            }
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must be a finite non-negative number, got {value}")
            }
            Self::FeedTooLarge(value) => {
                write!(f, "feed_max must be at most {MAX_FEED_LINES}, got {value}")
            }
            Self::Io(err) => write!(f, "could not read settings: {err}"),
            Self::Parse(err) => write!(f, "could not parse settings: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_all_presets_are_valid() {
        for d in Difficulty::ALL {
            assert!(Settings::for_difficulty(d).validate().is_ok(), "{}", d.name());
        }
    }

    #[test]
    fn test_presets_get_harder() {
        let novice = Settings::for_difficulty(Difficulty::Novice);
        let master = Settings::for_difficulty(Difficulty::Master);
        assert!(master.max_gap < novice.max_gap);
        assert!(master.speed > novice.speed);
        assert!(master.event_chance > novice.event_chance);
    }

    #[test]
    fn test_difficulty_from_index_and_parse() {
        assert_eq!(Difficulty::from_index(3), Difficulty::Master);
        assert_eq!(Difficulty::from_index(99), Difficulty::Novice);
        assert_eq!(Difficulty::parse("journeyman"), Some(Difficulty::Journeyman));
        assert_eq!(Difficulty::parse("legend"), None);
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let settings = Settings {
            add_trade_chance: 0,
            add_liquidity_chance: 0,
            remove_liquidity_chance: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::AllEventWeightsZero)
        ));
    }

    #[test]
    fn test_rejects_event_chance_out_of_range() {
        let settings = Settings {
            event_chance: 101.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidEventChance(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_gap_range() {
        let settings = Settings {
            min_gap: 300.0,
            max_gap: 200.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidGapRange { .. })
        ));
    }

    #[test]
    fn test_rejects_gap_larger_than_play_area() {
        let settings = Settings {
            play_area_height: 300.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::GapExceedsPlayArea { .. })
        ));
    }

    #[test]
    fn test_rejects_bars_taller_than_play_area_allows() {
        let settings = Settings {
            min_bar_height: 200.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BarsExceedPlayArea { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_feed() {
        let result = Settings::from_json(r#"{ "feed_max": 1000000000000 }"#);
        assert!(matches!(result, Err(SettingsError::FeedTooLarge(_))));
        let at_limit = Settings {
            feed_max: MAX_FEED_LINES,
            ..Settings::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_deviation() {
        let settings = Settings {
            deviation: -1.0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("deviation"));
    }

    #[test]
    fn test_from_json_partial_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "min_gap": 120.0, "event_chance": 100.0 }"#)
            .expect("partial settings should parse");
        assert_eq!(settings.min_gap, 120.0);
        assert_eq!(settings.event_chance, 100.0);
        assert_eq!(settings.max_gap, Settings::default().max_gap);
    }

    #[test]
    fn test_from_json_validates() {
        let result = Settings::from_json(
            r#"{ "add_trade_chance": 0, "add_liquidity_chance": 0, "remove_liquidity_chance": 0 }"#,
        );
        assert!(matches!(result, Err(SettingsError::AllEventWeightsZero)));
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("hypers_drive_missing_settings_98765.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
