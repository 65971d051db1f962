//! Shared constants and game configuration.

pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{Difficulty, Settings, SettingsError};
