//! Game configuration
//!
//! Every design value lives here so a session can be tuned (or shrunk for
//! tests) without touching simulation code. Missing JSON keys fall back to
//! the defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Field;

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// A size that must be positive was zero, negative, or not finite
    NonPositiveSize(&'static str),
    /// The basket or an item does not fit horizontally on the screen
    WiderThanScreen(&'static str),
    /// A timer period of zero would fire forever
    ZeroPeriod(&'static str),
    BombChanceOutOfRange(f64),
    NoLives,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::NonPositiveSize(what) => write!(f, "{what} must be positive"),
            ConfigIssue::WiderThanScreen(what) => write!(f, "{what} is wider than the screen"),
            ConfigIssue::ZeroPeriod(what) => write!(f, "{what} period must be non-zero"),
            ConfigIssue::BombChanceOutOfRange(p) => {
                write!(f, "bomb chance {p} is outside [0, 1]")
            }
            ConfigIssue::NoLives => write!(f, "initial lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigIssue {}

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Geometry ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub basket_width: f32,
    pub basket_height: f32,
    pub item_width: f32,
    pub item_height: f32,

    // === Rules ===
    /// Units an item falls per tick
    pub fall_step: f32,
    pub initial_lives: u8,
    /// Probability (0.0 - 1.0) that a spawned item is a bomb
    pub bomb_chance: f64,
    /// Basket pixels per unit of tilt
    pub tilt_sensitivity: f32,

    // === Timing ===
    pub tick_period_ms: u32,
    pub spawn_period_ms: u32,
    pub tilt_sample_period_ms: u32,

    /// RNG seed for spawn placement
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            item_width: ITEM_WIDTH,
            item_height: ITEM_HEIGHT,

            fall_step: FALL_STEP,
            initial_lives: INITIAL_LIVES,
            bomb_chance: BOMB_CHANCE,
            tilt_sensitivity: TILT_SENSITIVITY,

            tick_period_ms: TICK_PERIOD_MS,
            spawn_period_ms: SPAWN_PERIOD_MS,
            tilt_sample_period_ms: TILT_SAMPLE_PERIOD_MS,

            seed: 0x5EED_F00D,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document. Unknown keys are ignored, missing keys default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a config file, falling back to defaults on any
    /// problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}; using default config", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(issue) => {
                    log::warn!("Rejected config {}: {}; using defaults", path.display(), issue);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Malformed config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        let sizes = [
            ("screen width", self.screen_width),
            ("screen height", self.screen_height),
            ("basket width", self.basket_width),
            ("basket height", self.basket_height),
            ("item width", self.item_width),
            ("item height", self.item_height),
            ("fall step", self.fall_step),
        ];
        for (what, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigIssue::NonPositiveSize(what));
            }
        }

        if self.basket_width > self.screen_width {
            return Err(ConfigIssue::WiderThanScreen("basket"));
        }
        if self.item_width > self.screen_width {
            return Err(ConfigIssue::WiderThanScreen("item"));
        }

        let periods = [
            ("tick", self.tick_period_ms),
            ("spawn", self.spawn_period_ms),
            ("tilt sample", self.tilt_sample_period_ms),
        ];
        for (what, period) in periods {
            if period == 0 {
                return Err(ConfigIssue::ZeroPeriod(what));
            }
        }

        if !(0.0..=1.0).contains(&self.bomb_chance) {
            return Err(ConfigIssue::BombChanceOutOfRange(self.bomb_chance));
        }
        if self.initial_lives == 0 {
            return Err(ConfigIssue::NoLives);
        }

        Ok(())
    }

    /// Screen and sprite geometry, fixed for the lifetime of a session
    pub fn field(&self) -> Field {
        Field {
            width: self.screen_width,
            height: self.screen_height,
            basket_width: self.basket_width,
            basket_height: self.basket_height,
            item_width: self.item_width,
            item_height: self.item_height,
        }
    }
}
