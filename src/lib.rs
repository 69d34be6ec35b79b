//! Fruit Catcher - catch falling fruit, dodge the bombs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catching, game state)
//! - `input`: Basket position sources (tilt, pointer, autopilot)
//! - `settings`: Data-driven game configuration

pub mod input;
pub mod settings;
pub mod sim;

pub use input::{AutopilotSource, PointerSource, PositionSource, TiltSource};
pub use settings::{ConfigIssue, GameConfig};
pub use sim::{GameEvent, GamePhase, GameSession, GameState};

/// Game design constants
pub mod consts {
    /// Default play field (portrait phone, logical pixels)
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 844.0;

    /// Basket size
    pub const BASKET_WIDTH: f32 = 90.0;
    pub const BASKET_HEIGHT: f32 = 50.0;

    /// Falling item size (fruit and bombs share one box)
    pub const ITEM_WIDTH: f32 = 40.0;
    pub const ITEM_HEIGHT: f32 = 40.0;

    /// Vertical distance an item falls per tick
    pub const FALL_STEP: f32 = 5.0;

    pub const INITIAL_LIVES: u8 = 3;

    /// Basket pixels moved per unit of accelerometer tilt
    pub const TILT_SENSITIVITY: f32 = 80.0;

    /// Probability that a spawned item is a bomb
    pub const BOMB_CHANCE: f64 = 0.2;

    /// Game loop period (25 Hz)
    pub const TICK_PERIOD_MS: u32 = 40;
    /// Spawn period
    pub const SPAWN_PERIOD_MS: u32 = 1500;
    /// Accelerometer sampling period (10 Hz)
    pub const TILT_SAMPLE_PERIOD_MS: u32 = 100;

    /// Maximum wall time consumed by a single `advance` call, to prevent a
    /// spiral of death after the host stalls
    pub const MAX_FRAME_MS: u32 = 250;

    /// Glyphs a fruit may be drawn with. Purely cosmetic.
    pub const FRUIT_GLYPHS: [char; 6] = ['🍊', '🍓', '🍎', '🍇', '🍒', '🥭'];
    pub const BOMB_GLYPH: char = '💣';
}

/// Clamp a basket x coordinate to the playable range `[0, max_x]`.
///
/// A field narrower than the basket collapses the range to 0.
#[inline]
pub fn clamp_basket_x(x: f32, max_x: f32) -> f32 {
    x.clamp(0.0, max_x.max(0.0))
}
