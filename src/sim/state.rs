//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_basket_x;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Items falling, basket live
    Playing,
    /// Lives exhausted; terminal until restart
    GameOver,
}

/// What a falling item does when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// +1 score
    Fruit,
    /// -1 life
    Bomb,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u64, kind: ItemKind },
    Caught { id: u64, kind: ItemKind },
    /// Item fell past the bottom edge
    Missed { id: u64, kind: ItemKind },
    GameOver { final_score: u64 },
}

/// Screen and sprite geometry for one session (read-only once play starts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub basket_width: f32,
    pub basket_height: f32,
    pub item_width: f32,
    pub item_height: f32,
}

impl Field {
    /// Rightmost legal basket x
    #[inline]
    pub fn max_basket_x(&self) -> f32 {
        (self.width - self.basket_width).max(0.0)
    }

    /// Upper bound (exclusive) of spawn x positions
    #[inline]
    pub fn max_item_x(&self) -> f32 {
        (self.width - self.item_width).max(0.0)
    }

    /// Top of the band the basket occupies
    #[inline]
    pub fn basket_top(&self) -> f32 {
        self.height - self.basket_height
    }

    /// Basket x that centers it horizontally
    #[inline]
    pub fn centered_basket_x(&self) -> f32 {
        self.max_basket_x() / 2.0
    }

    #[inline]
    pub fn item_size(&self) -> Vec2 {
        Vec2::new(self.item_width, self.item_height)
    }
}

/// The player's basket. Only the horizontal offset moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Left edge, always within `[0, field.max_basket_x()]`
    x: f32,
}

impl Basket {
    /// Basket centered on the field
    pub fn centered(field: &Field) -> Self {
        Self {
            x: field.centered_basket_x(),
        }
    }

    /// Basket at `x`, clamped onto the field
    pub fn at(x: f32, field: &Field) -> Self {
        Self {
            x: clamp_basket_x(x, field.max_basket_x()),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Position after a tilt reading, without moving the basket
    pub fn tilted(&self, tilt: f32, sensitivity: f32, field: &Field) -> f32 {
        clamp_basket_x(self.x + tilt * sensitivity, field.max_basket_x())
    }

    /// Position that centers the basket under a pointer, without moving it
    pub fn under_pointer(pointer_x: f32, field: &Field) -> f32 {
        clamp_basket_x(pointer_x - field.basket_width / 2.0, field.max_basket_x())
    }

    /// Move to `x`, clamped onto the field
    pub fn move_to(&mut self, x: f32, field: &Field) {
        // NaN from a misbehaving sensor must not poison the position
        if x.is_nan() {
            return;
        }
        self.x = clamp_basket_x(x, field.max_basket_x());
    }

    pub fn recenter(&mut self, field: &Field) {
        self.x = field.centered_basket_x();
    }
}

/// A fruit or bomb on its way down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    /// Unique per session, assigned in spawn order
    pub id: u64,
    /// Top-left corner. x is fixed at spawn, y grows every tick.
    pub pos: Vec2,
    pub kind: ItemKind,
    /// Display glyph (no gameplay effect)
    pub glyph: char,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub lives: u8,
    /// Live items in spawn order
    pub items: Vec<FallingItem>,
    pub phase: GamePhase,
    /// Game loop ticks run since the last reset
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u64,
}

impl GameState {
    pub fn new(initial_lives: u8) -> Self {
        Self {
            score: 0,
            lives: initial_lives,
            items: Vec::new(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID. IDs are never reused within a session.
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = match self.next_id.checked_add(1) {
            Some(next) => next,
            None => {
                // Unreachable at any real spawn rate; pin rather than wrap
                log::error!("Entity ID space exhausted");
                u64::MAX
            }
        };
        id
    }

    /// Start a fresh game. IDs keep counting so a restarted game can never
    /// hand out an ID the presentation layer still has cached.
    pub fn reset(&mut self, initial_lives: u8) {
        self.score = 0;
        self.lives = initial_lives;
        self.items.clear();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
