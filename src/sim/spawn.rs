//! Item spawning
//!
//! One item per spawn-timer fire, dropped in just above the visible area at
//! a uniformly random x. All randomness comes from a seeded PCG stream so a
//! session replays identically for the same seed and inputs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{FallingItem, Field, GameEvent, GameState, ItemKind};
use crate::consts::{BOMB_GLYPH, FRUIT_GLYPHS};

/// Creates falling items on behalf of the spawn timer
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    rng: Pcg32,
    bomb_chance: f64,
}

impl SpawnScheduler {
    pub fn new(seed: u64, bomb_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            bomb_chance: bomb_chance.clamp(0.0, 1.0),
        }
    }

    /// Roll a new item with the given ID
    pub fn roll_item(&mut self, id: u64, field: &Field) -> FallingItem {
        let max_x = field.max_item_x();
        let x = if max_x > 0.0 {
            self.rng.random_range(0.0..max_x)
        } else {
            0.0
        };

        let (kind, glyph) = if self.rng.random_bool(self.bomb_chance) {
            (ItemKind::Bomb, BOMB_GLYPH)
        } else {
            let glyph = FRUIT_GLYPHS[self.rng.random_range(0..FRUIT_GLYPHS.len())];
            (ItemKind::Fruit, glyph)
        };

        FallingItem {
            id,
            pos: Vec2::new(x, -field.item_height),
            kind,
            glyph,
        }
    }

    /// Append one new item to the tail of `state.items`.
    ///
    /// Returns `None` once the game is over.
    pub fn spawn(&mut self, state: &mut GameState, field: &Field) -> Option<GameEvent> {
        if state.is_over() {
            return None;
        }

        let id = state.next_entity_id();
        let item = self.roll_item(id, field);
        let kind = item.kind;
        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, item.pos.x);
        state.items.push(item);

        Some(GameEvent::Spawned { id, kind })
    }
}
