//! Fixed timestep simulation tick
//!
//! Core game loop: every tick each item falls one step and is then tested
//! against the basket in the same pass. Items never interact with each
//! other, so the order they are processed in does not change the outcome.

use super::collision::{fell_off_screen, item_hits_basket};
use super::state::{Basket, FallingItem, Field, GameEvent, GamePhase, GameState, ItemKind};

/// Advance the game state by one tick.
///
/// Returns the events produced, in item order, with `GameOver` last. A tick
/// on a finished game is a no-op.
pub fn tick(state: &mut GameState, basket: &Basket, field: &Field, fall_step: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    let items = std::mem::take(&mut state.items);
    let mut kept: Vec<FallingItem> = Vec::with_capacity(items.len());

    for mut item in items {
        item.pos.y += fall_step;

        if item_hits_basket(&item, basket, field) {
            match item.kind {
                ItemKind::Fruit => state.score += 1,
                ItemKind::Bomb => state.lives = state.lives.saturating_sub(1),
            }
            log::debug!(
                "Caught {:?} #{} (score {}, lives {})",
                item.kind,
                item.id,
                state.score,
                state.lives
            );
            events.push(GameEvent::Caught {
                id: item.id,
                kind: item.kind,
            });
        } else if fell_off_screen(&item, field) {
            events.push(GameEvent::Missed {
                id: item.id,
                kind: item.kind,
            });
        } else {
            kept.push(item);
        }
    }

    state.items = kept;

    // Decided after every catch in this tick has resolved, so a fruit caught
    // alongside the final bomb still counts toward the final score.
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over at tick {} with score {}", state.time_ticks, state.score);
        events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }

    events
}
