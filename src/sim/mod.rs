//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, fell_off_screen, item_hits_basket};
pub use session::{GameSession, Task, Timer};
pub use spawn::SpawnScheduler;
pub use state::{Basket, FallingItem, Field, GameEvent, GamePhase, GameState, ItemKind};
pub use tick::tick;
