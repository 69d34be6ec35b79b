//! Fruit Catcher entry point
//!
//! Headless demo: the autopilot plays one game at a fixed frame rate and the
//! result is printed. Pass a JSON config path as the first argument to tune
//! the game.

use std::cell::Cell;
use std::rc::Rc;

use fruit_catcher::sim::{GameEvent, GamePhase, GameSession, ItemKind};
use fruit_catcher::{AutopilotSource, GameConfig};

/// Host frame length (~60 FPS)
const FRAME_MS: u32 = 16;
/// Stop the demo after ten minutes of game time
const MAX_GAME_MS: u64 = 10 * 60 * 1000;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Fruit Catcher (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };

    let final_score = Rc::new(Cell::new(None));
    let sink = final_score.clone();
    let mut session = match GameSession::try_new(config, AutopilotSource::default()) {
        Ok(session) => session.with_game_over(move |score| sink.set(Some(score))),
        Err(issue) => {
            log::error!("Unplayable config: {}", issue);
            std::process::exit(2);
        }
    };

    let (mut fruit_missed, mut bombs_dodged) = (0u32, 0u32);
    while session.phase() == GamePhase::Playing && session.now_ms() < MAX_GAME_MS {
        session.advance(FRAME_MS);
        for event in session.drain_events() {
            match event {
                GameEvent::Missed { kind: ItemKind::Fruit, .. } => fruit_missed += 1,
                GameEvent::Missed { kind: ItemKind::Bomb, .. } => bombs_dodged += 1,
                GameEvent::GameOver { final_score } => {
                    log::info!("Game over event, final score {}", final_score)
                }
                _ => {}
            }
        }
    }

    let seconds = session.now_ms() as f64 / 1000.0;
    match final_score.get() {
        Some(score) => println!("Game over after {seconds:.1}s. Final score: {score}"),
        None => println!(
            "Time's up after {seconds:.1}s. Score: {}, lives left: {}",
            session.score(),
            session.lives()
        ),
    }
    println!("Fruit missed: {fruit_missed}, bombs dodged: {bombs_dodged}");
}
