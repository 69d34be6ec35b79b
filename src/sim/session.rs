//! Game session: owns the state and drives the three periodic tasks
//!
//! Input sampling, spawning and the game loop each run on their own timer.
//! All three share one logical thread: `advance` fires whichever timer is
//! due next, runs it to completion, then moves on. Nothing else mutates the
//! session in between, so a tick always sees one consistent basket position.

use super::spawn::SpawnScheduler;
use super::state::{Basket, FallingItem, Field, GameEvent, GamePhase, GameState};
use super::tick::tick;
use crate::consts::MAX_FRAME_MS;
use crate::input::{PositionSource, SourceView};
use crate::settings::{ConfigIssue, GameConfig};

/// One of the session's periodic jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SampleInput,
    Spawn,
    Tick,
}

impl Task {
    /// Tie-break order when several timers are due at the same instant
    const ALL: [Task; 3] = [Task::SampleInput, Task::Spawn, Task::Tick];

    fn slot(self) -> usize {
        match self {
            Task::SampleInput => 0,
            Task::Spawn => 1,
            Task::Tick => 2,
        }
    }
}

/// A repeating timer on the session clock
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    period_ms: u32,
    next_due_ms: u64,
    armed: bool,
}

impl Timer {
    fn new(period_ms: Option<u32>, now_ms: u64) -> Self {
        let period_ms = period_ms.unwrap_or(0);
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms as u64,
            armed: period_ms > 0,
        }
    }

    fn rearm(&mut self, now_ms: u64) {
        if self.period_ms > 0 {
            self.next_due_ms = now_ms + self.period_ms as u64;
            self.armed = true;
        }
    }

    fn due_by(&self, until_ms: u64) -> Option<u64> {
        (self.armed && self.next_due_ms <= until_ms).then_some(self.next_due_ms)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// A running game: state, basket, spawner, input, and the timers driving them
pub struct GameSession<S: PositionSource> {
    config: GameConfig,
    field: Field,
    basket: Basket,
    state: GameState,
    spawner: SpawnScheduler,
    source: S,
    timers: [Timer; 3],
    /// Session clock
    now_ms: u64,
    events: Vec<GameEvent>,
    on_game_over: Option<Box<dyn FnMut(u64)>>,
    game_over_reported: bool,
}

impl<S: PositionSource> GameSession<S> {
    /// Start a game. `config` is assumed valid; see [`GameSession::try_new`].
    pub fn new(config: GameConfig, source: S) -> Self {
        let field = config.field();
        let timers = [
            Timer::new(source.sample_period_ms(), 0),
            Timer::new(Some(config.spawn_period_ms), 0),
            Timer::new(Some(config.tick_period_ms), 0),
        ];

        log::info!(
            "Session started: field {}x{}, seed {}",
            field.width,
            field.height,
            config.seed
        );

        Self {
            field,
            basket: Basket::centered(&field),
            state: GameState::new(config.initial_lives),
            spawner: SpawnScheduler::new(config.seed, config.bomb_chance),
            source,
            timers,
            now_ms: 0,
            events: Vec::new(),
            on_game_over: None,
            game_over_reported: false,
            config,
        }
    }

    /// Validate `config`, then start a game
    pub fn try_new(config: GameConfig, source: S) -> Result<Self, ConfigIssue> {
        config.validate()?;
        Ok(Self::new(config, source))
    }

    /// Register the callback fired once per game with the final score
    pub fn with_game_over(mut self, callback: impl FnMut(u64) + 'static) -> Self {
        self.on_game_over = Some(Box::new(callback));
        self
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.state.items
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Milliseconds of game time elapsed since the session started
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Access to the input source so the host can feed it device readings
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn timer(&self, task: Task) -> &Timer {
        &self.timers[task.slot()]
    }

    /// Whether any timer is still armed
    pub fn is_running(&self) -> bool {
        self.timers.iter().any(Timer::is_armed)
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the session clock, firing every timer that comes due.
    ///
    /// Elapsed time beyond `MAX_FRAME_MS` is dropped.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.is_running() {
            return;
        }

        let until = self.now_ms + elapsed_ms.min(MAX_FRAME_MS) as u64;

        while let Some((task, due)) = self.next_due(until) {
            self.now_ms = due;
            self.poll_event_driven();
            self.run(task);
            if !self.is_running() {
                break;
            }
        }

        self.now_ms = self.now_ms.max(until);
        self.poll_event_driven();
    }

    /// Run one task immediately, as its timer would, and schedule its next
    /// fire one period from now. A disarmed task does nothing.
    pub fn run(&mut self, task: Task) {
        let timer = &mut self.timers[task.slot()];
        if !timer.armed {
            return;
        }
        timer.next_due_ms = self.now_ms + timer.period_ms as u64;

        match task {
            Task::SampleInput => self.sample_input(),
            Task::Spawn => {
                if let Some(event) = self.spawner.spawn(&mut self.state, &self.field) {
                    self.events.push(event);
                }
            }
            Task::Tick => {
                let events = tick(&mut self.state, &self.basket, &self.field, self.config.fall_step);
                self.events.extend(events);
                if self.state.phase == GamePhase::GameOver {
                    self.finish();
                }
            }
        }
    }

    /// Reset to a fresh game with the basket centered and timers re-armed
    pub fn restart(&mut self) {
        self.state.reset(self.config.initial_lives);
        self.basket.recenter(&self.field);
        // Input that arrived while the game was over belongs to the old game
        self.source.clear();
        for timer in &mut self.timers {
            timer.rearm(self.now_ms);
        }
        self.game_over_reported = false;
        log::info!("Session restarted");
    }

    /// Disarm every timer and drop pending input. The session stops
    /// changing until `restart`.
    pub fn dispose(&mut self) {
        for timer in &mut self.timers {
            timer.armed = false;
        }
        self.source.clear();
    }

    fn next_due(&self, until_ms: u64) -> Option<(Task, u64)> {
        Task::ALL
            .into_iter()
            .filter_map(|task| self.timers[task.slot()].due_by(until_ms).map(|due| (task, due)))
            .min_by_key(|&(_, due)| due)
    }

    fn sample_input(&mut self) {
        let view = SourceView {
            basket: &self.basket,
            field: &self.field,
            items: &self.state.items,
        };
        if let Some(x) = self.source.poll(&view) {
            self.basket.move_to(x, &self.field);
        }
    }

    /// Event-driven sources have no timer; pick up their latest signal
    fn poll_event_driven(&mut self) {
        if self.source.sample_period_ms().is_none() && self.state.phase == GamePhase::Playing {
            self.sample_input();
        }
    }

    fn finish(&mut self) {
        self.dispose();
        if self.game_over_reported {
            return;
        }
        self.game_over_reported = true;
        if let Some(callback) = self.on_game_over.as_mut() {
            callback(self.state.score);
        }
    }
}
