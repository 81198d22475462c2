//! App-facing session wrapper
//!
//! Owns the running simulation plus everything the embedding shouldn't have
//! to wire per frame: the input flags, the fixed-timestep accumulator, the
//! mount-time availability and drip gates, the reward sink and the persistent
//! high score. Renderers consume `snapshot()` and the drained event stream;
//! they never get a mutable handle into the sim.
//!
//! Cooperative scheduling is the embedding's side of the contract: call
//! `frame(dt)` once per refresh while active, and simply stop calling it on
//! pause/teardown. All delayed work inside the sim is tick-keyed, so nothing
//! fires after the last `frame` call.

use thiserror::Error;

use crate::consts::*;
use crate::drip::{DripGate, GameRecord, GameStatus};
use crate::highscore::HighScore;
use crate::platform::storage::KeyValueStore;
use crate::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, InputState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Startup failures. Fatal to this screen, recoverable at the app level (the
/// caller redirects back to the game-selection surface).
#[derive(Debug, Error)]
pub enum MountError {
    #[error("game record missing or malformed")]
    MissingRecord,
    #[error("game `{0}` is not available")]
    Unavailable(String),
    #[error(transparent)]
    Tuning(#[from] TuningError),
}

/// External progress collaborator. Grants are fire-and-forget; the session
/// never waits on or reads back from the sink.
pub trait RewardSink {
    fn grant_xp(&mut self, amount: u32);
}

/// Sink that drops rewards, for headless tools that don't track progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRewards;

impl RewardSink for NullRewards {
    fn grant_xp(&mut self, _amount: u32) {}
}

/// A mounted climber session
pub struct Session<S: KeyValueStore, R: RewardSink> {
    state: GameState,
    tuning: Tuning,
    input: InputState,
    pending_pause: bool,
    idle_mode: bool,
    accumulator: f32,
    store: S,
    rewards: R,
    high_score: HighScore,
    gate: DripGate,
    /// Sim events plus session-level ones, drained by the embedding
    outbox: Vec<GameEvent>,
}

impl<S: KeyValueStore, R: RewardSink> Session<S, R> {
    /// Validate the game record and gates, load the stored high score, and
    /// build the initial (idle) world.
    pub fn mount(
        record: Option<GameRecord>,
        gate: DripGate,
        tuning: Tuning,
        seed: u64,
        store: S,
        rewards: R,
    ) -> Result<Self, MountError> {
        let record = record.ok_or(MountError::MissingRecord)?;
        if record.status != GameStatus::Available {
            return Err(MountError::Unavailable(record.id));
        }
        tuning.validate()?;

        let high_score = HighScore::load(&store);
        if gate.is_locked {
            log::info!(
                "game {} drip-locked for {} more day(s)",
                record.id,
                gate.days_remaining
            );
        }

        Ok(Self {
            state: GameState::new(seed, tuning.clone()),
            tuning,
            input: InputState::default(),
            pending_pause: false,
            idle_mode: false,
            accumulator: 0.0,
            store,
            rewards,
            high_score,
            gate,
            outbox: Vec::new(),
        })
    }

    /// Whether the drip lock blocks interaction (the UI shows the modal)
    pub fn is_blocked(&self) -> bool {
        self.gate.is_locked
    }

    pub fn drip(&self) -> DripGate {
        self.gate
    }

    /// Begin the countdown from the idle start screen.
    /// Returns false when blocked or not in Start.
    pub fn start(&mut self) -> bool {
        if self.gate.is_locked {
            log::warn!("start refused: drip lock active");
            return false;
        }
        if self.state.phase != GamePhase::Start {
            return false;
        }
        self.state.begin_countdown();
        self.collect_events();
        true
    }

    /// From gameover/win (or the start screen), begin a fresh attempt with a
    /// freshly re-seeded world.
    pub fn restart(&mut self, seed: u64) -> bool {
        if self.gate.is_locked {
            return false;
        }
        match self.state.phase {
            GamePhase::Start | GamePhase::GameOver | GamePhase::Win => {
                self.input = InputState::default();
                self.pending_pause = false;
                self.accumulator = 0.0;
                self.state = GameState::new(seed, self.tuning.clone());
                self.state.begin_countdown();
                self.collect_events();
                true
            }
            _ => false,
        }
    }

    pub fn press_left(&mut self) {
        self.input.press_left();
    }

    pub fn release_left(&mut self) {
        self.input.release_left();
    }

    pub fn press_right(&mut self) {
        self.input.press_right();
    }

    pub fn release_right(&mut self) {
        self.input.release_right();
    }

    /// Queue a pause/resume toggle for the next tick
    pub fn toggle_pause(&mut self) {
        self.pending_pause = true;
    }

    /// Demo/attract mode: the autopilot steers instead of the input flags
    pub fn set_idle_mode(&mut self, on: bool) {
        self.idle_mode = on;
    }

    /// Advance the simulation by elapsed wall-clock time. Fixed-timestep
    /// accumulator, clamped substeps; correctness does not depend on the
    /// caller's frame rate.
    pub fn frame(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Advance exactly one tick
    fn step(&mut self) {
        let mut input = TickInput::from_flags(self.input);
        input.pause = std::mem::take(&mut self.pending_pause);
        input.idle_mode = self.idle_mode;
        tick(&mut self.state, &input);
        self.collect_events();
    }

    /// Drain sim events, perform the session-level side effects they imply,
    /// and stage everything for the embedding.
    fn collect_events(&mut self) {
        let events: Vec<GameEvent> = self.state.events.drain(..).collect();
        for event in events {
            self.outbox.push(event);
            match event {
                GameEvent::RewardXp(amount) => self.rewards.grant_xp(amount),
                GameEvent::PhaseChanged(GamePhase::GameOver) => {
                    let score = self.state.score;
                    if self.high_score.record(score, &mut self.store) {
                        self.outbox.push(GameEvent::NewHighScore(score));
                    }
                }
                _ => {}
            }
        }
    }

    /// Events since the last drain, in emission order
    pub fn events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// All-time best as loaded at mount and updated by completed attempts
    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rewards(&self) -> &R {
        &self.rewards
    }
}
