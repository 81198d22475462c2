//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives here. The state is owned by a single
//! session and is never shared across sessions; renderers only ever see
//! read-only snapshots built from it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

use super::world;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, awaiting an explicit begin
    Start,
    /// Fixed 3-2-1 countdown; world generated but frozen, input ignored
    Countdown,
    /// Active gameplay
    Playing,
    /// Simulation frozen in place, resumes to Playing
    Paused,
    /// Player fell below the visible world
    GameOver,
    /// Progress crossed the win altitude
    Win,
}

/// Platform flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Oscillates horizontally around its anchor
    Moving,
    /// Vanishes shortly after its one landing
    Breakable,
    /// Larger jump impulse
    Boost,
}

/// A platform entity
///
/// `x` is the live position; `anchor_x` is the generated position that moving
/// platforms oscillate around (identical for the other kinds). A breakable
/// platform that has gone invisible is permanently non-solid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub anchor_x: f32,
    pub kind: PlatformKind,
    /// Oscillation phase offset (radians); meaningful for Moving only
    pub phase: f32,
    pub visible: bool,
}

impl Platform {
    pub fn new(id: u32, x: f32, y: f32, kind: PlatformKind, phase: f32) -> Self {
        Self {
            id,
            x,
            y,
            anchor_x: x,
            kind,
            phase,
            visible: true,
        }
    }

    /// Horizontal span a falling foot can land on
    #[inline]
    pub fn spans(&self, foot_x: f32) -> bool {
        foot_x >= self.x && foot_x <= self.x + PLATFORM_WIDTH
    }
}

/// The controlled climber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// y at the start of the current tick, for the swept landing test
    pub prev_y: f32,
}

impl Player {
    /// Spawn at the session start position
    pub fn spawn() -> Self {
        let pos = Vec2::new(SCREEN_WIDTH / 2.0 - PLAYER_SIZE / 2.0, PLAYER_START_Y);
        Self {
            pos,
            vel: Vec2::ZERO,
            prev_y: pos.y,
        }
    }

    /// Center-bottom x used for landing tests
    #[inline]
    pub fn foot_x(&self) -> f32 {
        self.pos.x + PLAYER_SIZE / 2.0
    }

    /// Bottom edge this tick
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_SIZE
    }

    /// Bottom edge at the start of the tick
    #[inline]
    pub fn prev_bottom(&self) -> f32 {
        self.prev_y + PLAYER_SIZE
    }
}

/// Cosmetic background band, selected by cumulative altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Earth,
    Mountains,
    Sky,
    Space,
    Heaven,
}

impl Biome {
    /// Ordered threshold table; `height` is progress above the start line
    pub fn at_height(height: f32) -> Self {
        if height < 5000.0 {
            Biome::Earth
        } else if height < 10000.0 {
            Biome::Mountains
        } else if height < 20000.0 {
            Biome::Sky
        } else if height < 30000.0 {
            Biome::Space
        } else {
            Biome::Heaven
        }
    }
}

/// Events emitted by the simulation, drained by the embedding each tick.
///
/// Reward and phase events are how the session layer learns to call external
/// collaborators (XP sink, high score store) without the sim knowing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    /// Seconds remaining in the countdown (3, 2, 1)
    CountdownTick(u8),
    Landed(PlatformKind),
    BiomeChanged(Biome),
    /// Fire-and-forget XP grant for the external progress collaborator
    RewardXp(u32),
    /// Emitted by the session layer after the persistent store was updated
    NewHighScore(u32),
}

/// A deferred visibility flip for a breakable platform, keyed by sim tick
/// rather than wall-clock so tests never wait on real delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledHide {
    pub due_tick: u64,
    pub platform_id: u32,
}

/// Complete session state (deterministic for a given seed and input script)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded generator for gap sizing, placement and type draws
    pub rng: Pcg32,
    /// Gameplay balance values
    pub tuning: Tuning,
    /// Simulation tick counter (advances only while Playing)
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks remaining in the countdown
    pub countdown_ticks: u32,
    pub player: Player,
    /// Live platform set, newest (highest) last
    pub platforms: Vec<Platform>,
    /// Camera offset separating world from screen coordinates; only decreases
    pub camera_y: f32,
    /// Greatest progress reached; score derives from this, not from position
    pub max_progress: f32,
    pub score: u32,
    pub biome: Biome,
    /// Progress at the last biome re-evaluation
    last_biome_check: f32,
    /// Tick-keyed queue of pending breakable hides
    pub pending_hides: Vec<ScheduledHide>,
    /// Events produced this tick, drained by the embedding
    pub events: Vec<GameEvent>,
    /// Next platform ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session world: player at the spawn point, a start
    /// platform beneath it, and the first generation span above.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            time_ticks: 0,
            phase: GamePhase::Start,
            countdown_ticks: 0,
            player: Player::spawn(),
            platforms: Vec::new(),
            camera_y: 0.0,
            max_progress: 0.0,
            score: 0,
            biome: Biome::Earth,
            last_biome_check: 0.0,
            pending_hides: Vec::new(),
            events: Vec::new(),
            next_id: 0,
        };

        world::populate(&mut state);
        state
    }

    /// Allocate a new platform ID
    pub fn next_platform_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Progress above the start line (positive as the player climbs)
    #[inline]
    pub fn progress(&self) -> f32 {
        -self.camera_y
    }

    /// Countdown label for the HUD: Some(3..=1) during the countdown
    pub fn countdown_seconds(&self) -> Option<u8> {
        if self.phase != GamePhase::Countdown {
            return None;
        }
        Some(self.countdown_ticks.div_ceil(TICK_HZ) as u8)
    }

    /// Enter the countdown from Start (or from a restart). The world is
    /// already generated and visible, just frozen.
    pub fn begin_countdown(&mut self) {
        self.phase = GamePhase::Countdown;
        self.countdown_ticks = COUNTDOWN_TICKS;
        self.events.push(GameEvent::PhaseChanged(GamePhase::Countdown));
        self.events.push(GameEvent::CountdownTick(3));
    }

    /// Re-evaluate the biome when progress moves into a new band.
    /// Emits only when the band actually changes.
    pub fn refresh_biome(&mut self) {
        if self.progress() <= self.last_biome_check + BIOME_BAND {
            return;
        }
        self.last_biome_check = self.progress();
        let biome = Biome::at_height(self.progress());
        if biome != self.biome {
            self.biome = biome;
            self.events.push(GameEvent::BiomeChanged(biome));
        }
    }
}
