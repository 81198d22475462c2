//! Sky Climb - an endless vertical climber
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, world streaming, collisions, session phases)
//! - `session`: App-facing session wrapper (mount gating, rewards, high score)
//! - `platform`: Browser/native storage abstraction
//! - `drip`: Content-gate data contract consumed from the catalog
//! - `tuning`: Data-driven game balance

pub mod drip;
pub mod highscore;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscore::HighScore;
pub use session::{MountError, RewardSink, Session};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics numbers are per-tick at the fixed 60 Hz step, matching the feel the
/// game was tuned at. `Tuning::default()` mirrors the gameplay values so they
/// can be overridden from data.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second
    pub const TICK_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Virtual screen dimensions (world units)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player square extent
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Platform extents
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;

    /// Downward acceleration per tick (super floaty)
    pub const GRAVITY: f32 = 0.15;
    /// Landing impulse (negative = up)
    pub const JUMP_FORCE: f32 = -9.0;
    /// Boost platforms multiply the landing impulse
    pub const BOOST_MULTIPLIER: f32 = 1.5;
    /// Horizontal speed while a direction is held (no inertia)
    pub const MOVE_SPEED: f32 = 4.0;
    /// Terminal fall speed (parachute effect; ascent is unclamped)
    pub const MAX_FALL_SPEED: f32 = 5.0;

    /// Vertical gap bounds between adjacent platforms
    pub const MIN_GAP: f32 = 60.0;
    pub const MAX_GAP: f32 = 120.0;
    /// difficulty_bonus(height) = min(height / DIFFICULTY_DIVISOR, DIFFICULTY_CAP)
    pub const DIFFICULTY_DIVISOR: f32 = 5000.0;
    pub const DIFFICULTY_CAP: f32 = 40.0;

    /// Altitude gates and probability cutoffs for platform promotion.
    /// One draw per platform; later checks override earlier ones.
    pub const MOVING_MIN_HEIGHT: f32 = 1000.0;
    pub const MOVING_CUTOFF: f32 = 0.8;
    pub const BREAKABLE_MIN_HEIGHT: f32 = 2000.0;
    pub const BREAKABLE_CUTOFF: f32 = 0.9;
    pub const BOOST_CUTOFF: f32 = 0.95;

    /// Moving platform oscillation around its anchor
    pub const MOVING_AMPLITUDE: f32 = 60.0;
    pub const MOVING_ANGULAR_FREQ: f32 = 2.0;

    /// Ticks a breakable platform stays visible after its one landing
    pub const BREAK_DELAY_TICKS: u64 = 6;

    /// Player is held in the upper 30% of the screen
    pub const CAMERA_THRESHOLD: f32 = SCREEN_HEIGHT * 0.3;
    /// Swept landing test tolerance above the platform surface
    pub const LANDING_TOLERANCE: f32 = 10.0;
    /// World units per score point
    pub const DISTANCE_PER_POINT: f32 = 10.0;
    /// Biome bands are re-evaluated every this much progress
    pub const BIOME_BAND: f32 = 1000.0;
    /// Altitude at which the session is won
    pub const WIN_HEIGHT: f32 = 30000.0;

    /// Generation look-ahead: extend when the newest platform is within one
    /// screen + GEN_LEAD of the visible top, out to one screen + GEN_HORIZON
    pub const GEN_LEAD: f32 = 200.0;
    pub const GEN_HORIZON: f32 = 600.0;
    /// Platforms more than one screen + this margin below the camera are dropped
    pub const PRUNE_MARGIN: f32 = 100.0;

    /// Session layout at reset
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 150.0;
    pub const START_PLATFORM_Y: f32 = SCREEN_HEIGHT - 50.0;
    /// First generation pass fills up to this y
    pub const INITIAL_HORIZON: f32 = -1000.0;

    /// Countdown before play (3 -> 2 -> 1 -> go)
    pub const COUNTDOWN_TICKS: u32 = 3 * TICK_HZ;

    /// Reward emission: gameover grants score / XP_SCORE_DIVISOR, win grants WIN_XP
    pub const XP_SCORE_DIVISOR: u32 = 10;
    pub const WIN_XP: u32 = 500;
}
