//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Delays counted in sim ticks, never wall-clock
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Landing, resolve_landings};
pub use snapshot::{FrameSnapshot, PlatformView, Rect};
pub use state::{
    Biome, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player, ScheduledHide,
};
pub use tick::{InputState, TickInput, tick};
pub use world::difficulty_bonus;
