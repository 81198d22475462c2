//! Frame producer data contract
//!
//! Each tick the core exposes a read-only snapshot: the player rect, the
//! live+visible platforms, the score and the camera offset. That is enough
//! for an external renderer to paint a frame without seeing internal timers
//! or velocities, and without a mutable handle into the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::state::{Biome, GamePhase, GameState, PlatformKind};

/// Axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// What a renderer needs to draw one platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: PlatformKind,
}

/// Per-tick rendering snapshot. World coordinates throughout; the renderer
/// subtracts `camera_y` to get screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub player: Rect,
    /// Live and visible platforms only
    pub platforms: Vec<PlatformView>,
    pub score: u32,
    pub camera_y: f32,
    pub biome: Biome,
    /// Countdown label (3..=1) while in the countdown phase
    pub countdown: Option<u8>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            player: Rect {
                x: state.player.pos.x,
                y: state.player.pos.y,
                w: PLAYER_SIZE,
                h: PLAYER_SIZE,
            },
            platforms: state
                .platforms
                .iter()
                .filter(|p| p.visible)
                .map(|p| PlatformView {
                    id: p.id,
                    x: p.x,
                    y: p.y,
                    kind: p.kind,
                })
                .collect(),
            score: state.score,
            camera_y: state.camera_y,
            biome: state.biome,
            countdown: state.countdown_seconds(),
        }
    }
}
