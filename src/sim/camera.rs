//! Camera follow and progress tracking
//!
//! The camera offset only ever decreases: the world scrolls up as the player
//! climbs, and falling back down never scrolls it backward. Score derives
//! from the maximum progress reached, so it is monotonic by construction.

use super::state::GameState;
use super::world;

/// Scroll the world if the player rose above the follow band, then update
/// score, biome and the platform stream. Called once per Playing tick, after
/// collision resolution.
pub fn track(state: &mut GameState) {
    let threshold = state.tuning.camera_threshold;
    if state.player.pos.y >= state.camera_y + threshold {
        return;
    }

    state.camera_y = state.player.pos.y - threshold;

    if state.progress() > state.max_progress {
        state.max_progress = state.progress();
        state.score = (state.max_progress / state.tuning.distance_per_point).floor() as u32;
    }

    state.refresh_biome();
    world::maintain(state);
}
