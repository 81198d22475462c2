//! Per-tick physics integration
//!
//! Constant-speed horizontal movement with no inertia, gravity with a terminal
//! fall clamp, and horizontal screen wrap. Pure numeric update, no error
//! conditions; must run once per tick before collision checks.

use crate::consts::*;
use crate::tuning::Tuning;

use super::state::Player;

/// Advance the player by one tick from the current input flags.
///
/// Records `prev_y` before moving, which the collision resolver's swept test
/// depends on. The fall clamp applies to descent only, so landing impulses
/// launch at full speed.
pub fn integrate(player: &mut Player, left: bool, right: bool, tuning: &Tuning) {
    player.prev_y = player.pos.y;

    // Immediate start/stop; left wins when both flags are held
    player.vel.x = if left {
        -tuning.move_speed
    } else if right {
        tuning.move_speed
    } else {
        0.0
    };
    player.pos.x += player.vel.x;

    player.vel.y += tuning.gravity;
    if player.vel.y > tuning.max_fall_speed {
        player.vel.y = tuning.max_fall_speed;
    }
    player.pos.y += player.vel.y;

    // Wrap across screen edges, half the body at a time
    if player.pos.x < -PLAYER_SIZE / 2.0 {
        player.pos.x = SCREEN_WIDTH - PLAYER_SIZE / 2.0;
    } else if player.pos.x > SCREEN_WIDTH - PLAYER_SIZE / 2.0 {
        player.pos.x = -PLAYER_SIZE / 2.0;
    }
}
