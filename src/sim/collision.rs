//! Swept landing detection and response
//!
//! The tricky part of an endless climber: a falling player can cover more
//! than a platform's thickness in one tick, so the landing test must use both
//! the previous and current bottom edge. A single-position overlap test would
//! tunnel straight through at terminal velocity.

use crate::consts::*;

use super::state::{GameEvent, GameState, PlatformKind, ScheduledHide};

/// A resolved landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub platform_id: u32,
    pub kind: PlatformKind,
}

/// Detect and resolve at most one landing for this tick.
///
/// Only runs while the player is falling; the landing impulse flips the
/// velocity upward, which is what prevents a platform from triggering twice
/// in one approach. When the sweep crosses several surfaces in a single tick
/// the topmost one wins, since that is the first the foot reaches.
pub fn resolve_landings(state: &mut GameState) -> Option<Landing> {
    if state.player.vel.y <= 0.0 {
        return None;
    }

    let foot_x = state.player.foot_x();
    let bottom = state.player.bottom();
    let prev_bottom = state.player.prev_bottom();
    let tolerance = state.tuning.landing_tolerance;

    let mut best: Option<usize> = None;
    for (i, p) in state.platforms.iter().enumerate() {
        if !p.visible || !p.spans(foot_x) {
            continue;
        }
        let crossed = prev_bottom <= p.y + tolerance && bottom >= p.y;
        if !crossed {
            continue;
        }
        match best {
            Some(j) if state.platforms[j].y <= p.y => {}
            _ => best = Some(i),
        }
    }

    let idx = best?;
    let (platform_id, kind, surface_y) = {
        let p = &state.platforms[idx];
        (p.id, p.kind, p.y)
    };

    // Snap the feet onto the surface and kill the fall before the impulse
    state.player.pos.y = surface_y - PLAYER_SIZE;
    state.player.vel.y = 0.0;

    let t = &state.tuning;
    state.player.vel.y = match kind {
        PlatformKind::Boost => t.jump_force * t.boost_multiplier,
        _ => t.jump_force,
    };

    if kind == PlatformKind::Breakable
        && !state
            .pending_hides
            .iter()
            .any(|h| h.platform_id == platform_id)
    {
        state.pending_hides.push(ScheduledHide {
            due_tick: state.time_ticks + BREAK_DELAY_TICKS,
            platform_id,
        });
    }

    state.events.push(GameEvent::Landed(kind));
    Some(Landing { platform_id, kind })
}

/// Flip visibility on breakable platforms whose grace period has elapsed.
/// Runs at the top of each tick; an invisible platform is skipped entirely by
/// every later overlap test, permanently.
pub fn apply_due_hides(state: &mut GameState) {
    let now = state.time_ticks;
    if !state.pending_hides.iter().any(|h| h.due_tick <= now) {
        return;
    }
    let due: Vec<u32> = state
        .pending_hides
        .iter()
        .filter(|h| h.due_tick <= now)
        .map(|h| h.platform_id)
        .collect();
    for p in &mut state.platforms {
        if due.contains(&p.id) {
            p.visible = false;
        }
    }
    state.pending_hides.retain(|h| h.due_tick > now);
}

/// Oscillate moving platforms around their anchor as a continuous function of
/// elapsed sim time. Independent of collision state, bounded to the screen.
pub fn update_moving(state: &mut GameState) {
    let t_secs = state.time_ticks as f32 * SIM_DT;
    for p in &mut state.platforms {
        if p.kind == PlatformKind::Moving {
            let swing = (t_secs * MOVING_ANGULAR_FREQ + p.phase).sin() * MOVING_AMPLITUDE;
            p.x = (p.anchor_x + swing).clamp(0.0, SCREEN_WIDTH - PLATFORM_WIDTH);
        }
    }
}
