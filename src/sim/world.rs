//! Procedural world streaming
//!
//! Platforms are generated in batches ahead of the camera with a
//! difficulty-scaled gap function and a single type-probability draw per
//! platform, then pruned once they scroll far enough below the visible window.
//! The live set stays O(screen height / average gap) no matter how far the
//! climb goes. All randomness comes from the session's seeded generator.

use std::f32::consts::TAU;

use rand::Rng;

use crate::consts::*;

use super::state::{GameState, Platform, PlatformKind};

/// Extra minimum gap earned by altitude, capped so the worst-case gap stays
/// crossable by the jump impulse (see `Tuning::validate`).
#[inline]
pub fn difficulty_bonus(height: f32, divisor: f32, cap: f32) -> f32 {
    (height / divisor).min(cap).max(0.0)
}

/// Seed the world for a fresh session: one start platform centered beneath
/// the spawn point, then the first span above it.
pub fn populate(state: &mut GameState) {
    let id = state.next_platform_id();
    state.platforms.push(Platform::new(
        id,
        SCREEN_WIDTH / 2.0 - PLATFORM_WIDTH / 2.0,
        START_PLATFORM_Y,
        PlatformKind::Normal,
        0.0,
    ));
    generate_span(state, START_PLATFORM_Y, INITIAL_HORIZON);
}

/// Emit platforms from `from_y` up to (not past) `to_y`.
///
/// The altitude used for the difficulty bonus and the type gates is the
/// cursor's height before the new gap is applied. One probability draw per
/// platform; the checks run in order moving, breakable, boost, each
/// overriding the previous when its own gate also passes.
pub fn generate_span(state: &mut GameState, from_y: f32, to_y: f32) {
    let t = state.tuning.clone();
    let mut cursor = from_y;

    while cursor > to_y {
        let height = -cursor;
        let bonus = difficulty_bonus(height, t.difficulty_divisor, t.difficulty_cap);
        let span = (t.max_gap - t.min_gap - bonus).max(0.0);
        let gap = (t.min_gap + state.rng.random::<f32>() * span + bonus).min(t.max_gap);
        cursor -= gap;

        let x = state.rng.random::<f32>() * (SCREEN_WIDTH - PLATFORM_WIDTH);
        let draw = state.rng.random::<f32>();

        let mut kind = PlatformKind::Normal;
        if height > t.moving_min_height && draw > t.moving_cutoff {
            kind = PlatformKind::Moving;
        }
        if height > t.breakable_min_height && draw > t.breakable_cutoff {
            kind = PlatformKind::Breakable;
        }
        if draw > t.boost_cutoff {
            kind = PlatformKind::Boost;
        }

        let phase = if kind == PlatformKind::Moving {
            state.rng.random::<f32>() * TAU
        } else {
            0.0
        };

        let id = state.next_platform_id();
        state.platforms.push(Platform::new(id, x, cursor, kind, phase));
    }
}

/// Keep the stream ahead of the camera and drop what fell out the bottom.
/// Called whenever the camera reaches a new maximum.
pub fn maintain(state: &mut GameState) {
    if let Some(last) = state.platforms.last() {
        let lead_line = state.camera_y - SCREEN_HEIGHT - GEN_LEAD;
        if last.y > lead_line {
            let from = last.y;
            generate_span(state, from, state.camera_y - SCREEN_HEIGHT - GEN_HORIZON);
        }
    }

    let cutoff = state.camera_y + SCREEN_HEIGHT + PRUNE_MARGIN;
    state.platforms.retain(|p| p.y < cutoff);
    let live = &state.platforms;
    state
        .pending_hides
        .retain(|h| live.iter().any(|p| p.id == h.platform_id));

    ensure_platform(state);
}

/// An empty live set is a generation defect. Log it and synthesize a
/// platform directly beneath the player so the tick loop keeps running.
pub fn ensure_platform(state: &mut GameState) {
    if !state.platforms.is_empty() {
        return;
    }
    log::error!(
        "live platform set empty at progress {:.0}; synthesizing fallback",
        state.progress()
    );
    let x = (state.player.foot_x() - PLATFORM_WIDTH / 2.0).clamp(0.0, SCREEN_WIDTH - PLATFORM_WIDTH);
    let y = state.player.bottom();
    let id = state.next_platform_id();
    state
        .platforms
        .push(Platform::new(id, x, y, PlatformKind::Normal, 0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn fresh(seed: u64) -> GameState {
        GameState::new(seed, Tuning::default())
    }

    #[test]
    fn test_platforms_descend_monotonically() {
        let state = fresh(3);
        for pair in state.platforms.windows(2) {
            assert!(pair[1].y < pair[0].y);
        }
    }

    #[test]
    fn test_horizontal_placement_in_bounds() {
        let state = fresh(11);
        for p in &state.platforms {
            assert!(p.x >= 0.0 && p.x <= SCREEN_WIDTH - PLATFORM_WIDTH);
        }
    }

    #[test]
    fn test_no_special_kinds_below_altitude_gates() {
        let mut state = fresh(5);
        state.platforms.clear();
        // Whole span below the moving gate
        generate_span(&mut state, 500.0, -900.0);
        for p in &state.platforms {
            assert_ne!(p.kind, PlatformKind::Moving, "moving below its gate");
            assert_ne!(p.kind, PlatformKind::Breakable, "breakable below its gate");
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut state = fresh(9);
        generate_span(&mut state, -1000.0, -8000.0);
        let mut ids: Vec<u32> = state.platforms.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.platforms.len());
    }

    #[test]
    fn test_prune_keeps_live_set_bounded() {
        let mut state = fresh(13);
        // Climb far: repeatedly scroll the camera and maintain
        for step in 1..200 {
            state.camera_y = -(step as f32) * 300.0;
            maintain(&mut state);
        }
        let cutoff = state.camera_y + SCREEN_HEIGHT + PRUNE_MARGIN;
        assert!(state.platforms.iter().all(|p| p.y < cutoff));
        // One screen + lead of content at gaps >= MIN_GAP bounds the set
        let window = SCREEN_HEIGHT * 2.0 + GEN_HORIZON + PRUNE_MARGIN;
        assert!((state.platforms.len() as f32) <= window / MIN_GAP + 2.0);
    }

    #[test]
    fn test_empty_set_synthesizes_fallback_beneath_player() {
        let mut state = fresh(17);
        state.platforms.clear();
        ensure_platform(&mut state);
        assert_eq!(state.platforms.len(), 1);
        let p = &state.platforms[0];
        assert_eq!(p.y, state.player.bottom());
        assert!(p.spans(state.player.foot_x()));
    }

    proptest! {
        /// Gap bound: every generated gap lies in [MIN_GAP, MAX_GAP]
        /// regardless of the altitude the span starts at.
        #[test]
        fn prop_gaps_within_bounds(seed in any::<u64>(), start in -300_000.0f32..500.0) {
            let mut state = GameState::new(seed, Tuning::default());
            state.platforms.clear();
            generate_span(&mut state, start, start - 3000.0);

            let mut prev = start;
            for p in &state.platforms {
                let gap = prev - p.y;
                prop_assert!(gap >= MIN_GAP - 1e-3, "gap {} below minimum", gap);
                prop_assert!(gap <= MAX_GAP + 1e-3, "gap {} above maximum", gap);
                prev = p.y;
            }
        }

        /// Type draws respect their altitude gates at any altitude.
        #[test]
        fn prop_kind_gates(seed in any::<u64>(), start in -50_000.0f32..0.0) {
            let mut state = GameState::new(seed, Tuning::default());
            state.platforms.clear();
            generate_span(&mut state, start, start - 2000.0);
            for p in &state.platforms {
                // Gates use the cursor height before the platform's own gap,
                // which is at most MAX_GAP below the platform itself.
                let height = -p.y;
                if p.kind == PlatformKind::Moving {
                    prop_assert!(height + MAX_GAP > MOVING_MIN_HEIGHT);
                }
                if p.kind == PlatformKind::Breakable {
                    prop_assert!(height + MAX_GAP > BREAKABLE_MIN_HEIGHT);
                }
            }
        }
    }
}
