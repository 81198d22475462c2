//! Data-driven game balance
//!
//! Every gameplay number in one serde-friendly struct so balance passes don't
//! require a recompile. `Default` mirrors the canonical constants the game
//! was tuned at; `validate` enforces the relationships the simulation relies
//! on, most importantly that the worst-case platform gap stays crossable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("jump force must be negative (upward), got {0}")]
    NonNegativeJump(f32),
    #[error("gap bounds inverted: min {min} > max {max}")]
    InvertedGapBounds { min: f32, max: f32 },
    #[error("max gap {max_gap} exceeds the jump apex {apex}: platforms would be unreachable")]
    UnreachableGap { max_gap: f32, apex: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(String),
}

/// Gameplay balance values. Units are world pixels and per-tick velocities at
/// the fixed 60 Hz step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_force: f32,
    pub boost_multiplier: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub difficulty_divisor: f32,
    pub difficulty_cap: f32,
    pub moving_min_height: f32,
    pub moving_cutoff: f32,
    pub breakable_min_height: f32,
    pub breakable_cutoff: f32,
    pub boost_cutoff: f32,
    pub landing_tolerance: f32,
    pub camera_threshold: f32,
    pub distance_per_point: f32,
    pub win_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            boost_multiplier: BOOST_MULTIPLIER,
            move_speed: MOVE_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            difficulty_divisor: DIFFICULTY_DIVISOR,
            difficulty_cap: DIFFICULTY_CAP,
            moving_min_height: MOVING_MIN_HEIGHT,
            moving_cutoff: MOVING_CUTOFF,
            breakable_min_height: BREAKABLE_MIN_HEIGHT,
            breakable_cutoff: BREAKABLE_CUTOFF,
            boost_cutoff: BOOST_CUTOFF,
            landing_tolerance: LANDING_TOLERANCE,
            camera_threshold: CAMERA_THRESHOLD,
            distance_per_point: DISTANCE_PER_POINT,
            win_height: WIN_HEIGHT,
        }
    }
}

impl Tuning {
    /// Maximum rise of a normal jump under these values: v^2 / 2g
    pub fn jump_apex(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity)
    }

    /// Check the invariants generation and physics rely on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.gravity <= 0.0 {
            return Err(TuningError::NonPositiveGravity(self.gravity));
        }
        if self.jump_force >= 0.0 {
            return Err(TuningError::NonNegativeJump(self.jump_force));
        }
        if self.min_gap > self.max_gap {
            return Err(TuningError::InvertedGapBounds {
                min: self.min_gap,
                max: self.max_gap,
            });
        }
        let apex = self.jump_apex();
        if self.max_gap > apex {
            return Err(TuningError::UnreachableGap {
                max_gap: self.max_gap,
                apex,
            });
        }
        Ok(())
    }

    /// Parse and validate a tuning override from JSON. Missing fields fall
    /// back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }
}
