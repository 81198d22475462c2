//! Content-gate data contract
//!
//! The catalog owns availability and the drip-unlock date arithmetic; this
//! core only consumes the record and the derived lock verdict. When a game is
//! locked the session mounts in a blocked state and the UI shows the
//! countdown modal; that is a state, not an error.

use serde::{Deserialize, Serialize};

/// Availability status from the game record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Available,
    ComingSoon,
    Retired,
}

/// The slice of the catalog's game record the climber cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub status: GameStatus,
    #[serde(default)]
    pub unlock_delay_days: Option<u32>,
    #[serde(default)]
    pub required_mission_day: Option<u32>,
}

/// Derived lock verdict, computed by the catalog's drip predicate. The core
/// never does the date arithmetic itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DripGate {
    pub is_locked: bool,
    pub days_remaining: u32,
}

impl DripGate {
    /// Gate that lets everything through
    pub fn open() -> Self {
        Self::default()
    }

    pub fn locked(days_remaining: u32) -> Self {
        Self {
            is_locked: true,
            days_remaining,
        }
    }
}
