//! Sky Climb entry point
//!
//! The web embedding drives a `Session` from its animation-frame callback.
//! Natively this binary runs a headless demo session with the autopilot
//! steering, which doubles as a smoke test of the full stack: mount gating,
//! countdown, world streaming, rewards and the high score store.

use std::time::{SystemTime, UNIX_EPOCH};

use sky_climb::consts::*;
use sky_climb::drip::{DripGate, GameRecord, GameStatus};
use sky_climb::platform::{self, MemoryStore};
use sky_climb::sim::{GameEvent, GamePhase};
use sky_climb::{RewardSink, Session, Tuning};

struct LogRewards;

impl RewardSink for LogRewards {
    fn grant_xp(&mut self, amount: u32) {
        log::info!("granted {amount} XP");
    }
}

fn main() {
    platform::init_logging();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    log::info!("Sky Climb demo starting with seed {seed}");

    let record = GameRecord {
        id: "sky-climb".to_string(),
        status: GameStatus::Available,
        unlock_delay_days: None,
        required_mission_day: None,
    };

    let mut session = Session::mount(
        Some(record),
        DripGate::open(),
        Tuning::default(),
        seed,
        MemoryStore::new(),
        LogRewards,
    )
    .expect("demo game record is available");

    session.start();
    session.set_idle_mode(true);

    // Up to five minutes of sim time, one tick per iteration
    let max_ticks = 5 * 60 * TICK_HZ;
    for _ in 0..max_ticks {
        session.frame(SIM_DT);

        for event in session.events() {
            match event {
                GameEvent::CountdownTick(n) => log::info!("{n}..."),
                GameEvent::PhaseChanged(GamePhase::Playing) => log::info!("go!"),
                GameEvent::BiomeChanged(biome) => log::info!("entered biome {biome:?}"),
                GameEvent::NewHighScore(score) => log::info!("new high score: {score}"),
                _ => {}
            }
        }

        match session.phase() {
            GamePhase::GameOver => {
                log::info!("game over at {}m", session.score());
                break;
            }
            GamePhase::Win => {
                log::info!("reached the top at {}m!", session.score());
                break;
            }
            _ => {}
        }
    }

    log::info!(
        "demo finished: score {}m, high score {}m",
        session.score(),
        session.high_score()
    );
}
