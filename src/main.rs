//! Star Defender entry point
//!
//! Headless demo: runs a seeded autopilot session to completion and logs
//! the outcome. Usage: `star-defender [seed] [desktop|touch]`

use glam::Vec2;

use star_defender::consts::{SIM_DT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use star_defender::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use star_defender::tuning::{ControlProfile, Tuning};

/// Tick cap for the demo run (10 minutes of play)
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| std::time::UNIX_EPOCH.elapsed().map(|d| d.as_secs()).unwrap_or(42));
    let profile = args
        .next()
        .and_then(|s| ControlProfile::from_str(&s))
        .unwrap_or_default();

    log::info!("autopilot demo: seed {seed}, {} profile", profile.as_str());

    // Balance overrides, e.g. STAR_DEFENDER_TUNING=mytuning.json
    let tuning = match std::env::var_os("STAR_DEFENDER_TUNING") {
        Some(path) => Tuning::load_or_default(std::path::Path::new(&path), profile),
        None => Tuning::for_profile(profile),
    };

    let mut state =
        GameState::with_tuning(seed, Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT), tuning);

    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        SIM_DT,
    );

    let pilot = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut best_level = 0;
    while state.phase == GamePhase::Running && state.time_ticks < MAX_TICKS {
        tick(&mut state, &pilot, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => {
                    let level = state.difficulty_level();
                    if level > best_level {
                        best_level = level;
                        log::info!("score {score}, difficulty level {level}");
                    }
                }
                GameEvent::SessionEnded { final_score } => {
                    log::info!("final score: {final_score}");
                }
                _ => {}
            }
        }
    }

    let seconds = state.time_ticks as f32 * SIM_DT;
    log::info!(
        "survived {seconds:.1}s ({} ticks), score {}, {} enemies on screen",
        state.time_ticks,
        state.score,
        state.enemies.len()
    );
}
