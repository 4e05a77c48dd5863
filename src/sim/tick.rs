//! Fixed timestep session tick
//!
//! The loop controller: one motion pass, one collision pass, and one
//! spawn-gate check per tick, in that order, plus the Idle/Running/GameOver
//! transitions. The embedder calls [`tick`] once per display frame.

use super::motion;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::RESTART_DELAY;

/// Input state for a single tick
///
/// Direction flags are "currently held" signals from the input source;
/// `drag_delta` replaces them on touch devices and also drives auto-fire.
/// `start`/`restart`/`fire` are one-shot triggers the embedder clears after
/// each frame. Inputs that don't match the current phase are ignored.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire one bullet this tick
    pub fire: bool,
    /// Raw pointer delta from a touch drag (replaces the direction flags)
    pub drag_delta: Option<glam::Vec2>,
    /// Begin a session from Idle
    pub start: bool,
    /// Restart after GameOver
    pub restart: bool,
    /// Demo mode: the sim steers and fires by itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Idle => {
            if input.start {
                state.start_session();
            }
        }

        GamePhase::GameOver => {
            // Restart arms a short delay so one input event can't trigger
            // twice; restarts while armed are ignored.
            match state.restart_delay {
                Some(remaining) => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        state.start_session();
                    } else {
                        state.restart_delay = Some(remaining);
                    }
                }
                None if input.restart => {
                    state.restart_delay = Some(RESTART_DELAY);
                }
                None => {}
            }
        }

        GamePhase::Running => {
            let piloted = input.autopilot;
            let input = if piloted {
                autopilot_input(state, input)
            } else {
                input.clone()
            };

            state.time_ticks += 1;
            state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);

            if input.fire {
                state.spawn_bullet();
                // Autopilot shoots at the touch auto-fire cadence
                if piloted {
                    state.fire_cooldown = state.tuning.auto_fire_interval;
                }
            }
            // Touch drag fires continuously, gated by the inter-shot interval
            if input.drag_delta.is_some() && state.fire_cooldown == 0.0 {
                state.spawn_bullet();
                state.fire_cooldown = state.tuning.auto_fire_interval;
            }

            motion::advance(state, &input);
            if state.phase != GamePhase::Running {
                // Escape penalties exhausted the score mid-pass
                return;
            }

            let resolution = super::collision::resolve(state);
            if resolution.game_ended {
                return;
            }

            state.spawn_timer += dt;
            spawn::try_spawn(state);

            // Expire explosion effects
            let mut expired: Vec<u32> = Vec::new();
            for explosion in &mut state.explosions {
                explosion.ttl -= dt;
                if explosion.ttl <= 0.0 {
                    expired.push(explosion.id);
                }
            }
            if !expired.is_empty() {
                state.explosions.retain(|e| e.ttl > 0.0);
                for id in expired {
                    state.events.push(GameEvent::ExplosionExpired(id));
                }
            }
        }
    }
}

/// Demo-mode steering: chase the column of the lowest enemy, fire when
/// lined up, and sidestep anything about to hit the ship.
fn autopilot_input(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let player = state.player.center();

    // Most urgent enemy: the one closest to the player's row
    let target = state
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(enemy) = target {
        let enemy_x = enemy.center().x;
        let dx = enemy_x - player.x;

        // A descending enemy about to enter the player's row gets dodged,
        // anything else gets chased.
        let imminent = enemy.pos.y + enemy.size > state.player.pos.y - 120.0
            && dx.abs() < enemy.size / 2.0 + state.player.size.x;
        if imminent {
            input.left = dx >= 0.0;
            input.right = dx < 0.0;
        } else {
            input.left = dx < -state.tuning.player_step;
            input.right = dx > state.tuning.player_step;
        }

        // Fire when roughly lined up, at the auto-fire cadence
        if dx.abs() < state.player.size.x && state.fire_cooldown == 0.0 {
            input.fire = true;
        }
    }

    input
}
