//! Per-tick motion integration
//!
//! Moves the player from the current input state, bullets up, enemies down.
//! Entities that leave the viewport are removed here; an escaped enemy also
//! costs points, which can end the session on its own.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::PLAYER_TOP_MARGIN;

/// What one motion pass did to the session
#[derive(Debug, Clone, Default)]
pub struct MotionOutcome {
    /// Enemies that fully passed the bottom edge this tick
    pub escaped_enemies: u32,
    /// Bullets that fully passed the top edge this tick
    pub expired_bullets: u32,
}

/// Advance all positions by one tick.
///
/// The player moves by a fixed per-tick step in each held direction, or by
/// the raw drag delta on touch input; either way the result is clamped to
/// the viewport (with a top margin keeping the ship out of the spawn band).
pub fn advance(state: &mut GameState, input: &TickInput) -> MotionOutcome {
    let mut outcome = MotionOutcome::default();

    advance_player(state, input);

    // Bullets travel up; gone once fully above the top edge
    let mut expired: Vec<u32> = Vec::new();
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
        if bullet.pos.y + bullet.size.y < 0.0 {
            expired.push(bullet.id);
        }
    }
    for id in expired {
        state.remove_bullet(id);
        outcome.expired_bullets += 1;
    }

    // Enemies descend at their own speed; gone once fully below the bottom
    let bottom = state.viewport.y;
    let mut escaped: Vec<u32> = Vec::new();
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
        if enemy.pos.y > bottom {
            escaped.push(enemy.id);
        }
    }
    for id in escaped {
        state.remove_enemy(id);
        state.apply_escape_penalty();
        outcome.escaped_enemies += 1;
    }

    outcome
}

fn advance_player(state: &mut GameState, input: &TickInput) {
    let step = state.tuning.player_step;
    let player = &mut state.player;

    if let Some(delta) = input.drag_delta {
        // Touch drag: raw pointer delta, no fixed step
        player.pos += delta;
    } else {
        if input.left {
            player.pos.x -= step;
        }
        if input.right {
            player.pos.x += step;
        }
        if input.up {
            player.pos.y -= step;
        }
        if input.down {
            player.pos.y += step;
        }
    }

    let max = state.viewport - player.size;
    player.pos.x = player.pos.x.clamp(0.0, max.x);
    player.pos.y = player.pos.y.clamp(PLAYER_TOP_MARGIN, max.y);
}
