//! Timer-gated enemy spawner
//!
//! One gate check per tick. The gate interval shortens with the difficulty
//! level, enemy speed ramps with it, and past a threshold level a spawn may
//! bring one extra enemy along (a single-shot swarm burst, never recursive).

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Try to spawn an enemy. Returns the new enemy's ID when the spawn gate
/// was open, `None` otherwise. Call exactly once per tick after the spawn
/// timer has been advanced.
pub fn try_spawn(state: &mut GameState) -> Option<u32> {
    if state.phase != GamePhase::Running {
        return None;
    }
    if state.spawn_timer < state.spawn_interval {
        return None;
    }
    state.spawn_timer = 0.0;

    let id = spawn_enemy(state);

    // Re-arm the gate for the current difficulty level
    let level = state.difficulty_level();
    let tuning = state.tuning;
    state.spawn_interval = (tuning.max_spawn_interval - level as f32 * tuning.spawn_rate_step)
        .clamp(tuning.min_spawn_interval, tuning.max_spawn_interval);

    // Swarm burst: at higher levels a spawn occasionally brings a second
    // enemy immediately. One extra at most, the burst never re-triggers.
    if level > SWARM_LEVEL && state.rng.random_bool(SWARM_CHANCE) {
        spawn_enemy(state);
    }

    Some(id)
}

fn spawn_enemy(state: &mut GameState) -> u32 {
    let tuning = state.tuning;
    let size = state
        .rng
        .random_range(tuning.enemy_size_min..=tuning.enemy_size_max);

    // Uniform x across the width, resampled with 70% probability when the
    // candidate lands within ANTI_CAMP_RADIUS of the player. Best-effort
    // anti-camping, not a hard constraint: 30% of close candidates pass.
    let player_x = state.player.center().x;
    let x = loop {
        let candidate = state.rng.random_range(0.0..state.viewport.x - size);
        let center = candidate + size / 2.0;
        if (center - player_x).abs() >= ANTI_CAMP_RADIUS
            || state.rng.random_bool(ANTI_CAMP_ACCEPT_CHANCE)
        {
            break candidate;
        }
    };

    // Base speed ramps with the difficulty level up to a hard cap, gets a
    // random variance on top, then a size multiplier: smaller is faster.
    let level = state.difficulty_level() as f32;
    let base = (tuning.base_enemy_speed + level * tuning.enemy_speed_increase)
        .min(tuning.enemy_speed_cap);
    let variance = state.rng.random_range(0.0..tuning.enemy_speed_variance);
    let multiplier = 1.0 + (tuning.enemy_size_max - size) * SIZE_SPEED_FACTOR;
    let speed = (base + variance) * multiplier;

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, -size),
        size,
        speed,
    });
    state.events.push(GameEvent::EnemySpawned(id));
    log::debug!("enemy {id} spawned: x={x:.0} size={size:.0} speed={speed:.2}");
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(42);
        state.start_session();
        state.drain_events();
        state
    }

    /// Force the gate open and spawn once
    fn force_spawn(state: &mut GameState) {
        state.spawn_timer = state.spawn_interval;
        try_spawn(state).expect("gate was forced open");
    }

    #[test]
    fn test_gate_blocks_until_interval_elapsed() {
        let mut state = running_state();
        state.spawn_timer = state.spawn_interval - 0.01;
        assert!(try_spawn(&mut state).is_none());
        assert!(state.enemies.is_empty());

        state.spawn_timer = state.spawn_interval;
        assert!(try_spawn(&mut state).is_some());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_no_spawns_outside_running_phase() {
        let mut state = GameState::new(42);
        state.spawn_timer = 100.0;
        assert!(try_spawn(&mut state).is_none());
    }

    #[test]
    fn test_interval_clamped_between_min_and_max() {
        let mut state = running_state();

        // Level 0: interval stays at the slow end
        force_spawn(&mut state);
        assert_eq!(state.spawn_interval, state.tuning.max_spawn_interval);

        // Very high level: interval bottoms out at the fast end
        state.score = 10_000;
        force_spawn(&mut state);
        assert_eq!(state.spawn_interval, state.tuning.min_spawn_interval);
    }

    #[test]
    fn test_spawn_position_and_size_in_range() {
        let mut state = running_state();
        for _ in 0..200 {
            force_spawn(&mut state);
        }
        for enemy in &state.enemies {
            assert!(enemy.size >= state.tuning.enemy_size_min);
            assert!(enemy.size <= state.tuning.enemy_size_max);
            assert!(enemy.pos.x >= 0.0);
            assert!(enemy.pos.x + enemy.size <= state.viewport.x);
            assert_eq!(enemy.pos.y, -enemy.size);
        }
    }

    #[test]
    fn test_anti_camp_thins_spawns_near_player() {
        let mut state = running_state();
        let player_x = state.player.center().x;
        let total = 500;
        for _ in 0..total {
            force_spawn(&mut state);
        }
        let near = state
            .enemies
            .iter()
            .filter(|e| (e.center().x - player_x).abs() < ANTI_CAMP_RADIUS)
            .count();
        // Unthinned, ~16% of uniform spawns would land in the 200px band
        // around the player; the 30% accept rule cuts that to ~6%.
        assert!(near < total / 8, "too many near spawns: {near}");
    }

    #[test]
    fn test_enemy_speed_bounded() {
        let mut state = running_state();
        state.score = 10_000; // Level far past the speed cap
        for _ in 0..100 {
            force_spawn(&mut state);
        }
        let tuning = state.tuning;
        let max_multiplier =
            1.0 + (tuning.enemy_size_max - tuning.enemy_size_min) * SIZE_SPEED_FACTOR;
        let bound = (tuning.enemy_speed_cap + tuning.enemy_speed_variance) * max_multiplier;
        for enemy in &state.enemies {
            assert!(enemy.speed <= bound, "speed {} over bound {bound}", enemy.speed);
        }
    }

    #[test]
    fn test_swarm_spawns_at_most_one_extra() {
        let mut state = running_state();
        state.score = 400; // Level 4, past the swarm threshold
        for _ in 0..100 {
            let before = state.enemies.len();
            force_spawn(&mut state);
            let spawned = state.enemies.len() - before;
            assert!((1..=2).contains(&spawned));
        }
        // With 30% burst chance, 100 gated spawns produce well over 100
        let total = state.enemies.len();
        assert!(total > 100, "swarm never triggered across {total} spawns");
    }

    #[test]
    fn test_no_swarm_at_low_levels() {
        let mut state = running_state();
        for _ in 0..100 {
            let before = state.enemies.len();
            force_spawn(&mut state);
            assert_eq!(state.enemies.len() - before, 1);
        }
    }
}
