//! Game state and core simulation types
//!
//! All session state lives here. The state is deterministic and serializable:
//! two states built from the same seed and fed the same inputs stay identical.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running, waiting for start input
    Idle,
    /// Active gameplay
    Running,
    /// Session ended, entities frozen, waiting for restart
    GameOver,
}

/// The player's ship. Never destroyed mid-session; reset to the spawn
/// point on every session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (y increases downward)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Player at the spawn point: horizontally centered, bottom edge
    /// `PLAYER_SPAWN_BOTTOM_MARGIN` above the viewport bottom.
    pub fn at_spawn(viewport: Vec2) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: Vec2::new(
                (viewport.x - size.x) / 2.0,
                viewport.y - PLAYER_SPAWN_BOTTOM_MARGIN - size.y,
            ),
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A bullet entity, moving straight up at a fixed per-tick step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward step in px per tick, taken from the tuning profile at fire time
    pub speed: f32,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// An enemy entity, descending at its own per-instance speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Side length of the square bounding box
    pub size: f32,
    /// Downward step in px per tick
    pub speed: f32,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// A transient explosion effect. Gameplay-inert; exists so the render
/// layer can show the hit, then expires after `EXPLOSION_TTL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    /// Seconds remaining before expiry
    pub ttl: f32,
}

/// Boundary-crossing notifications for the render/UI layer.
///
/// Every entity creation or removal emits exactly one event from the same
/// function that mutates the collection, so a visual handle can never
/// outlive its record or vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    ScoreChanged(u32),
    BulletSpawned(u32),
    BulletRemoved(u32),
    EnemySpawned(u32),
    EnemyRemoved(u32),
    ExplosionSpawned { id: u32, pos: Vec2 },
    ExplosionExpired(u32),
    SessionEnded { final_score: u32 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG, advanced only by the spawner
    pub rng: Pcg32,
    /// Viewport size in px (top-left origin, y down)
    pub viewport: Vec2,
    /// Balance values for the active control profile
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score, clamped at zero
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    /// Seconds since the last enemy spawn
    pub spawn_timer: f32,
    /// Current spawn gate, recomputed on each spawn from the difficulty level
    pub spawn_interval: f32,
    /// Seconds until the next auto-fire shot is allowed
    pub fire_cooldown: f32,
    /// Pending restart countdown while in GameOver (None = not armed)
    pub restart_delay: Option<f32>,
    /// Pending notifications, drained by the embedder each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new idle state with the given seed and desktop tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(
            seed,
            Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            Tuning::default(),
        )
    }

    /// Create a new idle state with an explicit viewport and tuning profile
    pub fn with_tuning(seed: u64, viewport: Vec2, tuning: Tuning) -> Self {
        let spawn_interval = tuning.max_spawn_interval;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            player: Player::at_spawn(viewport),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval,
            fire_cooldown: 0.0,
            restart_delay: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Difficulty level: one level per `POINTS_PER_LEVEL` points
    pub fn difficulty_level(&self) -> u32 {
        self.score / POINTS_PER_LEVEL
    }

    /// Full session reset: tear down all entities (with removal events),
    /// zero the score and timers, respawn the player, enter Running.
    pub fn start_session(&mut self) {
        for bullet in self.bullets.drain(..) {
            self.events.push(GameEvent::BulletRemoved(bullet.id));
        }
        for enemy in self.enemies.drain(..) {
            self.events.push(GameEvent::EnemyRemoved(enemy.id));
        }
        for explosion in self.explosions.drain(..) {
            self.events.push(GameEvent::ExplosionExpired(explosion.id));
        }

        self.score = 0;
        self.time_ticks = 0;
        self.spawn_timer = 0.0;
        self.spawn_interval = self.tuning.max_spawn_interval;
        self.fire_cooldown = 0.0;
        self.restart_delay = None;
        self.player = Player::at_spawn(self.viewport);

        self.events.push(GameEvent::ScoreChanged(0));
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::PhaseChanged(GamePhase::Running));
        log::info!("session started (seed {})", self.seed);
    }

    /// End the running session. Idempotent: a second trigger in the same
    /// tick (escape penalty plus player collision) is a no-op.
    pub fn end_session(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::PhaseChanged(GamePhase::GameOver));
        self.events.push(GameEvent::SessionEnded {
            final_score: self.score,
        });
        log::info!(
            "game over: score {} after {} ticks",
            self.score,
            self.time_ticks
        );
    }

    /// Fire a bullet from the player's center
    pub fn spawn_bullet(&mut self) {
        let id = self.next_entity_id();
        let size = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
        let pos = self.player.center() - size / 2.0;
        let speed = self.tuning.bullet_step;
        self.bullets.push(Bullet {
            id,
            pos,
            size,
            speed,
        });
        self.events.push(GameEvent::BulletSpawned(id));
    }

    /// Spawn an explosion effect at the given position
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.explosions.push(Explosion {
            id,
            pos,
            ttl: EXPLOSION_TTL,
        });
        self.events.push(GameEvent::ExplosionSpawned { id, pos });
    }

    /// Remove a bullet by ID. No-op when the ID is already gone.
    pub fn remove_bullet(&mut self, id: u32) {
        let before = self.bullets.len();
        self.bullets.retain(|b| b.id != id);
        if self.bullets.len() != before {
            self.events.push(GameEvent::BulletRemoved(id));
        }
    }

    /// Remove an enemy by ID. No-op when the ID is already gone.
    pub fn remove_enemy(&mut self, id: u32) {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id != id);
        if self.enemies.len() != before {
            self.events.push(GameEvent::EnemyRemoved(id));
        }
    }

    /// Award points for a destroyed enemy
    pub fn award_kill(&mut self) {
        self.score += KILL_REWARD;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Apply the escape penalty for an enemy that reached the bottom edge.
    /// The score is clamped at zero; landing on zero ends the session.
    /// A fresh session at zero is fine, the check only runs on penalty.
    pub fn apply_escape_penalty(&mut self) {
        self.score = self.score.saturating_sub(ESCAPE_PENALTY);
        self.events.push(GameEvent::ScoreChanged(self.score));
        if self.score == 0 {
            self.end_session();
        }
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_session_tears_down_entities() {
        let mut state = GameState::new(7);
        state.start_session();
        state.spawn_bullet();
        let enemy_id = state.next_entity_id();
        state.enemies.push(Enemy {
            id: enemy_id,
            pos: Vec2::new(100.0, 100.0),
            size: 40.0,
            speed: 2.0,
        });
        state.score = 50;
        state.drain_events();

        state.start_session();
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EnemyRemoved(enemy_id)));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Running)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut state = GameState::new(7);
        state.start_session();
        state.spawn_bullet();
        let id = state.bullets[0].id;
        state.drain_events();

        state.remove_bullet(id);
        state.remove_bullet(id);
        assert!(state.bullets.is_empty());

        let removals = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::BulletRemoved(_)))
            .count();
        assert_eq!(removals, 1);
    }

    #[test]
    fn test_escape_penalty_clamps_and_ends() {
        let mut state = GameState::new(7);
        state.start_session();
        state.score = 10;
        state.apply_escape_penalty();
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Further penalties stay clamped and don't re-end the session
        state.drain_events();
        state.apply_escape_penalty();
        assert_eq!(state.score, 0);
        assert!(
            !state
                .drain_events()
                .contains(&GameEvent::PhaseChanged(GamePhase::GameOver))
        );
    }

    #[test]
    fn test_state_snapshot_round_trip() {
        let mut state = GameState::new(123);
        state.start_session();
        state.spawn_bullet();
        state.score = 40;

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, state.seed);
        assert_eq!(back.score, state.score);
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.rng, state.rng);
        assert_eq!(back.bullets.len(), 1);
        assert_eq!(back.bullets[0].pos, state.bullets[0].pos);
    }

    #[test]
    fn test_player_spawn_centered() {
        let state = GameState::new(7);
        let center = state.player.center();
        assert!((center.x - state.viewport.x / 2.0).abs() < 0.001);
        assert!(
            (state.player.pos.y + PLAYER_SIZE - (state.viewport.y - PLAYER_SPAWN_BOTTOM_MARGIN))
                .abs()
                < 0.001
        );
    }
}
