//! Star Defender - a single-screen arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance (desktop/touch profiles)
//!
//! Rendering, input capture, and screen transitions are the embedder's job:
//! feed a [`sim::TickInput`] into [`sim::tick`] once per frame and drain
//! [`sim::GameEvent`]s to keep visuals in sync with the entity records.

pub mod sim;
pub mod tuning;

pub use tuning::{ControlProfile, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default viewport dimensions in px (top-left origin, y down)
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;

    /// Player bounding box is a fixed square
    pub const PLAYER_SIZE: f32 = 48.0;
    /// The ship can't enter the spawn band at the top of the viewport
    pub const PLAYER_TOP_MARGIN: f32 = 100.0;
    /// Spawn point: bottom edge this far above the viewport bottom
    pub const PLAYER_SPAWN_BOTTOM_MARGIN: f32 = 80.0;

    /// Bullet bounding box
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_HEIGHT: f32 = 15.0;

    /// Points per destroyed enemy
    pub const KILL_REWARD: u32 = 10;
    /// Points lost per enemy reaching the bottom edge
    pub const ESCAPE_PENALTY: u32 = 10;
    /// Score per difficulty level
    pub const POINTS_PER_LEVEL: u32 = 100;

    /// Spawns this close to the player's column get resampled
    pub const ANTI_CAMP_RADIUS: f32 = 100.0;
    /// Probability a close spawn candidate is accepted anyway
    pub const ANTI_CAMP_ACCEPT_CHANCE: f64 = 0.3;
    /// Difficulty level above which swarm bursts can occur
    pub const SWARM_LEVEL: u32 = 2;
    /// Probability a gated spawn brings one extra enemy
    pub const SWARM_CHANCE: f64 = 0.3;
    /// Speed multiplier gained per px of size below the maximum
    pub const SIZE_SPEED_FACTOR: f32 = 0.02;

    /// Explosion effect lifetime in seconds
    pub const EXPLOSION_TTL: f32 = 0.5;
    /// Delay between a restart input and the actual reset
    pub const RESTART_DELAY: f32 = 0.1;
}
