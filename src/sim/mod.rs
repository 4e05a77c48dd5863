//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Resolution, resolve};
pub use motion::{MotionOutcome, advance};
pub use spawn::try_spawn;
pub use state::{
    Bullet, Enemy, Explosion, GameEvent, GamePhase, GameState, Player,
};
pub use tick::{TickInput, tick};
