//! Collision detection and resolution
//!
//! Axis-aligned bounding-box tests over the authoritative position/size
//! fields in the entity records. Two independent passes per tick: bullets
//! against enemies, then the player against whatever enemies survived.

use glam::Vec2;

use super::state::GameState;

/// Axis-aligned bounding box: top-left corner plus size, y down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict-inequality overlap test: boxes that merely share an edge
    /// do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// What one resolver pass did to the session
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Net score change from this pass (kill rewards only)
    pub score_delta: i32,
    pub bullets_removed: u32,
    pub enemies_removed: u32,
    /// Player was struck; the session has already transitioned to GameOver
    pub game_ended: bool,
}

/// Run one collision pass over the session.
///
/// Pass 1: each bullet, in index order, is tested against each live enemy
/// in index order. The first overlap wins: both entities are removed, an
/// explosion spawns at the enemy's position, and the kill is scored. A
/// bullet destroys at most one enemy per tick.
///
/// Pass 2 runs after pass 1's removals, so an enemy destroyed by a bullet
/// can never also strike the player in the same tick. Any player overlap
/// ends the session immediately.
pub fn resolve(state: &mut GameState) -> Resolution {
    let mut resolution = Resolution::default();

    // Pair up hits first, then apply removals, so each bullet/enemy pair
    // is removed at most once even when several bullets overlap one enemy.
    let mut hits: Vec<(u32, u32, Vec2)> = Vec::new();
    let mut claimed: Vec<u32> = Vec::new();
    for bullet in &state.bullets {
        let bullet_box = bullet.aabb();
        for enemy in &state.enemies {
            if claimed.contains(&enemy.id) {
                continue;
            }
            if bullet_box.overlaps(&enemy.aabb()) {
                hits.push((bullet.id, enemy.id, enemy.pos));
                claimed.push(enemy.id);
                break;
            }
        }
    }

    for (bullet_id, enemy_id, enemy_pos) in hits {
        state.remove_bullet(bullet_id);
        state.remove_enemy(enemy_id);
        state.spawn_explosion(enemy_pos);
        state.award_kill();
        resolution.score_delta += crate::consts::KILL_REWARD as i32;
        resolution.bullets_removed += 1;
        resolution.enemies_removed += 1;
    }

    let player_box = state.player.aabb();
    if state.enemies.iter().any(|e| player_box.overlaps(&e.aabb())) {
        state.end_session();
        resolution.game_ended = true;
    }

    resolution
}
