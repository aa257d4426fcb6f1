//! Game entities: player, enemies, bullets
//!
//! Each entity owns exactly one collision volume for its lifetime,
//! inserting it at spawn and removing it at despawn. Entities report
//! shots as [`FireCommand`] values; the game layer spawns the actual
//! bullets so it can enforce the live-bullet cap.

mod bullet;
mod enemy;
mod player;

pub use bullet::{Bullet, BulletOutcome};
pub use enemy::{Enemy, EnemyEvent};
pub use player::{Player, PlayerInput};

use arena_engine::prelude::{OwnerId, Vec2};

/// Gun muzzle offset from the entity position, in local space
/// (X forward, Y to the side), rotated by the entity's facing.
const MUZZLE_OFFSET_X: f32 = 65.0;
const MUZZLE_OFFSET_Y: f32 = 42.0;

/// A request to spawn a bullet
#[derive(Debug, Clone, Copy)]
pub struct FireCommand {
    /// World-space muzzle position
    pub position: Vec2,

    /// Bullet heading in radians
    pub heading: f32,

    /// Entity that fired; exempt from this bullet's damage
    pub shooter: OwnerId,
}

/// Build a fire command from an entity's position and facing
///
/// The muzzle offset is rotated by `facing`, then the heading is
/// recomputed from the muzzle point toward the target so shots
/// converge on the aim point rather than running parallel to it.
pub(crate) fn fire_from(position: Vec2, facing: f32, target: Vec2, shooter: OwnerId) -> FireCommand {
    let (sin, cos) = facing.sin_cos();
    let muzzle = position
        + Vec2::new(
            MUZZLE_OFFSET_X * cos - MUZZLE_OFFSET_Y * sin,
            MUZZLE_OFFSET_X * sin + MUZZLE_OFFSET_Y * cos,
        );
    let heading = (target.y - muzzle.y).atan2(target.x - muzzle.x);
    FireCommand {
        position: muzzle,
        heading,
        shooter,
    }
}

/// Accelerate along a unit direction, clamping speed to `max_speed`
pub(crate) fn accelerate(
    velocity: Vec2,
    direction: Vec2,
    acceleration: f32,
    max_speed: f32,
    dt: f32,
) -> Vec2 {
    let next = velocity + direction * acceleration * dt;
    let speed = next.magnitude();
    if speed > max_speed {
        next * (max_speed / speed)
    } else {
        next
    }
}

/// Reduce speed by `deceleration * dt`, stopping at zero without
/// reversing
pub(crate) fn decelerate(velocity: Vec2, deceleration: f32, dt: f32) -> Vec2 {
    let speed = velocity.magnitude();
    if speed <= f32::EPSILON {
        return Vec2::zeros();
    }
    let next_speed = (speed - deceleration * dt).max(0.0);
    velocity * (next_speed / speed)
}
