//! Axis-separated sliding movement resolution.
//!
//! A blocked diagonal move is retried along each axis independently,
//! so a body pushed into a wall corner glides along whichever axis is
//! free instead of stopping dead. Cheaper than swept collision and
//! visually correct for box/circle-dominated level geometry; tunneling
//! through thin obstacles at high speed is accepted.

use crate::foundation::math::Vec2;

use super::world::{CollisionWorld, VolumeKey};

/// Result of a [`slide_move`] attempt
#[derive(Debug, Clone, Copy)]
pub struct SlideOutcome {
    /// Final confirmed position
    pub position: Vec2,

    /// The X component of the move was rejected; callers should zero
    /// their X velocity
    pub blocked_x: bool,

    /// The Y component of the move was rejected; callers should zero
    /// their Y velocity
    pub blocked_y: bool,
}

/// Resolve a desired displacement into a confirmed position
///
/// Tries the full move first; on overlap, retries the X component from
/// `origin` and then the Y component from whatever was confirmed. The
/// registered volume's stored position is left untouched; callers
/// commit the outcome via [`CollisionWorld::set_position`].
pub fn slide_move(
    world: &CollisionWorld,
    key: VolumeKey,
    origin: Vec2,
    delta: Vec2,
) -> SlideOutcome {
    let candidate = origin + delta;
    if !world.would_collide(key, candidate) {
        return SlideOutcome {
            position: candidate,
            blocked_x: false,
            blocked_y: false,
        };
    }

    let mut confirmed = origin;
    let mut blocked_x = false;
    let mut blocked_y = false;

    let x_only = Vec2::new(origin.x + delta.x, origin.y);
    if world.would_collide(key, x_only) {
        blocked_x = true;
    } else {
        confirmed = x_only;
    }

    let y_candidate = Vec2::new(confirmed.x, confirmed.y + delta.y);
    if world.would_collide(key, y_candidate) {
        blocked_y = true;
    } else {
        confirmed = y_candidate;
    }

    SlideOutcome {
        position: confirmed,
        blocked_x,
        blocked_y,
    }
}
