//! Enemy perception and decision making
//!
//! The decision layer is split from the enemy entity so it can be
//! tested without a world: [`next_mode`] is a pure function of what
//! the enemy currently perceives. Line-of-sight is the one query that
//! needs the collision world, and it only asks about walls.

use arena_engine::prelude::{CollisionWorld, Layer, Vec2, Volume};

/// Distance between consecutive line-of-sight samples
const SIGHT_STEP: f32 = 10.0;

/// Radius of the probe circle tested at each sample point
const SIGHT_PROBE_RADIUS: f32 = 5.0;

/// What an enemy is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    /// No target knowledge; hold position
    Idle,
    /// Lost sight but remembers a position; move to investigate
    Searching,
    /// Player visible or recently seen; fight
    Engaged,
}

/// One frame's worth of sensory input to the mode transition
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    /// Player is within detection range with clear line of sight
    pub can_see_player: bool,

    /// The alert timer from the last sighting (or hit) is still running
    pub alerted: bool,

    /// A last-known player position is stored
    pub has_last_known: bool,
}

/// Decide the mode for this frame from current perception
///
/// Sight or a running alert keeps the enemy engaged; a remembered
/// position without either means searching; nothing means idle.
pub fn next_mode(perception: Perception) -> AiMode {
    if perception.can_see_player || perception.alerted {
        AiMode::Engaged
    } else if perception.has_last_known {
        AiMode::Searching
    } else {
        AiMode::Idle
    }
}

/// Sampled line-of-sight test between two points
///
/// Walks the segment in [`SIGHT_STEP`] increments, probing a small
/// circle at each sample; any wall touched blocks sight. Entities and
/// projectiles never occlude. Coincident endpoints trivially see each
/// other.
pub fn has_line_of_sight(world: &CollisionWorld, from: Vec2, to: Vec2) -> bool {
    let span = to - from;
    let distance = span.magnitude();
    if distance <= f32::EPSILON {
        return true;
    }
    let direction = span / distance;

    let mut travelled = SIGHT_STEP;
    while travelled < distance {
        let sample = from + direction * travelled;
        let probe = Volume::circle(SIGHT_PROBE_RADIUS, Layer::Projectile).at(sample);
        let blocked = world
            .probe(&probe)
            .iter()
            .any(|&key| world.get(key).is_some_and(|v| v.layer == Layer::Wall));
        if blocked {
            return false;
        }
        travelled += SIGHT_STEP;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transition_table() {
        let mode = |can_see_player, alerted, has_last_known| {
            next_mode(Perception {
                can_see_player,
                alerted,
                has_last_known,
            })
        };

        assert_eq!(mode(false, false, false), AiMode::Idle);
        assert_eq!(mode(false, false, true), AiMode::Searching);
        assert_eq!(mode(false, true, false), AiMode::Engaged);
        assert_eq!(mode(false, true, true), AiMode::Engaged);
        assert_eq!(mode(true, false, false), AiMode::Engaged);
        assert_eq!(mode(true, true, true), AiMode::Engaged);
    }

    #[test]
    fn test_wall_blocks_sight() {
        let mut world = CollisionWorld::new();
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(400.0, 0.0);
        assert!(has_line_of_sight(&world, from, to));

        let wall = world.insert(Volume::rect(40.0, 200.0, Layer::Wall).at(Vec2::new(180.0, -100.0)));
        assert!(!has_line_of_sight(&world, from, to));
        assert!(!has_line_of_sight(&world, to, from));

        world.remove(wall);
        assert!(has_line_of_sight(&world, from, to));
    }

    #[test]
    fn test_entities_do_not_occlude() {
        let mut world = CollisionWorld::new();
        world.insert(Volume::circle(30.0, Layer::Entity).at(Vec2::new(200.0, 0.0)));
        world.insert(Volume::circle(8.0, Layer::Projectile).at(Vec2::new(100.0, 0.0)));
        assert!(has_line_of_sight(
            &world,
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 0.0)
        ));
    }

    #[test]
    fn test_adjacent_points_see_each_other() {
        let world = CollisionWorld::new();
        let p = Vec2::new(50.0, 50.0);
        assert!(has_line_of_sight(&world, p, p));
        assert!(has_line_of_sight(&world, p, p + Vec2::new(3.0, 0.0)));
    }
}
