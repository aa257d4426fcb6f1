//! Bullets
//!
//! Bullets integrate straight ahead with no sliding; at 1500 units per
//! second a frame covers well under a tile, so tunneling through walls
//! is not a practical concern. A bullet is destroyed by its lifetime
//! or by the first non-projectile thing it touches, and only deals
//! damage when that thing is an owned entity other than its shooter.

use arena_engine::prelude::{CollisionWorld, Countdown, Layer, OwnerId, Vec2, Volume, VolumeKey};
use log::debug;

use crate::config::BulletConfig;

use super::FireCommand;

/// What a bullet update produced this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BulletOutcome {
    /// Still in flight
    Flying,

    /// Lifetime ran out
    Expired,

    /// Struck a wall or an unowned volume; destroyed with no damage
    Blocked,

    /// Struck an entity; the caller routes the damage
    Hit {
        /// Owner of the struck volume
        target: OwnerId,
        /// Damage to apply
        damage: f32,
    },
}

/// A projectile in flight
pub struct Bullet {
    /// World position (collision circle center)
    pub position: Vec2,

    /// Velocity in units per second, fixed at spawn
    pub velocity: Vec2,

    /// Facing in radians, along the velocity
    pub rotation: f32,

    damage: f32,
    shooter: OwnerId,
    lifetime: Countdown,
    volume: VolumeKey,
}

impl Bullet {
    /// Spawn a bullet from a fire command, registering its collision
    /// volume
    pub fn spawn(
        cfg: &BulletConfig,
        command: &FireCommand,
        owner: OwnerId,
        world: &mut CollisionWorld,
    ) -> Self {
        let (sin, cos) = command.heading.sin_cos();
        let mut lifetime = Countdown::expired();
        lifetime.arm(cfg.lifetime);
        let volume = world.insert(
            Volume::circle(cfg.radius, Layer::Projectile)
                .at(command.position)
                .owned_by(owner),
        );
        Self {
            position: command.position,
            velocity: Vec2::new(cos, sin) * cfg.speed,
            rotation: command.heading,
            damage: cfg.damage,
            shooter: command.shooter,
            lifetime,
            volume,
        }
    }

    /// Advance one frame: integrate, then resolve the first contact
    pub fn update(&mut self, dt: f32, world: &mut CollisionWorld) -> BulletOutcome {
        self.lifetime.tick(dt);
        if self.lifetime.is_ready() {
            debug!("Bullet expired at {:?}", self.position);
            return BulletOutcome::Expired;
        }

        self.position += self.velocity * dt;
        world.set_position(self.volume, self.position);

        for key in world.overlapping(self.volume) {
            let Some(volume) = world.get(key) else {
                continue;
            };
            // Bullets pass through each other; anything else destroys
            // this one.
            if volume.layer == Layer::Projectile {
                continue;
            }
            if volume.layer == Layer::Entity {
                if let Some(target) = volume.owner {
                    // Contact with the shooter still stops the bullet,
                    // it just deals no damage.
                    if target != self.shooter {
                        debug!("Bullet hit {target:?}");
                        return BulletOutcome::Hit {
                            target,
                            damage: self.damage,
                        };
                    }
                }
            }
            return BulletOutcome::Blocked;
        }
        BulletOutcome::Flying
    }

    /// Remove the bullet's collision volume
    pub fn despawn(&mut self, world: &mut CollisionWorld) {
        world.remove(self.volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::config::GameConfig;

    const DT: f32 = 1.0 / 60.0;

    fn fired_at(position: Vec2, heading: f32, world: &mut CollisionWorld) -> Bullet {
        let command = FireCommand {
            position,
            heading,
            shooter: OwnerId(1),
        };
        Bullet::spawn(&GameConfig::default().bullet, &command, OwnerId(100), world)
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut world = CollisionWorld::new();
        let mut bullet = fired_at(Vec2::zeros(), 0.0, &mut world);

        let mut frames = 0;
        while bullet.update(DT, &mut world) == BulletOutcome::Flying {
            frames += 1;
            assert!(frames < 200, "bullet never expired");
        }
        // Default lifetime is 2 seconds.
        assert!((115..=121).contains(&frames));
    }

    #[test]
    fn test_wall_hit_blocks_without_damage() {
        let mut world = CollisionWorld::new();
        world.insert(Volume::rect(64.0, 400.0, Layer::Wall).at(Vec2::new(200.0, -200.0)));
        let mut bullet = fired_at(Vec2::zeros(), 0.0, &mut world);

        let mut outcome = BulletOutcome::Flying;
        for _ in 0..30 {
            outcome = bullet.update(DT, &mut world);
            if outcome != BulletOutcome::Flying {
                break;
            }
        }
        assert_eq!(outcome, BulletOutcome::Blocked);
    }

    #[test]
    fn test_entity_hit_routes_damage() {
        let mut world = CollisionWorld::new();
        let target_owner = OwnerId(2);
        world.insert(
            Volume::circle(30.0, Layer::Entity)
                .at(Vec2::new(400.0, 0.0))
                .owned_by(target_owner),
        );

        let mut bullet = fired_at(Vec2::zeros(), 0.0, &mut world);
        let mut outcome = BulletOutcome::Flying;
        for _ in 0..30 {
            outcome = bullet.update(DT, &mut world);
            if outcome != BulletOutcome::Flying {
                break;
            }
        }
        assert_eq!(
            outcome,
            BulletOutcome::Hit {
                target: target_owner,
                damage: 10.0
            }
        );
    }

    #[test]
    fn test_shooter_contact_stops_bullet_without_damage() {
        let mut world = CollisionWorld::new();
        // The shooter's own body overlaps the flight path from the
        // first step.
        world.insert(
            Volume::circle(30.0, Layer::Entity)
                .at(Vec2::new(20.0, 0.0))
                .owned_by(OwnerId(1)),
        );

        let mut bullet = fired_at(Vec2::zeros(), 0.0, &mut world);
        assert_eq!(bullet.update(DT, &mut world), BulletOutcome::Blocked);
    }

    #[test]
    fn test_projectiles_pass_through_each_other() {
        let mut world = CollisionWorld::new();
        world.insert(
            Volume::circle(8.0, Layer::Projectile)
                .at(Vec2::new(25.0, 0.0))
                .owned_by(OwnerId(3)),
        );

        let mut bullet = fired_at(Vec2::zeros(), 0.0, &mut world);
        assert_eq!(bullet.update(DT, &mut world), BulletOutcome::Flying);
    }

    #[test]
    fn test_velocity_follows_heading() {
        let mut world = CollisionWorld::new();
        let bullet = fired_at(Vec2::zeros(), std::f32::consts::FRAC_PI_2, &mut world);
        assert_relative_eq!(bullet.velocity.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(bullet.velocity.y, 1500.0, epsilon = 1e-3);
    }
}
