//! The player entity

use arena_engine::prelude::{
    slide_move, CollisionWorld, Countdown, Layer, OwnerId, Vec2, Volume, VolumeKey,
};
use log::info;

use crate::config::PlayerConfig;

use super::{accelerate, decelerate, fire_from, FireCommand};

/// One frame of player input, already decoded from whatever device
/// produced it
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Desired movement direction; normalized internally, zero means
    /// no input
    pub move_dir: Vec2,

    /// World-space point the player is aiming at
    pub aim: Vec2,

    /// Fire button held this frame
    pub fire: bool,
}

/// The player-controlled combatant
pub struct Player {
    /// World position (collision circle center)
    pub position: Vec2,

    /// Current velocity in units per second
    pub velocity: Vec2,

    /// Facing in radians, toward the aim point
    pub rotation: f32,

    /// Current health
    pub health: f32,

    cfg: PlayerConfig,
    owner: OwnerId,
    fire_cooldown: Countdown,
    volume: VolumeKey,
    alive: bool,
}

impl Player {
    /// Spawn the player at the configured position, registering its
    /// collision volume
    pub fn spawn(cfg: &PlayerConfig, owner: OwnerId, world: &mut CollisionWorld) -> Self {
        let position = Vec2::new(cfg.spawn_x, cfg.spawn_y);
        let volume = world.insert(
            Volume::circle(cfg.radius, Layer::Entity)
                .at(position)
                .owned_by(owner),
        );
        Self {
            position,
            velocity: Vec2::zeros(),
            rotation: 0.0,
            health: cfg.max_health,
            cfg: cfg.clone(),
            owner,
            fire_cooldown: Countdown::expired(),
            volume,
            alive: true,
        }
    }

    /// Advance one frame: apply input, resolve movement, maybe fire
    pub fn update(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        world: &mut CollisionWorld,
    ) -> Option<FireCommand> {
        if !self.alive {
            return None;
        }

        self.fire_cooldown.tick(dt);

        let input_magnitude = input.move_dir.magnitude();
        if input_magnitude > f32::EPSILON {
            let direction = input.move_dir / input_magnitude;
            self.velocity = accelerate(
                self.velocity,
                direction,
                self.cfg.acceleration,
                self.cfg.max_speed,
                dt,
            );
        } else {
            self.velocity = decelerate(self.velocity, self.cfg.deceleration, dt);
        }

        let outcome = slide_move(world, self.volume, self.position, self.velocity * dt);
        if outcome.blocked_x {
            self.velocity.x = 0.0;
        }
        if outcome.blocked_y {
            self.velocity.y = 0.0;
        }
        self.position = outcome.position;
        world.set_position(self.volume, self.position);

        let to_aim = input.aim - self.position;
        if to_aim.magnitude() > f32::EPSILON {
            self.rotation = to_aim.y.atan2(to_aim.x);
        }

        if input.fire && self.fire_cooldown.is_ready() {
            self.fire_cooldown.arm(self.cfg.fire_cooldown);
            return Some(fire_from(self.position, self.rotation, input.aim, self.owner));
        }
        None
    }

    /// Apply damage, clamping health at zero
    pub fn take_damage(&mut self, amount: f32) {
        if !self.alive {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            info!("Player died");
        }
    }

    /// Restore health, clamping at the configured maximum
    pub fn heal(&mut self, amount: f32) {
        if self.alive {
            self.health = (self.health + amount).min(self.cfg.max_health);
        }
    }

    /// True while health remains
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Remove the player's collision volume
    pub fn despawn(&mut self, world: &mut CollisionWorld) {
        world.remove(self.volume);
    }
}
