//! Enemy combatants
//!
//! Each enemy runs a perceive/decide/act loop every frame: sense the
//! player (range check plus sampled line of sight), pick a mode with
//! the pure transition function in [`crate::ai`], then steer and shoot
//! according to the mode. Alert memory keeps an enemy engaged for a
//! few seconds after losing sight; a remembered position turns into a
//! search destination once the alert lapses.

use arena_engine::prelude::{
    slide_move, CollisionWorld, Countdown, Layer, OwnerId, Vec2, Volume, VolumeKey,
};
use log::debug;

use crate::ai::{has_line_of_sight, next_mode, AiMode, Perception};
use crate::config::EnemyConfig;

use super::{accelerate, decelerate, fire_from, FireCommand, Player};

/// What an enemy update produced this frame
#[derive(Debug, Default)]
pub struct EnemyEvent {
    /// Shot fired this frame, if any
    pub fire: Option<FireCommand>,

    /// The enemy's health ran out; the caller should despawn it
    pub died: bool,
}

/// An AI-driven combatant
pub struct Enemy {
    /// World position (collision circle center)
    pub position: Vec2,

    /// Current velocity in units per second
    pub velocity: Vec2,

    /// Facing in radians
    pub rotation: f32,

    /// Current health
    pub health: f32,

    cfg: EnemyConfig,
    owner: OwnerId,
    volume: VolumeKey,
    dying: bool,

    // AI memory
    mode: AiMode,
    last_known: Option<Vec2>,
    alert: Countdown,
    shot_cooldown: Countdown,
}

impl Enemy {
    /// Spawn an enemy at `position`, registering its collision volume
    pub fn spawn(
        cfg: &EnemyConfig,
        owner: OwnerId,
        position: Vec2,
        world: &mut CollisionWorld,
    ) -> Self {
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
            volume,
            dying: false,
            mode: AiMode::Idle,
            last_known: None,
            alert: Countdown::expired(),
            shot_cooldown: Countdown::expired(),
        }
    }

    /// Advance one frame of the perceive/decide/act loop
    ///
    /// `player` is `None` when there is no live target, which
    /// short-circuits perception and leaves the enemy idle.
    pub fn update(
        &mut self,
        dt: f32,
        player: Option<&Player>,
        world: &mut CollisionWorld,
    ) -> EnemyEvent {
        if self.dying {
            return EnemyEvent {
                fire: None,
                died: true,
            };
        }

        self.alert.tick(dt);
        self.shot_cooldown.tick(dt);

        let fire = match player {
            Some(player) => self.step_ai(dt, player, world),
            None => {
                self.mode = AiMode::Idle;
                self.velocity = decelerate(self.velocity, self.cfg.deceleration, dt);
                None
            }
        };

        let outcome = slide_move(world, self.volume, self.position, self.velocity * dt);
        if outcome.blocked_x {
            self.velocity.x = 0.0;
        }
        if outcome.blocked_y {
            self.velocity.y = 0.0;
        }
        self.position = outcome.position;
        world.set_position(self.volume, self.position);

        EnemyEvent { fire, died: false }
    }

    fn step_ai(&mut self, dt: f32, player: &Player, world: &CollisionWorld) -> Option<FireCommand> {
        let to_player = player.position - self.position;
        let distance = to_player.magnitude();
        let can_see = distance <= self.cfg.detection_range
            && has_line_of_sight(world, self.position, player.position);

        self.mode = next_mode(Perception {
            can_see_player: can_see,
            alerted: self.alert.running(),
            has_last_known: self.last_known.is_some(),
        });

        match self.mode {
            AiMode::Engaged => self.engage(dt, player, can_see, distance, to_player),
            AiMode::Searching => {
                self.search(dt);
                None
            }
            AiMode::Idle => {
                self.velocity = decelerate(self.velocity, self.cfg.deceleration, dt);
                None
            }
        }
    }

    /// Fight: hold the standoff distance and shoot when possible
    fn engage(
        &mut self,
        dt: f32,
        player: &Player,
        can_see: bool,
        distance: f32,
        to_player: Vec2,
    ) -> Option<FireCommand> {
        if can_see {
            self.last_known = Some(player.position);
            self.alert.arm(self.cfg.alert_duration);
            self.rotation = to_player.y.atan2(to_player.x);
        } else if let Some(remembered) = self.last_known {
            // Still alerted but sight is lost: face where the player
            // was last seen.
            let bearing = remembered - self.position;
            if bearing.magnitude() > f32::EPSILON {
                self.rotation = bearing.y.atan2(bearing.x);
            }
        }

        // Hold position at the preferred distance, backing off when
        // the player pushes inside it.
        let range_error = distance - self.cfg.preferred_distance;
        if range_error.abs() > self.cfg.distance_margin && distance > f32::EPSILON {
            let direction = to_player / distance * range_error.signum();
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

        if can_see && distance <= self.cfg.shoot_range && self.shot_cooldown.is_ready() {
            self.shot_cooldown.arm(self.cfg.shoot_cooldown);
            return Some(fire_from(
                self.position,
                self.rotation,
                player.position,
                self.owner,
            ));
        }
        None
    }

    /// Investigate: move to the last-known position, forget it on
    /// arrival
    fn search(&mut self, dt: f32) {
        let Some(target) = self.last_known else {
            self.velocity = decelerate(self.velocity, self.cfg.deceleration, dt);
            return;
        };

        let to_target = target - self.position;
        let distance = to_target.magnitude();
        if distance <= self.cfg.arrival_threshold {
            debug!("Enemy reached last-known position, going idle");
            self.last_known = None;
            self.velocity = decelerate(self.velocity, self.cfg.deceleration, dt);
            return;
        }

        let direction = to_target / distance;
        self.rotation = direction.y.atan2(direction.x);
        self.velocity = accelerate(
            self.velocity,
            direction,
            self.cfg.acceleration,
            self.cfg.max_speed,
            dt,
        );
    }

    /// Apply damage and refresh target memory
    ///
    /// Getting hit reveals the player regardless of obstructions, so
    /// the last-known position and alert are refreshed even without
    /// line of sight.
    pub fn take_damage(&mut self, amount: f32, player_position: Option<Vec2>) {
        if self.dying {
            return;
        }
        self.health -= amount;
        if let Some(position) = player_position {
            self.last_known = Some(position);
            self.alert.arm(self.cfg.alert_duration);
        }
        if self.health <= 0.0 {
            debug!("Enemy died");
            self.dying = true;
        }
    }

    /// True until health runs out
    pub fn is_alive(&self) -> bool {
        !self.dying
    }

    /// Mode chosen by the most recent update
    pub fn mode(&self) -> AiMode {
        self.mode
    }

    /// Remove the enemy's collision volume
    pub fn despawn(&mut self, world: &mut CollisionWorld) {
        world.remove(self.volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn setup(enemy_pos: Vec2) -> (CollisionWorld, Player, Enemy) {
        let config = GameConfig::default();
        let mut world = CollisionWorld::new();
        let player = Player::spawn(&config.player, OwnerId(0), &mut world);
        let enemy = Enemy::spawn(&config.enemy, OwnerId(1), enemy_pos, &mut world);
        (world, player, enemy)
    }

    #[test]
    fn test_out_of_range_enemy_stays_idle() {
        // Player spawns at (960, 300); 700 units is past detection.
        let (mut world, player, mut enemy) = setup(Vec2::new(1660.0, 300.0));
        let start = enemy.position;

        for _ in 0..30 {
            enemy.update(DT, Some(&player), &mut world);
        }
        assert_relative_eq!(enemy.position.x, start.x);
        assert_relative_eq!(enemy.velocity.magnitude(), 0.0);
    }

    #[test]
    fn test_visible_player_engages_and_faces() {
        // Directly left of the player, well inside detection range.
        let (mut world, player, mut enemy) = setup(Vec2::new(660.0, 300.0));

        let event = enemy.update(DT, Some(&player), &mut world);
        // Facing the player means pointing along +X.
        assert_relative_eq!(enemy.rotation, 0.0, epsilon = 1e-5);
        // 300 units away with a 400 standoff: fires immediately.
        assert!(event.fire.is_some());

        // Cooldown holds the next shot.
        let event = enemy.update(DT, Some(&player), &mut world);
        assert!(event.fire.is_none());
    }

    #[test]
    fn test_holds_standoff_distance() {
        // 300 away but preferring 400: the enemy should back off.
        let (mut world, player, mut enemy) = setup(Vec2::new(660.0, 300.0));

        for _ in 0..30 {
            enemy.update(DT, Some(&player), &mut world);
        }
        assert!(enemy.position.x < 660.0);
    }

    #[test]
    fn test_alert_persists_exactly_alert_duration() {
        let (mut world, player, mut enemy) = setup(Vec2::new(1660.0, 300.0));
        // A wall between the two keeps sight blocked for the whole
        // test, so only the alert timer can hold the engagement.
        world.insert(Volume::rect(40.0, 600.0, Layer::Wall).at(Vec2::new(1500.0, 0.0)));

        // A hit reveals the player despite the wall.
        enemy.take_damage(10.0, Some(player.position));
        assert_relative_eq!(enemy.health, 90.0);

        // Engaged while alerted, facing the remembered position.
        enemy.update(DT, Some(&player), &mut world);
        assert_eq!(enemy.mode(), AiMode::Engaged);
        assert_relative_eq!(enemy.rotation, std::f32::consts::PI, epsilon = 1e-4);

        // Still engaged one frame before the 3-second alert lapses.
        for _ in 0..178 {
            enemy.update(DT, Some(&player), &mut world);
        }
        assert_eq!(enemy.mode(), AiMode::Engaged);

        // The next frame tips the timer over: searching the stored
        // position, not re-engaging.
        enemy.update(DT, Some(&player), &mut world);
        assert_eq!(enemy.mode(), AiMode::Searching);
    }

    #[test]
    fn test_no_target_means_idle() {
        let (mut world, _player, mut enemy) = setup(Vec2::new(660.0, 300.0));
        enemy.velocity = Vec2::new(100.0, 0.0);

        for _ in 0..60 {
            let event = enemy.update(DT, None, &mut world);
            assert!(event.fire.is_none());
        }
        assert_relative_eq!(enemy.velocity.magnitude(), 0.0);
    }

    #[test]
    fn test_lethal_damage_reports_death_once_per_frame() {
        let (mut world, player, mut enemy) = setup(Vec2::new(660.0, 300.0));
        enemy.take_damage(100.0, Some(player.position));
        assert!(!enemy.is_alive());

        let event = enemy.update(DT, Some(&player), &mut world);
        assert!(event.died);
        assert!(event.fire.is_none());

        enemy.despawn(&mut world);
        assert!(world.get(enemy.volume).is_none());
    }
}
