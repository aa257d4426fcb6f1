//! The frame-stepped game orchestrator
//!
//! `Game` owns the collision world, the level, and every entity, and
//! advances them in a fixed order each frame: player, enemies, bullet
//! spawning, bullets, then damage routing and despawns. Volume owner
//! ids are allocated here and decoded back to entities through the
//! owner table when a bullet reports a hit.

use std::collections::HashMap;

use arena_engine::prelude::{CollisionWorld, Layer, OwnerId, Vec2, Volume};
use log::{debug, info};
use slotmap::SlotMap;

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOutcome, Enemy, FireCommand, Player, PlayerInput};
use crate::level::Level;

slotmap::new_key_type! {
    /// Handle to a live enemy
    pub struct EnemyKey;

    /// Handle to a live bullet
    pub struct BulletKey;
}

/// What an owner id resolves to
#[derive(Debug, Clone, Copy)]
enum Owner {
    Player,
    Enemy(EnemyKey),
    Bullet(BulletKey),
}

/// The whole simulation for one arena session
pub struct Game {
    world: CollisionWorld,
    level: Level,
    config: GameConfig,
    player: Player,
    enemies: SlotMap<EnemyKey, Enemy>,
    bullets: SlotMap<BulletKey, Bullet>,
    owners: HashMap<OwnerId, Owner>,
    next_owner: u64,
}

impl Game {
    /// Build the level and spawn the player
    pub fn new(config: GameConfig) -> Self {
        let mut world = CollisionWorld::new();
        let level = Level::build(&config.arena, &mut world);

        let player_owner = OwnerId(0);
        let player = Player::spawn(&config.player, player_owner, &mut world);
        let mut owners = HashMap::new();
        owners.insert(player_owner, Owner::Player);

        Self {
            world,
            level,
            config,
            player,
            enemies: SlotMap::with_key(),
            bullets: SlotMap::with_key(),
            owners,
            next_owner: 1,
        }
    }

    fn alloc_owner(&mut self) -> OwnerId {
        let id = OwnerId(self.next_owner);
        self.next_owner += 1;
        id
    }

    /// Spawn an enemy at `position`
    pub fn spawn_enemy(&mut self, position: Vec2) -> EnemyKey {
        let owner = self.alloc_owner();
        let enemy = Enemy::spawn(&self.config.enemy, owner, position, &mut self.world);
        let key = self.enemies.insert(enemy);
        self.owners.insert(owner, Owner::Enemy(key));
        debug!("Spawned enemy at {position:?}");
        key
    }

    fn spawn_bullet(&mut self, command: &FireCommand) {
        if self.bullets.len() >= self.config.bullet.max_live {
            debug!("Bullet cap reached, dropping shot");
            return;
        }
        let owner = self.alloc_owner();
        let bullet = Bullet::spawn(&self.config.bullet, command, owner, &mut self.world);
        let key = self.bullets.insert(bullet);
        self.owners.insert(owner, Owner::Bullet(key));
    }

    /// Advance the whole simulation by `dt` seconds
    pub fn update(&mut self, dt: f32, input: &PlayerInput) {
        let mut shots: Vec<FireCommand> = Vec::new();

        if let Some(shot) = self.player.update(dt, input, &mut self.world) {
            shots.push(shot);
        }

        let target = if self.player.is_alive() {
            Some(&self.player)
        } else {
            None
        };
        let mut dead_enemies = Vec::new();
        for (key, enemy) in &mut self.enemies {
            let event = enemy.update(dt, target, &mut self.world);
            if let Some(shot) = event.fire {
                shots.push(shot);
            }
            if event.died {
                dead_enemies.push(key);
            }
        }

        for shot in &shots {
            self.spawn_bullet(shot);
        }

        let mut spent_bullets = Vec::new();
        let mut hits: Vec<(OwnerId, f32)> = Vec::new();
        for (key, bullet) in &mut self.bullets {
            match bullet.update(dt, &mut self.world) {
                BulletOutcome::Flying => {}
                BulletOutcome::Expired | BulletOutcome::Blocked => spent_bullets.push(key),
                BulletOutcome::Hit { target, damage } => {
                    spent_bullets.push(key);
                    hits.push((target, damage));
                }
            }
        }

        let player_was_alive = self.player.is_alive();
        let player_position = self.player.position;
        for (target, damage) in hits {
            match self.owners.get(&target) {
                Some(Owner::Player) => self.player.take_damage(damage),
                Some(Owner::Enemy(key)) => {
                    if let Some(enemy) = self.enemies.get_mut(*key) {
                        let revealed = player_was_alive.then_some(player_position);
                        enemy.take_damage(damage, revealed);
                    }
                }
                // Bullets have no health; stale ids are ignored.
                Some(Owner::Bullet(_)) | None => {}
            }
        }
        if player_was_alive && !self.player.is_alive() {
            info!("Player eliminated");
            self.player.despawn(&mut self.world);
        }

        for key in spent_bullets {
            if let Some(mut bullet) = self.bullets.remove(key) {
                bullet.despawn(&mut self.world);
            }
        }
        for key in dead_enemies {
            if let Some(mut enemy) = self.enemies.remove(key) {
                enemy.despawn(&mut self.world);
                info!("Enemy down, {} remaining", self.enemies.len());
            }
        }
        self.owners.retain(|_, owner| match owner {
            Owner::Player => true,
            Owner::Enemy(key) => self.enemies.contains_key(*key),
            Owner::Bullet(key) => self.bullets.contains_key(*key),
        });
    }

    /// True if nothing solid occupies a circle at `position`
    ///
    /// Used to pick clear spawn points.
    pub fn is_clear(&self, position: Vec2, radius: f32) -> bool {
        if !self.level.in_bounds(position) {
            return false;
        }
        let probe = Volume::circle(radius, Layer::Entity).at(position);
        self.world.probe(&probe).is_empty()
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Live enemies
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    /// Number of live enemies
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Number of bullets in flight
    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    /// The static level
    pub fn level(&self) -> &Level {
        &self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_enemy_shoots_the_player() {
        let mut game = Game::new(GameConfig::default());
        // In range, in sight, to the right of the spawn point.
        game.spawn_enemy(Vec2::new(1310.0, 300.0));

        let input = PlayerInput::default();
        let mut damaged_at = None;
        for frame in 0..120 {
            game.update(DT, &input);
            if game.player().health < 100.0 {
                damaged_at = Some(frame);
                break;
            }
        }
        let frame = damaged_at.expect("enemy never landed a hit");
        // One shot at 1500 u/s over ~300 units lands within a second.
        assert!(frame < 60);
        assert_eq!(game.player().health, 90.0);
    }

    #[test]
    fn test_player_shot_kills_enemy() {
        let mut game = Game::new(GameConfig::default());
        let enemy_pos = Vec2::new(1310.0, 300.0);
        game.spawn_enemy(enemy_pos);

        let input = PlayerInput {
            aim: enemy_pos,
            fire: true,
            ..Default::default()
        };
        // 100 health at 10 damage per hit takes ten shots.
        for _ in 0..1200 {
            game.update(DT, &input);
            if game.enemy_count() == 0 {
                break;
            }
        }
        assert_eq!(game.enemy_count(), 0);
    }

    #[test]
    fn test_bullet_cap_limits_spawns() {
        let mut config = GameConfig::default();
        config.bullet.max_live = 2;
        config.player.fire_cooldown = 0.0;
        let mut game = Game::new(config);

        let input = PlayerInput {
            aim: Vec2::new(960.0, 960.0),
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            game.update(DT, &input);
            assert!(game.bullet_count() <= 2);
        }
    }

    #[test]
    fn test_clear_spot_detection() {
        let game = Game::new(GameConfig::default());
        let size = game.level().size();
        // The center obstacle is occupied, the border is out of
        // bounds, and a mid-lane point is clear.
        assert!(!game.is_clear(size / 2.0, 30.0));
        assert!(!game.is_clear(Vec2::new(10.0, 10.0), 30.0));
        assert!(game.is_clear(Vec2::new(size.x / 2.0, 150.0), 30.0));
    }
}
