//! Headless arena demo
//!
//! Runs the simulation for a few seconds of scripted play with no
//! window: spawns enemies at random clear spots, drives the player in
//! a loop around the central obstacle, and logs a summary. Useful for
//! profiling and for eyeballing AI behavior through the debug log.

mod ai;
mod config;
mod entities;
mod game;
mod level;

use std::time::Instant;

use arena_engine::foundation::logging;
use arena_engine::prelude::Vec2;
use log::{info, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::PlayerInput;
use crate::game::Game;

const ENEMY_COUNT: usize = 3;
const FRAMES: u32 = 600;
const DT: f32 = 1.0 / 60.0;

fn main() {
    logging::init();

    let config = GameConfig::load_or_default("arena.toml");
    let enemy_radius = config.enemy.radius;
    let mut game = Game::new(config);

    let mut rng = rand::thread_rng();
    let size = game.level().size();
    for _ in 0..ENEMY_COUNT {
        match clear_spot(&game, &mut rng, size, enemy_radius) {
            Some(position) => {
                game.spawn_enemy(position);
            }
            None => warn!("No clear spot found for an enemy, skipping"),
        }
    }
    info!("Demo start: {} enemies", game.enemy_count());

    let started = Instant::now();
    for frame in 0..FRAMES {
        game.update(DT, &scripted_input(frame, size));
    }
    let elapsed = started.elapsed().as_secs_f32();

    let player = game.player();
    info!(
        "Demo done: {FRAMES} frames in {:.1} ms ({:.0} fps), \
         player health {:.0}, {} enemies and {} bullets remain",
        elapsed * 1000.0,
        FRAMES as f32 / elapsed.max(f32::EPSILON),
        player.health,
        game.enemy_count(),
        game.bullet_count(),
    );
}

/// Pick a random position that collides with nothing, or give up
/// after a bounded number of attempts
fn clear_spot(game: &Game, rng: &mut impl Rng, size: Vec2, radius: f32) -> Option<Vec2> {
    for _ in 0..64 {
        let position = Vec2::new(
            rng.gen_range(0.0..size.x),
            rng.gen_range(0.0..size.y),
        );
        if game.is_clear(position, radius) {
            return Some(position);
        }
    }
    None
}

/// A fixed play loop: strafe right, sweep down the side, then push
/// toward the middle while shooting at it
fn scripted_input(frame: u32, size: Vec2) -> PlayerInput {
    let center = size / 2.0;
    match frame {
        0..=119 => PlayerInput {
            move_dir: Vec2::new(1.0, 0.0),
            aim: center,
            fire: false,
        },
        120..=299 => PlayerInput {
            move_dir: Vec2::new(0.0, 1.0),
            aim: center,
            fire: frame % 30 == 0,
        },
        _ => PlayerInput {
            move_dir: Vec2::new(-1.0, 1.0),
            aim: center,
            fire: frame % 15 == 0,
        },
    }
}
