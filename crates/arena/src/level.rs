//! Arena level geometry
//!
//! Registers the wall volumes for the default arena: a solid border,
//! a circular obstacle in the middle, triangular deflectors near the
//! top corners, and a scattering of rectangles and circles in the
//! lower half. Everything scales with the configured arena size.
//! Walls are permanently active and never move after load.

use arena_engine::prelude::{CollisionWorld, Layer, Vec2, Volume, VolumeKey};
use log::info;

use crate::config::ArenaConfig;

/// The static arena: border plus interior obstacles
pub struct Level {
    walls: Vec<VolumeKey>,
    width: f32,
    height: f32,
    border: f32,
}

impl Level {
    /// Register the arena's wall volumes and remember their keys
    pub fn build(cfg: &ArenaConfig, world: &mut CollisionWorld) -> Self {
        let width = cfg.width();
        let height = cfg.height();
        let border = cfg.border;
        let mut walls = Vec::new();
        let mut add = |world: &mut CollisionWorld, volume: Volume| {
            walls.push(world.insert(volume));
        };

        // Border walls boxing the arena in.
        add(world, Volume::rect(width, border, Layer::Wall).at(Vec2::new(0.0, 0.0)));
        add(
            world,
            Volume::rect(width, border, Layer::Wall).at(Vec2::new(0.0, height - border)),
        );
        add(world, Volume::rect(border, height, Layer::Wall).at(Vec2::new(0.0, 0.0)));
        add(
            world,
            Volume::rect(border, height, Layer::Wall).at(Vec2::new(width - border, 0.0)),
        );

        // Central circular obstacle.
        add(
            world,
            Volume::circle(200.0, Layer::Wall).at(Vec2::new(width / 2.0, height / 2.0)),
        );

        // Triangular deflectors near the top corners, mirrored.
        add(
            world,
            Volume::triangle(
                [
                    Vec2::new(200.0, 200.0),
                    Vec2::new(500.0, 200.0),
                    Vec2::new(350.0, 500.0),
                ],
                Layer::Wall,
            ),
        );
        add(
            world,
            Volume::triangle(
                [
                    Vec2::new(width - 200.0, 200.0),
                    Vec2::new(width - 500.0, 200.0),
                    Vec2::new(width - 350.0, 500.0),
                ],
                Layer::Wall,
            ),
        );

        // Lower-half cover: two rectangles, two circles, and a
        // triangle pointing up the middle.
        add(
            world,
            Volume::rect(300.0, 200.0, Layer::Wall).at(Vec2::new(200.0, height - 600.0)),
        );
        add(
            world,
            Volume::rect(300.0, 200.0, Layer::Wall).at(Vec2::new(width - 500.0, height - 600.0)),
        );
        add(
            world,
            Volume::circle(150.0, Layer::Wall).at(Vec2::new(800.0, 800.0)),
        );
        add(
            world,
            Volume::circle(150.0, Layer::Wall).at(Vec2::new(width - 800.0, 800.0)),
        );
        add(
            world,
            Volume::triangle(
                [
                    Vec2::new(width / 2.0 - 150.0, height - 200.0),
                    Vec2::new(width / 2.0 + 150.0, height - 200.0),
                    Vec2::new(width / 2.0, height - 500.0),
                ],
                Layer::Wall,
            ),
        );

        info!("Level built: {} walls, {width}x{height}", walls.len());
        Self {
            walls,
            width,
            height,
            border,
        }
    }

    /// Arena extent in world units
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True if `point` lies inside the playable area (border excluded)
    pub fn in_bounds(&self, point: Vec2) -> bool {
        point.x >= self.border
            && point.x <= self.width - self.border
            && point.y >= self.border
            && point.y <= self.height - self.border
    }

    /// Number of registered wall volumes
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}
