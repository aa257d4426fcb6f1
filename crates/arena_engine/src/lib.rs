//! # Arena Engine
//!
//! A small 2D simulation engine for top-down arena games.
//!
//! ## Features
//!
//! - **Collision Detection**: circle, rectangle, and triangle volumes
//!   with pairwise overlap tests and positional queries
//! - **Collision Layers**: coarse wall/entity/projectile filtering
//! - **Sliding Movement**: axis-separated collision response so moving
//!   bodies glide along walls instead of sticking
//! - **Simulated Time**: one-shot countdowns for cooldowns and timers
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_engine::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! let wall = world.insert(Volume::rect(100.0, 20.0, Layer::Wall).at(Vec2::new(0.0, 50.0)));
//! let body = world.insert(Volume::circle(10.0, Layer::Entity).at(Vec2::new(50.0, 20.0)));
//!
//! // A diagonal move into the wall slides along it.
//! let outcome = slide_move(&world, body, Vec2::new(50.0, 20.0), Vec2::new(30.0, 30.0));
//! assert!(outcome.blocked_y);
//! assert!(!world.overlaps(body, wall));
//! # let _ = outcome.position;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod foundation;

/// Common imports for engine users
pub mod prelude {
    pub use crate::collision::{
        slide_move, volumes_overlap, CollisionWorld, Layer, OwnerId, Shape, SlideOutcome, Volume,
        VolumeKey,
    };
    pub use crate::foundation::{math::Vec2, time::Countdown};
}
