//! Collision detection and response
//!
//! A flat registry of shape-polymorphic collision volumes with
//! pairwise overlap tests, positional queries, and an axis-separated
//! sliding movement resolver. The registry is brute-force by design:
//! entity counts in an arena are small (tens, not thousands), so every
//! query is a linear scan with no broad phase.

mod shape;
mod slide;
mod volume;
mod world;

pub use shape::Shape;
pub use slide::{slide_move, SlideOutcome};
pub use volume::{volumes_overlap, Layer, OwnerId, Volume};
pub use world::{CollisionWorld, VolumeKey};
