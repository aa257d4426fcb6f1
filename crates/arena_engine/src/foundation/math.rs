//! Math utilities and types
//!
//! Provides the fundamental 2D math types for the simulation.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Closest point to `p` on the segment from `a` to `b`
    ///
    /// Clamped projection; a degenerate (zero-length) segment yields `a`.
    pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
        let ab = b - a;
        let len_sq = ab.magnitude_squared();
        if len_sq == 0.0 {
            return a;
        }
        let t = clamp((p - a).dot(&ab) / len_sq, 0.0, 1.0);
        a + ab * t
    }

    /// Signed doubled area of the triangle `(p, a, b)`
    ///
    /// The sign tells which side of the directed edge `a -> b` the
    /// point lies on; zero means collinear.
    pub fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
        (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
    }

    /// Test whether the segments `a1 -> a2` and `b1 -> b2` intersect
    ///
    /// Standard parametric cross-product form, accepting intersections
    /// with both parameters in `[0, 1]`. A zero denominator means the
    /// segments are parallel and reports no intersection.
    pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
        let denom = (a2.x - a1.x) * (b2.y - b1.y) - (a2.y - a1.y) * (b2.x - b1.x);
        if denom == 0.0 {
            return false;
        }
        let ua = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / denom;
        let ub = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / denom;
        (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
    }
}
