//! Collision volumes: shape plus the metadata queries filter on.

use crate::foundation::math::Vec2;

use super::shape::{shapes_overlap, Shape};

/// Coarse collision category used by consumers to filter query results
///
/// A bullet ignores other projectiles, the line-of-sight sampler only
/// cares about walls, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Static, immovable level geometry
    Wall,
    /// Movable combatants (player, enemies)
    Entity,
    /// Bullets and other short-lived projectiles
    Projectile,
}

/// Opaque non-owning back-reference to the entity that registered a
/// volume
///
/// The engine never interprets the value; the game layer assigns ids
/// and decodes them to route damage and hit notifications. Static
/// geometry registers volumes with no owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(pub u64);

/// A collision volume registered with a [`CollisionWorld`]
///
/// Shape tag and extents are always consistent because a volume can
/// only be built through the per-shape constructors.
///
/// [`CollisionWorld`]: super::CollisionWorld
#[derive(Debug, Clone)]
pub struct Volume {
    /// Geometric extent
    pub shape: Shape,

    /// Coarse category for result filtering
    pub layer: Layer,

    /// Reference position; circle center, rectangle top-left, or
    /// triangle centroid
    pub position: Vec2,

    /// Inactive volumes are excluded from every query without being
    /// removed from the registry
    pub active: bool,

    /// Entity that registered this volume, if any
    pub owner: Option<OwnerId>,
}

impl Volume {
    /// Create a circle volume at the origin
    pub fn circle(radius: f32, layer: Layer) -> Self {
        Self {
            shape: Shape::Circle { radius },
            layer,
            position: Vec2::zeros(),
            active: true,
            owner: None,
        }
    }

    /// Create an axis-aligned rectangle volume at the origin
    pub fn rect(width: f32, height: f32, layer: Layer) -> Self {
        Self {
            shape: Shape::Rect { width, height },
            layer,
            position: Vec2::zeros(),
            active: true,
            owner: None,
        }
    }

    /// Create a triangle volume from three world-space vertices
    ///
    /// The centroid becomes the volume position and the vertices are
    /// stored relative to it, so the triangle moves with the volume
    /// like any other shape.
    pub fn triangle(vertices: [Vec2; 3], layer: Layer) -> Self {
        let centroid = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
        Self {
            shape: Shape::Triangle {
                points: [
                    vertices[0] - centroid,
                    vertices[1] - centroid,
                    vertices[2] - centroid,
                ],
            },
            layer,
            position: centroid,
            active: true,
            owner: None,
        }
    }

    /// Move the volume to `position` (builder form)
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Attach the registering entity's id (builder form)
    #[must_use]
    pub fn owned_by(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Pairwise overlap test between two volumes
///
/// Inactive volumes never overlap anything; otherwise this dispatches
/// on the shape pair.
pub fn volumes_overlap(a: &Volume, b: &Volume) -> bool {
    if !a.active || !b.active {
        return false;
    }
    shapes_overlap(&a.shape, a.position, &b.shape, b.position)
}
