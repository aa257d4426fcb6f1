//! Collision shapes and the pairwise overlap tests between them.
//!
//! The shape set is closed and small, so dispatch is a plain match on
//! the tag pair; each unordered pair has one canonical implementation
//! and the mirrored pair delegates with the arguments swapped.
//! Boundary touching counts as overlap throughout (`<=`, not `<`) so
//! that a body resting against a wall reports contact stably instead
//! of jittering in and out of it.

use crate::foundation::math::{utils, Vec2};

/// Geometric extent of a collision volume
///
/// The interpretation of the owning volume's position depends on the
/// shape: circles are centered on it, rectangles hang from it as the
/// top-left corner, and triangle vertices are stored relative to it
/// (the centroid) so the volume can be moved like any other.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A circle centered on the volume position
    Circle {
        /// Circle radius
        radius: f32,
    },

    /// An axis-aligned rectangle with the volume position as top-left
    Rect {
        /// Extent along +X
        width: f32,
        /// Extent along +Y
        height: f32,
    },

    /// A triangle with vertices relative to the volume position
    Triangle {
        /// Vertex offsets from the volume position
        points: [Vec2; 3],
    },
}

/// Resolve a triangle's stored vertex offsets to world space
fn triangle_world(points: &[Vec2; 3], position: Vec2) -> [Vec2; 3] {
    [
        position + points[0],
        position + points[1],
        position + points[2],
    ]
}

/// Shape-pair overlap dispatch
pub(crate) fn shapes_overlap(a: &Shape, a_pos: Vec2, b: &Shape, b_pos: Vec2) -> bool {
    match (a, b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a_pos, *ra, b_pos, *rb)
        }
        (Shape::Circle { radius }, Shape::Rect { width, height }) => {
            circle_rect(a_pos, *radius, b_pos, *width, *height)
        }
        (Shape::Circle { radius }, Shape::Triangle { points }) => {
            circle_triangle(a_pos, *radius, &triangle_world(points, b_pos))
        }
        (
            Shape::Rect { width: wa, height: ha },
            Shape::Rect { width: wb, height: hb },
        ) => rect_rect(a_pos, *wa, *ha, b_pos, *wb, *hb),
        (Shape::Triangle { points }, Shape::Rect { width, height }) => {
            triangle_rect(&triangle_world(points, a_pos), b_pos, *width, *height)
        }
        (Shape::Triangle { points: pa }, Shape::Triangle { points: pb }) => triangle_triangle(
            &triangle_world(pa, a_pos),
            &triangle_world(pb, b_pos),
        ),
        // Mirrored pairs delegate to the canonical direction.
        (Shape::Rect { .. } | Shape::Triangle { .. }, Shape::Circle { .. })
        | (Shape::Rect { .. }, Shape::Triangle { .. }) => shapes_overlap(b, b_pos, a, a_pos),
    }
}

fn circle_circle(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let radius_sum = ra + rb;
    (b - a).magnitude_squared() <= radius_sum * radius_sum
}

fn circle_rect(center: Vec2, radius: f32, top_left: Vec2, width: f32, height: f32) -> bool {
    // Nearest point to the circle center inside the rectangle.
    let nearest = Vec2::new(
        utils::clamp(center.x, top_left.x, top_left.x + width),
        utils::clamp(center.y, top_left.y, top_left.y + height),
    );
    (center - nearest).magnitude_squared() <= radius * radius
}

fn rect_rect(a: Vec2, aw: f32, ah: f32, b: Vec2, bw: f32, bh: f32) -> bool {
    // Overlap unless separated on X or Y; touching edges still count.
    !(a.x + aw < b.x || b.x + bw < a.x || a.y + ah < b.y || b.y + bh < a.y)
}

/// Point-in-triangle by sign consistency of the three edge cross
/// products; a point exactly on an edge counts as inside.
fn point_in_triangle(p: Vec2, tri: &[Vec2; 3]) -> bool {
    let d1 = utils::edge_sign(p, tri[0], tri[1]);
    let d2 = utils::edge_sign(p, tri[1], tri[2]);
    let d3 = utils::edge_sign(p, tri[2], tri[0]);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn point_in_rect(p: Vec2, top_left: Vec2, width: f32, height: f32) -> bool {
    p.x >= top_left.x
        && p.x <= top_left.x + width
        && p.y >= top_left.y
        && p.y <= top_left.y + height
}

fn rect_corners(top_left: Vec2, width: f32, height: f32) -> [Vec2; 4] {
    [
        top_left,
        Vec2::new(top_left.x + width, top_left.y),
        Vec2::new(top_left.x + width, top_left.y + height),
        Vec2::new(top_left.x, top_left.y + height),
    ]
}

fn circle_triangle(center: Vec2, radius: f32, tri: &[Vec2; 3]) -> bool {
    if point_in_triangle(center, tri) {
        return true;
    }

    // Otherwise the circle overlaps iff its center is within radius of
    // the closest point on some edge.
    for i in 0..3 {
        let closest = utils::closest_point_on_segment(tri[i], tri[(i + 1) % 3], center);
        if (center - closest).magnitude_squared() <= radius * radius {
            return true;
        }
    }
    false
}

fn triangle_rect(tri: &[Vec2; 3], top_left: Vec2, width: f32, height: f32) -> bool {
    if tri.iter().any(|p| point_in_rect(*p, top_left, width, height)) {
        return true;
    }

    let corners = rect_corners(top_left, width, height);
    if corners.iter().any(|c| point_in_triangle(*c, tri)) {
        return true;
    }

    // Neither contains a vertex of the other; they can still overlap
    // edge-through-edge.
    for i in 0..3 {
        for j in 0..4 {
            if utils::segments_intersect(
                tri[i],
                tri[(i + 1) % 3],
                corners[j],
                corners[(j + 1) % 4],
            ) {
                return true;
            }
        }
    }
    false
}

fn triangle_triangle(a: &[Vec2; 3], b: &[Vec2; 3]) -> bool {
    if a.iter().any(|p| point_in_triangle(*p, b)) || b.iter().any(|p| point_in_triangle(*p, a)) {
        return true;
    }

    for i in 0..3 {
        for j in 0..3 {
            if utils::segments_intersect(a[i], a[(i + 1) % 3], b[j], b[(j + 1) % 3]) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(radius: f32) -> Shape {
        Shape::Circle { radius }
    }

    fn rect(width: f32, height: f32) -> Shape {
        Shape::Rect { width, height }
    }

    fn triangle(points: [Vec2; 3]) -> Shape {
        Shape::Triangle { points }
    }

    #[test]
    fn test_circle_circle_symmetry() {
        let a = circle(10.0);
        let b = circle(4.0);
        let a_pos = Vec2::new(0.0, 0.0);
        let b_pos = Vec2::new(12.0, 3.0);

        assert_eq!(
            shapes_overlap(&a, a_pos, &b, b_pos),
            shapes_overlap(&b, b_pos, &a, a_pos)
        );
    }

    #[test]
    fn test_circle_overlaps_itself_at_same_position() {
        let a = circle(10.0);
        let pos = Vec2::new(5.0, -3.0);
        assert!(shapes_overlap(&a, pos, &a, pos));
    }

    #[test]
    fn test_touching_circles_overlap() {
        let a = circle(10.0);
        let b = circle(10.0);
        assert!(shapes_overlap(&a, Vec2::new(0.0, 0.0), &b, Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_barely_separated_circles_do_not_overlap() {
        let a = circle(10.0);
        let b = circle(10.0);
        assert!(!shapes_overlap(
            &a,
            Vec2::new(0.0, 0.0),
            &b,
            Vec2::new(20.0001, 0.0)
        ));
    }

    #[test]
    fn test_circle_rect_clamps_to_nearest_corner() {
        let c = circle(5.0);
        let r = rect(40.0, 40.0);
        let rect_pos = Vec2::new(0.0, 0.0);

        // Nearest point is (40, 40); distance sqrt(200) ~ 14.14 > 5.
        assert!(!shapes_overlap(&c, Vec2::new(50.0, 50.0), &r, rect_pos));

        // Distance ~2.83 < 5.
        assert!(shapes_overlap(&c, Vec2::new(42.0, 42.0), &r, rect_pos));
    }

    #[test]
    fn test_circle_inside_rect_overlaps() {
        let c = circle(5.0);
        let r = rect(40.0, 40.0);
        assert!(shapes_overlap(&c, Vec2::new(20.0, 20.0), &r, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_rect_rect_separation() {
        let a = rect(10.0, 10.0);
        let b = rect(10.0, 10.0);

        assert!(shapes_overlap(&a, Vec2::new(0.0, 0.0), &b, Vec2::new(5.0, 5.0)));
        assert!(!shapes_overlap(&a, Vec2::new(0.0, 0.0), &b, Vec2::new(10.5, 0.0)));
        // Touching edges count as overlap.
        assert!(shapes_overlap(&a, Vec2::new(0.0, 0.0), &b, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_circle_triangle_center_inside() {
        let tri = triangle([
            Vec2::new(-50.0, -50.0),
            Vec2::new(50.0, -50.0),
            Vec2::new(0.0, 50.0),
        ]);
        let c = circle(1.0);
        assert!(shapes_overlap(&c, Vec2::new(0.0, 0.0), &tri, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_circle_triangle_edge_contact() {
        let tri = triangle([
            Vec2::new(-50.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(0.0, 50.0),
        ]);
        let c = circle(5.0);

        // Center 4 units below the bottom edge: within radius.
        assert!(shapes_overlap(&c, Vec2::new(0.0, -4.0), &tri, Vec2::new(0.0, 0.0)));
        // Center 6 units below: outside.
        assert!(!shapes_overlap(&c, Vec2::new(0.0, -6.0), &tri, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_circle_triangle_winding_invariant() {
        let pos = Vec2::new(0.0, 0.0);
        let verts = [
            Vec2::new(-50.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(0.0, 50.0),
        ];
        let cw = triangle([verts[0], verts[2], verts[1]]);
        let ccw = triangle(verts);
        let c = circle(5.0);

        for center in [Vec2::new(0.0, 10.0), Vec2::new(0.0, -4.0), Vec2::new(100.0, 0.0)] {
            assert_eq!(
                shapes_overlap(&c, center, &ccw, pos),
                shapes_overlap(&c, center, &cw, pos),
            );
        }
    }

    #[test]
    fn test_triangle_rect_vertex_containment() {
        let tri = triangle([
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ]);
        let r = rect(20.0, 20.0);

        // Triangle vertex inside the rectangle.
        assert!(shapes_overlap(&tri, Vec2::new(5.0, 5.0), &r, Vec2::new(0.0, 0.0)));
        // Far apart.
        assert!(!shapes_overlap(&tri, Vec2::new(100.0, 100.0), &r, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_triangle_rect_edge_crossing_only() {
        // A wide triangle stabbing through a tall thin rectangle: no
        // vertex of either lies inside the other.
        let tri = triangle([
            Vec2::new(-50.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(10.0, 40.0),
        ]);
        let r = rect(4.0, 100.0);
        assert!(shapes_overlap(&tri, Vec2::new(0.0, 0.0), &r, Vec2::new(-2.0, -50.0)));
    }

    #[test]
    fn test_triangle_rect_winding_invariant() {
        let verts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ];
        let r = rect(8.0, 8.0);
        let rect_pos = Vec2::new(4.0, 4.0);

        let orderings = [
            [verts[0], verts[1], verts[2]],
            [verts[1], verts[2], verts[0]],
            [verts[2], verts[1], verts[0]],
        ];
        let expected = shapes_overlap(&triangle(orderings[0]), Vec2::new(0.0, 0.0), &r, rect_pos);
        for points in orderings {
            assert_eq!(
                shapes_overlap(&triangle(points), Vec2::new(0.0, 0.0), &r, rect_pos),
                expected
            );
        }
    }

    #[test]
    fn test_triangle_triangle_overlap_and_miss() {
        let a = triangle([
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ]);
        assert!(shapes_overlap(&a, Vec2::new(0.0, 0.0), &a, Vec2::new(3.0, 3.0)));
        assert!(!shapes_overlap(&a, Vec2::new(0.0, 0.0), &a, Vec2::new(30.0, 0.0)));
    }
}
