pub mod convex_hull;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod side_2d;

pub use convex_hull::{convex_hull, convex_hull_indices};
pub use distance_2d::{centroid, point_to_segment_dist};
pub use intersect_2d::{line_line_intersect_2d, segment_enters_convex, segments_intersect};
pub use polygon_2d::{orient_polygon, remove_collinear, signed_area_2d};
pub use side_2d::{line_rside, orientation, Side};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for collinearity and near-zero tests, in millimetres.
pub const EPSILON: f64 = 1e-4;

/// z component of `(b - a) x (c - a)`.
#[inline]
#[must_use]
pub fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Rotates a vector 90 degrees clockwise.
#[inline]
#[must_use]
pub fn rot_cw(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}
