use super::side_2d::orientation;
use super::{cross, Point2, Vector2};

/// Returns `true` if segments `p1 q1` and `p2 q2` block each other.
///
/// Each segment's endpoints must strictly straddle the other's supporting
/// line. An endpoint on the line counts for both sides, so segments that only
/// touch (a shared endpoint, or an endpoint resting on the other segment) do
/// not intersect. Collinear segments never intersect.
///
/// Symmetric in the order of the two segments and of each segment's
/// endpoints.
#[must_use]
pub fn segments_intersect(p1: &Point2, q1: &Point2, p2: &Point2, q2: &Point2, eps: f64) -> bool {
    let same_side_of_first = orientation(p2, p1, q1, eps).shares(orientation(q2, p1, q1, eps));
    let same_side_of_second = orientation(p1, p2, q2, eps).shares(orientation(q1, p2, q2, eps));
    !(same_side_of_first || same_side_of_second)
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not
/// parallel within `eps`.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    eps: f64,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < eps {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Returns `true` if some part of segment `p q` lies more than `eps` inside
/// the convex counter-clockwise polygon with the given edges.
///
/// Complements [`segments_intersect`], which lets a segment slip between
/// edge endpoints (a diagonal joining two corners) or run inside a polygon
/// whose boundary it only touches.
#[must_use]
pub fn segment_enters_convex<I>(p: &Point2, q: &Point2, edges: I, eps: f64) -> bool
where
    I: IntoIterator<Item = (Point2, Point2)>,
{
    let d = q - p;
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for (a, b) in edges {
        let edge = b - a;
        // Depth of p + t * d left of the edge is s0 + t * ds, scaled by |edge|.
        let tol = eps * edge.norm();
        let s0 = cross(&a, &b, p);
        let ds = edge.x * d.y - edge.y * d.x;
        if ds > 0.0 {
            lo = lo.max((tol - s0) / ds);
        } else if ds < 0.0 {
            hi = hi.min((tol - s0) / ds);
        } else if s0 <= tol {
            return false;
        }
        if lo >= hi {
            return false;
        }
    }
    lo < hi
}
