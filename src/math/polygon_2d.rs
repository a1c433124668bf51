use super::Point2;
use crate::error::GeometryError;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Turn at vertex `i`: z component of `(next - this) x (prev - this)`.
///
/// Positive where a counter-clockwise polygon turns left.
fn turn(points: &[Point2], i: usize) -> f64 {
    let n = points.len();
    let this = points[i];
    let u = points[(i + 1) % n] - this;
    let v = points[(i + n - 1) % n] - this;
    u.x * v.y - v.x * u.y
}

/// Drops vertices whose turn is within `eps` of zero (straight angles and
/// repeated points), along with a closing copy of the first vertex.
///
/// Removal repeats until every remaining vertex turns, so runs of collinear
/// vertices collapse to their endpoints.
#[must_use]
pub fn remove_collinear(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = points.to_vec();
    while out.len() > 1 && nalgebra::distance(&out[0], &out[out.len() - 1]) < eps {
        out.pop();
    }
    let mut changed = true;
    while changed && out.len() >= 3 {
        changed = false;
        if let Some(i) = (0..out.len()).find(|&i| turn(&out, i).abs() < eps) {
            out.remove(i);
            changed = true;
        }
    }
    out
}

/// Verifies convexity and makes the vertex order counter-clockwise in place.
///
/// Vertices with a turn within `eps` of zero are ignored.
///
/// # Errors
///
/// - `GeometryError::DegenerateObstacle` if no vertex turns
/// - `GeometryError::NonConvexObstacle` if turns disagree in sign
pub fn orient_polygon(points: &mut [Point2], eps: f64) -> Result<(), GeometryError> {
    let mut left_turns = 0;
    let mut right_turns = 0;
    if points.len() >= 3 {
        for i in 0..points.len() {
            let z = turn(points, i);
            if z >= eps {
                left_turns += 1;
            } else if z <= -eps {
                right_turns += 1;
            }
        }
    }

    if left_turns > 0 && right_turns > 0 {
        return Err(GeometryError::NonConvexObstacle {
            left_turns,
            right_turns,
        });
    }
    if left_turns + right_turns < 3 {
        return Err(GeometryError::DegenerateObstacle {
            vertices: left_turns + right_turns,
        });
    }
    if right_turns > 0 {
        points.reverse();
    }
    Ok(())
}

/// Rotates a closed polygon so it starts at the lowest vertex, breaking ties
/// by largest x. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.y < b.y || (pt.y == b.y && pt.x > b.x) {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}
