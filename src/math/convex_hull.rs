use super::side_2d::{line_rside, Side};
use super::Point2;
use crate::error::GeometryError;

/// A candidate point with its polar coordinates about the pivot.
#[derive(Debug, Clone, Copy)]
struct Polar {
    index: usize,
    angle: f64,
    dist: f64,
}

/// Graham-scan convex hull returning indices into `points`.
///
/// The hull is counter-clockwise and starts at the pivot, the lowest point
/// (largest x among equally low points). Candidates are sorted by polar angle
/// about the pivot, nearer first on equal angles, except for the last angle
/// where farther comes first so the closing edge back to the pivot is
/// reached through its far end. A candidate is pushed when it is strictly
/// left of the last hull edge; otherwise the last hull point is popped.
/// Points within `eps` of the pivot are skipped.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateObstacle` if fewer than 3 hull points
/// remain (too few points, or all collinear).
pub fn convex_hull_indices(points: &[Point2], eps: f64) -> Result<Vec<usize>, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::DegenerateObstacle {
            vertices: points.len(),
        });
    }

    let mut pivot = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let best = &points[pivot];
        if p.y < best.y || (p.y == best.y && p.x > best.x) {
            pivot = i;
        }
    }
    let origin = points[pivot];

    let mut polar: Vec<Polar> = points
        .iter()
        .enumerate()
        .filter(|&(i, p)| i != pivot && nalgebra::distance(p, &origin) >= eps)
        .map(|(index, p)| Polar {
            index,
            angle: (p.y - origin.y).atan2(p.x - origin.x),
            dist: nalgebra::distance(p, &origin),
        })
        .collect();
    polar.sort_by(|a, b| a.angle.total_cmp(&b.angle).then(a.dist.total_cmp(&b.dist)));

    // Runs of candidates on one ray from the pivot are ordered by distance
    // even when atan2 disagrees in the last bit.
    let mut run_start = 0;
    let mut last_run = 0;
    while run_start < polar.len() {
        let first = &points[polar[run_start].index];
        let mut run_end = run_start + 1;
        while run_end < polar.len()
            && line_rside(&points[polar[run_end].index], &origin, first, eps) == Side::BOTH
        {
            run_end += 1;
        }
        polar[run_start..run_end].sort_by(|a, b| a.dist.total_cmp(&b.dist));
        last_run = run_start;
        run_start = run_end;
    }
    polar[last_run..].reverse();

    let mut hull: Vec<usize> = Vec::with_capacity(polar.len() + 1);
    hull.push(pivot);
    for candidate in &polar {
        let c = &points[candidate.index];
        while hull.len() >= 2 {
            let a = &points[hull[hull.len() - 2]];
            let b = &points[hull[hull.len() - 1]];
            if line_rside(c, a, b, eps).is_left() {
                break;
            }
            hull.pop();
        }
        hull.push(candidate.index);
    }

    while hull.len() > 2 {
        let a = &points[hull[hull.len() - 2]];
        let b = &points[hull[hull.len() - 1]];
        if line_rside(&origin, a, b, eps).is_left() {
            break;
        }
        hull.pop();
    }

    if hull.len() < 3 {
        return Err(GeometryError::DegenerateObstacle {
            vertices: hull.len(),
        });
    }
    Ok(hull)
}

/// Graham-scan convex hull, see [`convex_hull_indices`].
///
/// # Errors
///
/// Returns `GeometryError::DegenerateObstacle` if the points do not span an
/// area.
pub fn convex_hull(points: &[Point2], eps: f64) -> Result<Vec<Point2>, GeometryError> {
    Ok(convex_hull_indices(points, eps)?
        .into_iter()
        .map(|i| points[i])
        .collect())
}
