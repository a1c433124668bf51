use tracing::trace;

use super::GrownSet;
use crate::error::GeometryError;
use crate::math::{line_line_intersect_2d, rot_cw, Point2, Vector2};
use crate::world::{GrownVertex, Shape, ShapeId, Vertex};

/// Grows obstacles by pushing every edge outward by a fixed distance.
///
/// For a counter-clockwise polygon the outward normal of an edge is its
/// direction rotated clockwise. Each grown vertex is the intersection of the
/// two shifted edges meeting at the original vertex, so the output has the
/// same vertex count as the input. Sharp corners grow further than
/// `distance`.
pub struct EdgeOffsetGrow {
    distance: f64,
    eps: f64,
}

impl EdgeOffsetGrow {
    /// Creates a new `EdgeOffsetGrow` operation.
    #[must_use]
    pub fn new(distance: f64, eps: f64) -> Self {
        Self { distance, eps }
    }

    /// Grows every shape in `shapes`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateEdge` naming the shape and its local
    /// vertex index if an adjacent edge has zero length or the two edges at
    /// a vertex are parallel.
    pub fn execute(&self, vertices: &[Vertex], shapes: &[Shape]) -> Result<GrownSet, GeometryError> {
        let mut grown = GrownSet::default();
        for (id, shape) in shapes.iter().enumerate() {
            let points: Vec<Point2> = vertices[shape.range()].iter().map(|v| v.point).collect();
            let outline = self.offset_polygon(&points).map_err(|vertex| {
                GeometryError::DegenerateEdge { shape: id, vertex }
            })?;
            trace!(shape = id, vertices = outline.len(), "offset shape");
            grown.push_shape(outline.into_iter().zip(shape.range()).map(|(point, original)| {
                GrownVertex {
                    point,
                    shape: ShapeId(id),
                    original,
                }
            }));
        }
        Ok(grown)
    }

    /// Offsets one counter-clockwise polygon.
    ///
    /// # Errors
    ///
    /// Returns the index of the first vertex whose adjacent edges are
    /// degenerate.
    pub fn offset_polygon(&self, points: &[Point2]) -> Result<Vec<Point2>, usize> {
        let n = points.len();
        let mut directions: Vec<Vector2> = Vec::with_capacity(n);
        for i in 0..n {
            let edge = points[(i + 1) % n] - points[i];
            let len = edge.norm();
            if len < self.eps {
                return Err(i);
            }
            directions.push(edge / len);
        }

        let mut outline = Vec::with_capacity(n);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let d1 = directions[prev];
            let d2 = directions[i];
            let p1 = points[prev] + rot_cw(&d1) * self.distance;
            let p2 = points[i] + rot_cw(&d2) * self.distance;
            let (t, _) = line_line_intersect_2d(&p1, &d1, &p2, &d2, self.eps).ok_or(i)?;
            outline.push(p1 + d1 * t);
        }
        Ok(outline)
    }
}
