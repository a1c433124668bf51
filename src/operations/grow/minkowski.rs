use tracing::trace;

use super::GrownSet;
use crate::config::RobotFootprint;
use crate::error::GeometryError;
use crate::math::{convex_hull_indices, Point2, Vector2};
use crate::world::{GrownVertex, Shape, ShapeId, Vertex};

/// Grows obstacles by the Minkowski sum with a robot footprint.
///
/// Every obstacle vertex is translated by every footprint offset
/// (`(corner - reference) * scale`); the grown shape is the convex hull of
/// the translated points. Each grown vertex remembers which obstacle vertex
/// produced it.
pub struct MinkowskiGrow {
    offsets: Vec<Vector2>,
    eps: f64,
}

impl MinkowskiGrow {
    /// Creates a new `MinkowskiGrow` operation.
    #[must_use]
    pub fn new(footprint: &RobotFootprint, scale: f64, eps: f64) -> Self {
        Self {
            offsets: footprint.offsets(scale),
            eps,
        }
    }

    /// Grows every shape in `shapes`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateObstacle` if a grown shape spans no
    /// area, which only happens when the footprint has no corners.
    pub fn execute(&self, vertices: &[Vertex], shapes: &[Shape]) -> Result<GrownSet, GeometryError> {
        let mut grown = GrownSet::default();
        for (id, shape) in shapes.iter().enumerate() {
            let mut candidates = Vec::with_capacity(shape.count * self.offsets.len());
            let mut origins = Vec::with_capacity(candidates.capacity());
            for index in shape.range() {
                for offset in &self.offsets {
                    candidates.push(vertices[index].point + offset);
                    origins.push(index);
                }
            }

            let hull = convex_hull_indices(&candidates, self.eps)?;
            trace!(shape = id, candidates = candidates.len(), hull = hull.len(), "grew shape");
            grown.push_shape(hull.into_iter().map(|k| GrownVertex {
                point: candidates[k],
                shape: ShapeId(id),
                original: origins[k],
            }));
        }
        Ok(grown)
    }

    /// Grows a single polygon, returning the grown outline.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn grow_polygon(&self, polygon: &[Point2]) -> Result<Vec<Point2>, GeometryError> {
        let vertices: Vec<Vertex> = polygon
            .iter()
            .map(|&point| Vertex { point, shape: None })
            .collect();
        let grown = self.execute(&vertices, &[Shape::new(0, vertices.len())])?;
        Ok(grown.vertices.into_iter().map(|v| v.point).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{signed_area_2d, EPSILON};
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn triangle_grown_by_square() {
        let footprint = RobotFootprint::rectangle(2.0, 2.0);
        let op = MinkowskiGrow::new(&footprint, 1.0, EPSILON);
        let grown = op
            .grow_polygon(&pts(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]))
            .unwrap();
        assert_eq!(
            grown,
            pts(&[(5.0, -1.0), (5.0, 1.0), (1.0, 5.0), (-1.0, 5.0), (-1.0, -1.0)])
        );
        assert_relative_eq!(signed_area_2d(&grown), 28.0, epsilon = 1e-9);
    }

    #[test]
    fn scale_zero_returns_input() {
        let square = pts(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]);
        let op = MinkowskiGrow::new(&RobotFootprint::default(), 0.0, EPSILON);
        let grown = op.grow_polygon(&square).unwrap();
        assert_eq!(grown.len(), 4);
        for p in &square {
            assert!(grown.contains(p));
        }
    }

    #[test]
    fn records_originating_vertex() {
        let vertices: Vec<Vertex> = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .into_iter()
            .map(|point| Vertex {
                point,
                shape: Some(ShapeId(0)),
            })
            .collect();
        let footprint = RobotFootprint::rectangle(2.0, 2.0);
        let grown = MinkowskiGrow::new(&footprint, 1.0, EPSILON)
            .execute(&vertices, &[Shape::new(0, 4)])
            .unwrap();
        assert_eq!(grown.shapes, vec![Shape::new(0, 4)]);
        for v in &grown.vertices {
            let source = vertices[v.original].point;
            assert_relative_eq!((v.point - source).abs().max(), 1.0);
        }
    }
}
