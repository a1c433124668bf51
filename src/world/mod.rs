//! Obstacle storage and growing.

pub mod shape;

pub use shape::{GrownVertex, Shape, ShapeId, Vertex};

use tracing::{debug, warn};

use crate::config::{GrowStrategy, MergePolicy, PlannerConfig, RobotFootprint};
use crate::error::Result;
use crate::math::{orient_polygon, remove_collinear, Point2};
use crate::operations::grow::{EdgeOffsetGrow, GrownSet, MergeOverlapping, MinkowskiGrow};

/// Obstacle polygons and their grown counterparts.
///
/// Vertices live in flat arrays; each [`Shape`] is a range into them. Raw
/// obstacles are appended by [`add_obstacle`](Self::add_obstacle); the grown
/// arrays are replaced wholesale each time obstacles are grown.
#[derive(Debug, Clone)]
pub struct ObstacleModel {
    vertices: Vec<Vertex>,
    shapes: Vec<Shape>,
    gvertices: Vec<GrownVertex>,
    gshapes: Vec<Shape>,
    epsilon: f64,
}

impl ObstacleModel {
    /// Creates an empty model using `epsilon` for geometric tests.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            vertices: Vec::new(),
            shapes: Vec::new(),
            gvertices: Vec::new(),
            gshapes: Vec::new(),
            epsilon,
        }
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Adds a convex obstacle.
    ///
    /// Straight-angle vertices and a closing copy of the first point are
    /// removed, then the polygon is reordered counter-clockwise if needed.
    ///
    /// # Errors
    ///
    /// - `GeometryError::DegenerateObstacle` if fewer than 3 vertices remain
    /// - `GeometryError::NonConvexObstacle` if the polygon turns both ways
    pub fn add_obstacle(&mut self, points: &[Point2]) -> Result<ShapeId> {
        let mut cleaned = remove_collinear(points, self.epsilon);
        if let Err(err) = orient_polygon(&mut cleaned, self.epsilon) {
            warn!(vertices = points.len(), %err, "rejected obstacle");
            return Err(err.into());
        }

        let id = ShapeId(self.shapes.len());
        self.shapes.push(Shape::new(self.vertices.len(), cleaned.len()));
        self.vertices.extend(cleaned.into_iter().map(|point| Vertex {
            point,
            shape: Some(id),
        }));
        debug!(shape = id.0, vertices = self.shapes[id.0].count, "added obstacle");
        Ok(id)
    }

    /// Removes every obstacle, raw and grown.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.shapes.clear();
        self.gvertices.clear();
        self.gshapes.clear();
    }

    /// Grows every obstacle by the configured strategy and merges overlaps.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`grow_shapes`](Self::grow_shapes) or
    /// [`fgrow_shapes`](Self::fgrow_shapes).
    pub fn grow(&mut self, config: &PlannerConfig) -> Result<()> {
        match config.grow_strategy {
            GrowStrategy::Minkowski => {
                self.grow_shapes(&config.footprint, config.footprint_scale, config.merge_policy)
            }
            GrowStrategy::EdgeOffset { distance } => {
                self.fgrow_shapes(distance, config.merge_policy)
            }
        }
    }

    /// Grows every obstacle by the Minkowski sum with `footprint` scaled by
    /// `scale`, then merges overlapping results according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateObstacle` if a grown shape has no
    /// area (only possible with an empty footprint).
    pub fn grow_shapes(
        &mut self,
        footprint: &RobotFootprint,
        scale: f64,
        policy: MergePolicy,
    ) -> Result<()> {
        let grown = MinkowskiGrow::new(footprint, scale, self.epsilon)
            .execute(&self.vertices, &self.shapes)?;
        self.install(grown, policy)
    }

    /// Grows every obstacle by shifting its edges outward by `distance`,
    /// then merges overlapping results according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateEdge` if two adjacent edges are
    /// parallel or an edge has zero length.
    pub fn fgrow_shapes(&mut self, distance: f64, policy: MergePolicy) -> Result<()> {
        let grown =
            EdgeOffsetGrow::new(distance, self.epsilon).execute(&self.vertices, &self.shapes)?;
        self.install(grown, policy)
    }

    fn install(&mut self, grown: GrownSet, policy: MergePolicy) -> Result<()> {
        let before = grown.shapes.len();
        let merged = MergeOverlapping::new(policy, self.epsilon).execute(grown)?;
        debug!(
            obstacles = self.shapes.len(),
            grown = before,
            merged = merged.shapes.len(),
            vertices = merged.vertices.len(),
            "grew obstacles"
        );
        self.gshapes = merged.shapes;
        self.gvertices = merged.vertices;
        Ok(())
    }

    /// Raw obstacle vertices, shape by shape.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Vertices of obstacle `id` in counter-clockwise order.
    #[must_use]
    pub fn polygon(&self, id: ShapeId) -> Option<Vec<Point2>> {
        let shape = self.shapes.get(id.0)?;
        Some(self.vertices[shape.range()].iter().map(|v| v.point).collect())
    }

    /// Grown vertices, shape by shape.
    #[must_use]
    pub fn grown_vertices(&self) -> &[GrownVertex] {
        &self.gvertices
    }

    #[must_use]
    pub fn grown_shapes(&self) -> &[Shape] {
        &self.gshapes
    }

    #[must_use]
    pub fn grown_count(&self) -> usize {
        self.gshapes.len()
    }

    /// Vertices of grown shape `id` in counter-clockwise order.
    #[must_use]
    pub fn grown_polygon(&self, id: ShapeId) -> Option<Vec<Point2>> {
        let shape = self.gshapes.get(id.0)?;
        Some(self.grown_points(shape).collect())
    }

    /// Points of a grown shape.
    pub fn grown_points<'a>(&'a self, shape: &Shape) -> impl Iterator<Item = Point2> + 'a {
        self.gvertices[shape.range()].iter().map(|v| v.point)
    }

    /// Every grown edge as a pair of end points.
    pub fn grown_edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.gshapes.iter().flat_map(move |shape| {
            shape
                .edges()
                .map(move |(a, b)| (self.gvertices[a].point, self.gvertices[b].point))
        })
    }
}

impl Default for ObstacleModel {
    fn default() -> Self {
        Self::new(crate::math::EPSILON)
    }
}
