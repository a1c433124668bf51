//! Obstacle growing: expanding obstacles by the robot footprint so the robot
//! can be planned for as a point.

mod edge_offset;
mod merge;
mod minkowski;

pub use edge_offset::EdgeOffsetGrow;
pub use merge::MergeOverlapping;
pub use minkowski::MinkowskiGrow;

use crate::world::{GrownVertex, Shape};

/// Grown shapes and their flat vertex array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrownSet {
    pub shapes: Vec<Shape>,
    pub vertices: Vec<GrownVertex>,
}

impl GrownSet {
    /// Appends a shape made of `vertices`.
    pub fn push_shape(&mut self, vertices: impl IntoIterator<Item = GrownVertex>) {
        let start = self.vertices.len();
        self.vertices.extend(vertices);
        self.shapes.push(Shape::new(start, self.vertices.len() - start));
    }
}
