use std::ops::Range;

use crate::math::Point2;

/// Index of a shape within an [`ObstacleModel`](super::ObstacleModel).
///
/// Ids of grown shapes are dense and are reassigned whenever obstacles are
/// grown again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShapeId(pub usize);

/// Obstacle vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: Point2,
    pub shape: Option<ShapeId>,
}

/// Vertex of a grown obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrownVertex {
    pub point: Point2,
    pub shape: ShapeId,
    /// Index of the obstacle vertex that produced this one.
    pub original: usize,
}

/// Contiguous run of vertices `[start, start + count)` in a flat vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub start: usize,
    pub count: usize,
}

impl Shape {
    #[must_use]
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.count
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Vertex after `index`, wrapping to `start`.
    #[must_use]
    pub fn next(&self, index: usize) -> usize {
        self.start + (index - self.start + 1) % self.count
    }

    /// Vertex before `index`, wrapping to the last vertex.
    #[must_use]
    pub fn prev(&self, index: usize) -> usize {
        self.start + (index - self.start + self.count - 1) % self.count
    }

    /// Returns `true` if `a` and `b` are joined by an edge of this shape.
    #[must_use]
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.contains(a) && self.contains(b) && (self.next(a) == b || self.next(b) == a)
    }

    /// Edges as `(from, to)` index pairs in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.range().map(move |i| (i, self.next(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_within_range() {
        let shape = Shape::new(4, 3);
        assert_eq!(shape.range(), 4..7);
        assert_eq!(shape.next(6), 4);
        assert_eq!(shape.prev(4), 6);
        assert_eq!(shape.next(5), 6);
        assert!(shape.adjacent(4, 6));
        assert!(shape.adjacent(5, 4));
        assert!(!shape.adjacent(3, 4));
        assert_eq!(
            shape.edges().collect::<Vec<_>>(),
            vec![(4, 5), (5, 6), (6, 4)]
        );
    }

    #[test]
    fn triangle_vertices_are_all_adjacent() {
        let shape = Shape::new(0, 3);
        for a in 0..3 {
            for b in 0..3 {
                if a != b {
                    assert!(shape.adjacent(a, b));
                }
            }
        }
    }
}
