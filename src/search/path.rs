use crate::math::Point2;

/// Shortest path through a [`VisibilityGraph`](crate::graph::VisibilityGraph).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    nodes: Vec<usize>,
    points: Vec<Point2>,
    length: f64,
}

impl Path {
    pub(crate) fn new(nodes: Vec<usize>, points: Vec<Point2>, length: f64) -> Self {
        Self {
            nodes,
            points,
            length,
        }
    }

    /// Node indices from start to goal.
    #[must_use]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Node positions from start to goal, as they were when the path was
    /// found.
    #[must_use]
    pub fn waypoints(&self) -> &[Point2] {
        &self.points
    }

    /// Sum of segment lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Cursor positioned on the first waypoint.
    #[must_use]
    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor {
            points: &self.points,
            index: 0,
        }
    }

    #[must_use]
    pub fn into_waypoints(self) -> Vec<Point2> {
        self.points
    }
}

/// Walks the waypoints of a [`Path`] one target at a time.
#[derive(Debug, Clone)]
pub struct PathCursor<'a> {
    points: &'a [Point2],
    index: usize,
}

impl PathCursor<'_> {
    /// Waypoint currently being driven to.
    #[must_use]
    pub fn current(&self) -> Option<Point2> {
        self.points.get(self.index).copied()
    }

    /// Waypoint after the current one.
    #[must_use]
    pub fn peek_next(&self) -> Option<Point2> {
        self.points.get(self.index + 1).copied()
    }

    /// Moves to the next waypoint and returns it. Returns `None` once the
    /// cursor has passed the goal.
    pub fn advance(&mut self) -> Option<Point2> {
        if self.index < self.points.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Returns `true` when the current waypoint is the goal.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.points.len()
    }

    /// Position of the current waypoint in the path.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}
