use crate::math::Point2;

/// What a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    /// Robot position; always node 0.
    Start,
    /// Target position; always the last node.
    Goal,
    /// Grown-obstacle vertex, by index into the model's grown vertices.
    Vertex(usize),
}

/// Node of a [`VisibilityGraph`](super::VisibilityGraph).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub point: Point2,
    pub kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn new(point: Point2, kind: NodeKind) -> Self {
        Self { point, kind }
    }

    /// Returns `true` for the start and goal nodes.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, NodeKind::Start | NodeKind::Goal)
    }
}
