//! Visibility graph over grown obstacle vertices.

pub mod circle;
pub mod node;
pub mod visibility;

pub use circle::CircleObstacle;
pub use node::{Node, NodeKind};
pub use visibility::Sight;

use tracing::{debug, trace, warn};

use crate::collections::SymmetricMatrix;
use crate::error::{GraphError, Result};
use crate::math::{centroid, Point2};
use crate::world::ObstacleModel;

/// Nodes and pairwise visibility for a planning query.
///
/// Node 0 is the start, the last node is the goal, and every node between
/// them is a grown-obstacle vertex that is not strictly inside another grown
/// shape. Distances are cached for visible pairs; every other pair holds
/// `f64::INFINITY`.
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    nodes: Vec<Node>,
    enclosed: Vec<bool>,
    visible: SymmetricMatrix<bool>,
    distance: SymmetricMatrix<f64>,
    blockers: Vec<CircleObstacle>,
    epsilon: f64,
}

impl VisibilityGraph {
    /// Index of the start node.
    pub const START: usize = 0;

    /// Builds the graph for a query from `start_area` to `goal_area`.
    ///
    /// Start and goal are the centroids of their areas.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::EmptyArea` if either area has no points.
    pub fn build(
        model: &ObstacleModel,
        start_area: &[Point2],
        goal_area: &[Point2],
        epsilon: f64,
    ) -> Result<Self> {
        let start = centroid(start_area).ok_or(GraphError::EmptyArea("start"))?;
        let goal = centroid(goal_area).ok_or(GraphError::EmptyArea("goal"))?;

        let mut nodes = vec![Node::new(start, NodeKind::Start)];
        let mut skipped = 0;
        for (index, vertex) in model.grown_vertices().iter().enumerate() {
            if visibility::enclosing_shape(model, &vertex.point, epsilon).is_some() {
                skipped += 1;
                continue;
            }
            nodes.push(Node::new(vertex.point, NodeKind::Vertex(index)));
        }
        nodes.push(Node::new(goal, NodeKind::Goal));

        let n = nodes.len();
        let mut graph = Self {
            enclosed: vec![false; n],
            nodes,
            visible: SymmetricMatrix::new(n, false),
            distance: SymmetricMatrix::new(n, f64::INFINITY),
            blockers: Vec::new(),
            epsilon,
        };
        graph.enclosed[0] = graph.sentinel_enclosed(model, 0);
        graph.enclosed[n - 1] = graph.sentinel_enclosed(model, n - 1);

        for i in 0..n {
            for j in (i + 1)..n {
                graph.update_pair(model, i, j);
            }
        }
        debug!(
            nodes = n,
            skipped,
            edges = graph.edges().count(),
            "built visibility graph"
        );
        Ok(graph)
    }

    /// Moves the start node to `start` and recomputes only the pairs that
    /// involve it.
    pub fn reorient(&mut self, model: &ObstacleModel, start: Point2) {
        self.nodes[0].point = start;
        self.enclosed[0] = self.sentinel_enclosed(model, 0);
        for j in 1..self.nodes.len() {
            self.update_pair(model, 0, j);
        }
        debug!(
            x = start.x,
            y = start.y,
            neighbors = self.neighbors(0).count(),
            "reoriented start"
        );
    }

    /// Cuts every visible edge that passes too close to `obstacle`, then
    /// moves the start like [`reorient`](Self::reorient).
    ///
    /// The circle keeps blocking edges until the graph is built again.
    pub fn reorient_around(
        &mut self,
        model: &ObstacleModel,
        start: Point2,
        obstacle: CircleObstacle,
    ) {
        let n = self.nodes.len();
        let mut cut = 0;
        for i in 1..n {
            for j in (i + 1)..n {
                let (p, q) = (&self.nodes[i].point, &self.nodes[j].point);
                if self.visible[(i, j)] && obstacle.blocks(p, q) {
                    self.visible[(i, j)] = false;
                    self.distance[(i, j)] = f64::INFINITY;
                    cut += 1;
                }
            }
        }
        debug!(cut, radius = obstacle.radius, "circle obstacle cut edges");
        self.blockers.push(obstacle);
        self.reorient(model, start);
    }

    fn sentinel_enclosed(&self, model: &ObstacleModel, index: usize) -> bool {
        let node = &self.nodes[index];
        match visibility::enclosing_shape(model, &node.point, self.epsilon) {
            Some(shape) => {
                warn!(kind = ?node.kind, shape = shape.0, "node lies inside a grown obstacle");
                true
            }
            None => false,
        }
    }

    /// Classifies the line of sight between nodes `i` and `j`.
    #[must_use]
    pub fn sight(&self, model: &ObstacleModel, i: usize, j: usize) -> Sight {
        if self.enclosed[i] || self.enclosed[j] {
            return Sight::Interior;
        }
        let (a, b) = (&self.nodes[i], &self.nodes[j]);
        if let (NodeKind::Vertex(va), NodeKind::Vertex(vb)) = (a.kind, b.kind) {
            let gv = model.grown_vertices();
            let shape = gv[va].shape;
            if shape == gv[vb].shape && !model.grown_shapes()[shape.0].adjacent(va, vb) {
                return Sight::Blocked;
            }
        }
        let clear = visibility::segment_clear(model, &a.point, &b.point, self.epsilon)
            && !self.blockers.iter().any(|c| c.blocks(&a.point, &b.point));
        if clear {
            Sight::Visible
        } else {
            Sight::Blocked
        }
    }

    fn update_pair(&mut self, model: &ObstacleModel, i: usize, j: usize) {
        let sight = self.sight(model, i, j);
        trace!(i, j, ?sight, "pair");
        let visible = sight.is_visible();
        self.visible[(i, j)] = visible;
        self.distance[(i, j)] = if visible {
            nalgebra::distance(&self.nodes[i].point, &self.nodes[j].point)
        } else {
            f64::INFINITY
        };
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Index of the goal node.
    #[must_use]
    pub fn goal(&self) -> usize {
        self.nodes.len() - 1
    }

    fn node(&self, index: usize) -> std::result::Result<&Node, GraphError> {
        self.nodes.get(index).ok_or(GraphError::NodeOutOfRange {
            index,
            count: self.nodes.len(),
        })
    }

    /// Position of node `index`.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NodeOutOfRange` for an unknown index.
    pub fn node_point(&self, index: usize) -> Result<Point2> {
        Ok(self.node(index)?.point)
    }

    /// Kind of node `index`.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NodeOutOfRange` for an unknown index.
    pub fn node_kind(&self, index: usize) -> Result<NodeKind> {
        Ok(self.node(index)?.kind)
    }

    /// Returns `true` if nodes `i` and `j` see each other. Unknown indices
    /// see nothing.
    #[must_use]
    pub fn is_visible(&self, i: usize, j: usize) -> bool {
        i != j && self.visible.get(i, j).copied().unwrap_or(false)
    }

    /// Straight-line distance between visible nodes, `f64::INFINITY`
    /// otherwise.
    #[must_use]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        if self.is_visible(i, j) {
            self.distance[(i, j)]
        } else {
            f64::INFINITY
        }
    }

    /// Visible neighbours of `i` with their distances.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..self.nodes.len())
            .filter(move |&j| self.is_visible(i, j))
            .map(move |j| (j, self.distance[(i, j)]))
    }

    /// Every visible pair `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.nodes.len();
        (0..n).flat_map(move |i| {
            ((i + 1)..n)
                .filter(move |&j| self.visible[(i, j)])
                .map(move |j| (i, j))
        })
    }

    /// Circle obstacles cutting edges since the last build.
    #[must_use]
    pub fn blockers(&self) -> &[CircleObstacle] {
        &self.blockers
    }
}
