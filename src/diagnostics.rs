//! Snapshot of a planning run for plotting or logging.

use crate::graph::VisibilityGraph;
use crate::math::Point2;
use crate::search::Path;
use crate::world::{ObstacleModel, ShapeId};

/// Obstacles, grown obstacles, visibility edges and path of one planning run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostics {
    pub obstacles: Vec<Vec<Point2>>,
    pub grown: Vec<Vec<Point2>>,
    pub edges: Vec<(Point2, Point2)>,
    pub path: Vec<Point2>,
    pub length: Option<f64>,
}

impl Diagnostics {
    /// Copies everything needed to draw the current state.
    #[must_use]
    pub fn capture(model: &ObstacleModel, graph: &VisibilityGraph, path: Option<&Path>) -> Self {
        let obstacles = (0..model.shape_count())
            .filter_map(|i| model.polygon(ShapeId(i)))
            .collect();
        let grown = (0..model.grown_count())
            .filter_map(|i| model.grown_polygon(ShapeId(i)))
            .collect();
        let nodes = graph.nodes();
        let edges = graph
            .edges()
            .map(|(i, j)| (nodes[i].point, nodes[j].point))
            .collect();
        Self {
            obstacles,
            grown,
            edges,
            path: path.map(|p| p.waypoints().to_vec()).unwrap_or_default(),
            length: path.map(Path::length),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{MergePolicy, RobotFootprint};
    use crate::math::EPSILON;
    use crate::search::find_path;

    #[test]
    fn captures_square_scene() {
        let mut model = ObstacleModel::new(EPSILON);
        model
            .add_obstacle(&[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ])
            .unwrap();
        model
            .grow_shapes(&RobotFootprint::rectangle(2.0, 2.0), 1.0, MergePolicy::FixedPoint)
            .unwrap();
        let graph = VisibilityGraph::build(
            &model,
            &[Point2::new(-5.0, 5.0)],
            &[Point2::new(15.0, 5.0)],
            EPSILON,
        )
        .unwrap();
        let path = find_path(&graph).unwrap();
        let snapshot = Diagnostics::capture(&model, &graph, Some(&path));
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.grown[0].len(), 4);
        assert_eq!(snapshot.edges.len(), 8);
        assert_eq!(snapshot.path.len(), 4);
        assert!(snapshot.length.unwrap() > 20.0);

        let empty = Diagnostics::capture(&model, &graph, None);
        assert!(empty.path.is_empty());
        assert_eq!(empty.length, None);
    }
}
