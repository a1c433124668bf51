//! Dijkstra's shortest path over a visibility graph.

use tracing::{debug, warn};

use super::Path;
use crate::collections::{HeapOrder, MutableHeap};
use crate::error::{Result, SearchError};
use crate::graph::VisibilityGraph;

/// Tentative distances and heap slots, indexed by node.
struct Frontier {
    dist: Vec<f64>,
    slot: Vec<Option<usize>>,
}

impl HeapOrder<usize> for Frontier {
    fn less(&self, a: &usize, b: &usize) -> bool {
        self.dist[*a] < self.dist[*b]
    }

    fn moved(&mut self, item: &usize, slot: usize) {
        self.slot[*item] = Some(slot);
    }
}

/// Finds the shortest path from the start node to the goal node.
///
/// Every node starts in the heap at infinite distance except the start.
/// Popping a node settles it; its visible neighbours that are still queued
/// are relaxed with the cached edge distances. The search stops at the goal
/// or at the first node with infinite distance.
///
/// # Errors
///
/// Returns `SearchError::NoPathFound` if the goal is unreachable.
pub fn find_path(graph: &VisibilityGraph) -> Result<Path> {
    let n = graph.node_count();
    let start = VisibilityGraph::START;
    let goal = graph.goal();

    let mut frontier = Frontier {
        dist: vec![f64::INFINITY; n],
        slot: vec![None; n],
    };
    frontier.dist[start] = 0.0;
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut heap = MutableHeap::from_vec((0..n).collect(), &mut frontier);

    while let Some(node) = heap.pop(&mut frontier) {
        frontier.slot[node] = None;
        let base = frontier.dist[node];
        if base.is_infinite() || node == goal {
            break;
        }
        for (next, weight) in graph.neighbors(node) {
            let Some(slot) = frontier.slot[next] else {
                continue;
            };
            let candidate = base + weight;
            if candidate < frontier.dist[next] {
                frontier.dist[next] = candidate;
                prev[next] = Some(node);
                heap.decrease_key(slot, &mut frontier);
            }
        }
    }

    let length = frontier.dist[goal];
    if length.is_infinite() {
        warn!(nodes = n, "goal is unreachable");
        return Err(SearchError::NoPathFound.into());
    }

    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(p) = prev[current] {
        nodes.push(p);
        current = p;
    }
    nodes.reverse();

    let points = nodes.iter().map(|&i| graph.nodes()[i].point).collect();
    debug!(length, hops = nodes.len() - 1, "found path");
    Ok(Path::new(nodes, points, length))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{MergePolicy, RobotFootprint};
    use crate::error::PlannerError;
    use crate::math::{Point2, EPSILON};
    use crate::world::ObstacleModel;
    use approx::assert_relative_eq;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn model(polygons: &[&[(f64, f64)]]) -> ObstacleModel {
        let mut model = ObstacleModel::new(EPSILON);
        for poly in polygons {
            let points: Vec<Point2> = poly.iter().map(|&(x, y)| pt(x, y)).collect();
            model.add_obstacle(&points).unwrap();
        }
        model
            .grow_shapes(&RobotFootprint::point(), 1.0, MergePolicy::FixedPoint)
            .unwrap();
        model
    }

    #[test]
    fn straight_line_without_obstacles() {
        let model = ObstacleModel::new(EPSILON);
        let graph = VisibilityGraph::build(&model, &[pt(0.0, 0.0)], &[pt(3.0, 4.0)], EPSILON)
            .unwrap();
        let path = find_path(&graph).unwrap();
        assert_eq!(path.nodes(), &[0, 1]);
        assert_relative_eq!(path.length(), 5.0);
    }

    #[test]
    fn routes_around_square() {
        let model = model(&[&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
        let graph = VisibilityGraph::build(&model, &[pt(-5.0, 5.0)], &[pt(15.0, 5.0)], EPSILON)
            .unwrap();
        let path = find_path(&graph).unwrap();
        let expected = 2.0 * 50.0_f64.sqrt() + 10.0;
        assert_relative_eq!(path.length(), expected, epsilon = 1e-9);
        assert_eq!(path.nodes().len(), 4);
        assert_eq!(path.nodes()[0], 0);
        assert_eq!(path.nodes()[3], graph.goal());
        let points = path.waypoints();
        let below = points[1].y == 0.0 && points[2].y == 0.0;
        let above = points[1].y == 10.0 && points[2].y == 10.0;
        assert!(below || above);
    }

    #[test]
    fn shorter_gap_wins() {
        // A wall with a gap near the bottom, closed off at the top.
        let model = model(&[
            &[(4.0, -20.0), (6.0, -20.0), (6.0, -1.0), (4.0, -1.0)],
            &[(4.0, 1.0), (6.0, 1.0), (6.0, 30.0), (4.0, 30.0)],
        ]);
        let graph = VisibilityGraph::build(&model, &[pt(0.0, 0.0)], &[pt(10.0, 0.0)], EPSILON)
            .unwrap();
        let path = find_path(&graph).unwrap();
        assert_relative_eq!(path.length(), 10.0, epsilon = 1e-9);
        assert_eq!(path.nodes().len(), 2);
    }

    #[test]
    fn enclosed_goal_has_no_path() {
        let model = model(&[&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
        let graph =
            VisibilityGraph::build(&model, &[pt(-5.0, 5.0)], &[pt(5.0, 5.0)], EPSILON).unwrap();
        let err = find_path(&graph).unwrap_err();
        assert!(matches!(err, PlannerError::Search(SearchError::NoPathFound)));
    }

    #[test]
    fn relaxation_prefers_cheaper_detour() {
        // Going over the first wall leads into the second one; the cheaper
        // route passes below both.
        let model = model(&[
            &[(2.0, -5.0), (4.0, -5.0), (4.0, 5.0), (2.0, 5.0)],
            &[(6.0, -1.0), (8.0, -1.0), (8.0, 8.0), (6.0, 8.0)],
        ]);
        let graph = VisibilityGraph::build(&model, &[pt(0.0, 0.0)], &[pt(10.0, 0.0)], EPSILON)
            .unwrap();
        let path = find_path(&graph).unwrap();
        let points = path.waypoints();
        for pair in points.windows(2) {
            assert!(crate::graph::visibility::segment_clear(
                &model, &pair[0], &pair[1], EPSILON
            ));
        }
        let walked: f64 = points
            .windows(2)
            .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
            .sum();
        assert_relative_eq!(walked, path.length(), epsilon = 1e-9);
        assert_eq!(points[1], pt(2.0, -5.0));
    }
}
