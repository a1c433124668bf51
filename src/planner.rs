//! Planning facade: grow, build, search.

use tracing::{debug, info_span};

use crate::config::PlannerConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{GraphError, Result};
use crate::graph::{CircleObstacle, VisibilityGraph};
use crate::math::Point2;
use crate::search::{find_path, Path};
use crate::world::{ObstacleModel, ShapeId};

/// Plans paths for one robot through a set of convex obstacles.
///
/// [`plan`](Self::plan) regrows the obstacles and rebuilds the visibility
/// graph from scratch. [`replan_from`](Self::replan_from) and
/// [`replan_around`](Self::replan_around) reuse the last graph and only
/// recompute the start node's edges.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    model: ObstacleModel,
    start_area: Vec<Point2>,
    goal_area: Vec<Point2>,
    graph: Option<VisibilityGraph>,
    path: Option<Path>,
}

impl Planner {
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            model: ObstacleModel::new(config.epsilon),
            config,
            start_area: Vec::new(),
            goal_area: Vec::new(),
            graph: None,
            path: None,
        }
    }

    /// Adds a convex obstacle. The previous graph is discarded.
    ///
    /// # Errors
    ///
    /// See [`ObstacleModel::add_obstacle`].
    pub fn add_obstacle(&mut self, points: &[Point2]) -> Result<ShapeId> {
        let id = self.model.add_obstacle(points)?;
        self.graph = None;
        self.path = None;
        Ok(id)
    }

    /// Sets the points whose centroid is the start position.
    pub fn set_start_area(&mut self, area: Vec<Point2>) {
        self.start_area = area;
    }

    /// Sets the points whose centroid is the goal position.
    pub fn set_goal_area(&mut self, area: Vec<Point2>) {
        self.goal_area = area;
    }

    /// Grows the obstacles, builds the visibility graph and returns the
    /// waypoints of the shortest path.
    ///
    /// The graph is kept even when no path exists, so the robot can move and
    /// [`replan_from`](Self::replan_from) a new position.
    ///
    /// # Errors
    ///
    /// - `GeometryError` if growing fails
    /// - `GraphError::EmptyArea` if the start or goal area is unset
    /// - `SearchError::NoPathFound` if the goal is unreachable
    pub fn plan(&mut self) -> Result<Vec<Point2>> {
        let _span = info_span!("plan", obstacles = self.model.shape_count()).entered();
        self.graph = None;
        self.path = None;
        self.model.grow(&self.config)?;
        let graph = VisibilityGraph::build(
            &self.model,
            &self.start_area,
            &self.goal_area,
            self.config.epsilon,
        )?;
        self.search(graph)
    }

    /// Moves the start to `position` on the last graph and searches again.
    ///
    /// # Errors
    ///
    /// - `GraphError::NotBuilt` if [`plan`](Self::plan) has not run since the
    ///   obstacles last changed
    /// - `SearchError::NoPathFound` if the goal is unreachable
    pub fn replan_from(&mut self, position: Point2) -> Result<Vec<Point2>> {
        let mut graph = self.graph.take().ok_or(GraphError::NotBuilt)?;
        graph.reorient(&self.model, position);
        self.search(graph)
    }

    /// Like [`replan_from`](Self::replan_from), after cutting every edge
    /// that passes too close to `obstacle`.
    ///
    /// # Errors
    ///
    /// See [`replan_from`](Self::replan_from).
    pub fn replan_around(
        &mut self,
        position: Point2,
        obstacle: CircleObstacle,
    ) -> Result<Vec<Point2>> {
        let mut graph = self.graph.take().ok_or(GraphError::NotBuilt)?;
        graph.reorient_around(&self.model, position, obstacle);
        self.search(graph)
    }

    fn search(&mut self, graph: VisibilityGraph) -> Result<Vec<Point2>> {
        let found = find_path(&graph);
        self.graph = Some(graph);
        let path = found?;
        debug!(waypoints = path.waypoints().len(), length = path.length(), "planned");
        let waypoints = path.waypoints().to_vec();
        self.path = Some(path);
        Ok(waypoints)
    }

    /// Snapshot of obstacles, graph and path for inspection.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NotBuilt` if no graph exists.
    pub fn diagnostics(&self) -> Result<Diagnostics> {
        let graph = self.graph.as_ref().ok_or(GraphError::NotBuilt)?;
        Ok(Diagnostics::capture(&self.model, graph, self.path.as_ref()))
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &ObstacleModel {
        &self.model
    }

    #[must_use]
    pub fn graph(&self) -> Option<&VisibilityGraph> {
        self.graph.as_ref()
    }

    /// Path found by the last successful search.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{GrowStrategy, RobotFootprint};
    use crate::error::{PlannerError, SearchError};
    use approx::assert_relative_eq;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn point_robot() -> Planner {
        Planner::new(PlannerConfig::default().with_footprint(RobotFootprint::point(), 1.0))
    }

    fn square(planner: &mut Planner) {
        planner
            .add_obstacle(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)])
            .unwrap();
    }

    #[test]
    fn plan_around_square() {
        let mut planner = point_robot();
        square(&mut planner);
        planner.set_start_area(vec![pt(-6.0, 4.0), pt(-4.0, 6.0)]);
        planner.set_goal_area(vec![pt(15.0, 5.0)]);
        let waypoints = planner.plan().unwrap();
        assert_eq!(waypoints.len(), 4);
        assert_eq!(waypoints[0], pt(-5.0, 5.0));
        assert_eq!(waypoints[3], pt(15.0, 5.0));
        assert!(planner.path().unwrap().length() > 20.0);
    }

    #[test]
    fn replan_requires_graph() {
        let mut planner = point_robot();
        let err = planner.replan_from(pt(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, PlannerError::Graph(GraphError::NotBuilt)));
        assert!(planner.diagnostics().is_err());
    }

    #[test]
    fn replan_from_new_position() {
        let mut planner = point_robot();
        square(&mut planner);
        planner.set_start_area(vec![pt(-5.0, 5.0)]);
        planner.set_goal_area(vec![pt(15.0, 5.0)]);
        planner.plan().unwrap();

        let waypoints = planner.replan_from(pt(12.0, -3.0)).unwrap();
        assert_eq!(waypoints, vec![pt(12.0, -3.0), pt(15.0, 5.0)]);
        assert_relative_eq!(planner.path().unwrap().length(), 73.0_f64.sqrt());
    }

    #[test]
    fn adding_obstacle_discards_graph() {
        let mut planner = point_robot();
        square(&mut planner);
        planner.set_start_area(vec![pt(-5.0, 5.0)]);
        planner.set_goal_area(vec![pt(15.0, 5.0)]);
        planner.plan().unwrap();
        planner
            .add_obstacle(&[pt(20.0, 0.0), pt(25.0, 0.0), pt(25.0, 5.0)])
            .unwrap();
        assert!(planner.graph().is_none());
        assert!(planner.replan_from(pt(-5.0, 5.0)).is_err());
    }

    #[test]
    fn unreachable_goal_keeps_graph() {
        let mut planner = point_robot();
        square(&mut planner);
        planner.set_start_area(vec![pt(-5.0, 5.0)]);
        planner.set_goal_area(vec![pt(5.0, 5.0)]);
        let err = planner.plan().unwrap_err();
        assert!(matches!(err, PlannerError::Search(SearchError::NoPathFound)));
        assert!(planner.graph().is_some());
        assert!(planner.path().is_none());
    }

    #[test]
    fn replan_around_circle() {
        let mut planner = point_robot();
        square(&mut planner);
        planner.set_start_area(vec![pt(-5.0, 5.0)]);
        planner.set_goal_area(vec![pt(15.0, 5.0)]);
        planner.plan().unwrap();

        // Block the route along the bottom edge.
        let waypoints = planner
            .replan_around(pt(-5.0, 5.0), CircleObstacle::new(pt(5.0, -1.0), 2.0))
            .unwrap();
        assert_eq!(waypoints[1], pt(0.0, 10.0));
        assert_eq!(waypoints[2], pt(10.0, 10.0));
    }

    #[test]
    fn edge_offset_strategy() {
        let mut planner = Planner::new(
            PlannerConfig::default().with_grow_strategy(GrowStrategy::EdgeOffset { distance: 1.0 }),
        );
        square(&mut planner);
        planner.set_start_area(vec![pt(-5.0, 5.0)]);
        planner.set_goal_area(vec![pt(15.0, 5.0)]);
        let waypoints = planner.plan().unwrap();
        assert_eq!(waypoints.len(), 4);
        assert!(waypoints[1].x < -0.5);
    }
}
