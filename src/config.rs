//! Planner configuration.

use crate::math::{Point2, Vector2, EPSILON};

/// Width and length of the default robot footprint (mm).
pub const DEFAULT_ROBOT_SIZE: (f64, f64) = (370.0, 550.0);

/// Diagonal of the default footprint, used as the edge-offset distance.
pub const DEFAULT_ROBOT_DIAMETER: f64 = 662.872_536_767_062;

/// Safety margin applied to the footprint before growing.
pub const DEFAULT_FOOTPRINT_SCALE: f64 = 1.6;

/// Robot outline in robot-local coordinates.
///
/// Growing translates the outline so that `reference` sits on each obstacle
/// vertex; the robot never rotates.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotFootprint {
    corners: Vec<Point2>,
    reference: Point2,
}

impl RobotFootprint {
    /// Creates a footprint from its corner points and reference point.
    #[must_use]
    pub fn new(corners: Vec<Point2>, reference: Point2) -> Self {
        Self { corners, reference }
    }

    /// Axis-aligned `width x length` rectangle referenced at its center.
    #[must_use]
    pub fn rectangle(width: f64, length: f64) -> Self {
        Self::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(width, 0.0),
                Point2::new(width, length),
                Point2::new(0.0, length),
            ],
            Point2::new(width / 2.0, length / 2.0),
        )
    }

    /// A robot that occupies a single point.
    #[must_use]
    pub fn point() -> Self {
        Self::new(vec![Point2::origin()], Point2::origin())
    }

    #[must_use]
    pub fn corners(&self) -> &[Point2] {
        &self.corners
    }

    #[must_use]
    pub fn reference(&self) -> Point2 {
        self.reference
    }

    /// Corner offsets from the reference point, multiplied by `scale`.
    #[must_use]
    pub fn offsets(&self, scale: f64) -> Vec<Vector2> {
        self.corners
            .iter()
            .map(|c| (c - self.reference) * scale)
            .collect()
    }
}

impl Default for RobotFootprint {
    fn default() -> Self {
        Self::rectangle(DEFAULT_ROBOT_SIZE.0, DEFAULT_ROBOT_SIZE.1)
    }
}

/// How obstacles are expanded by the robot footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowStrategy {
    /// Minkowski sum with the scaled footprint, then convex hull.
    Minkowski,
    /// Shift every edge outward by `distance` and intersect neighbours.
    EdgeOffset { distance: f64 },
}

/// How often the merge pass over grown obstacles runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// Repeat until a pass merges nothing.
    FixedPoint,
    /// Run one pass.
    SinglePass,
    /// Keep overlapping grown obstacles separate.
    Disabled,
}

/// Configuration for [`Planner`](crate::planner::Planner).
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Tolerance for collinearity and near-zero tests.
    /// Default: [`EPSILON`]
    pub epsilon: f64,

    /// Robot outline used by [`GrowStrategy::Minkowski`].
    /// Default: 370 x 550 rectangle referenced at its center
    pub footprint: RobotFootprint,

    /// Multiplier applied to the footprint before growing.
    /// Default: 1.6
    pub footprint_scale: f64,

    /// Default: [`GrowStrategy::Minkowski`]
    pub grow_strategy: GrowStrategy,

    /// Default: [`MergePolicy::FixedPoint`]
    pub merge_policy: MergePolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            footprint: RobotFootprint::default(),
            footprint_scale: DEFAULT_FOOTPRINT_SCALE,
            grow_strategy: GrowStrategy::Minkowski,
            merge_policy: MergePolicy::FixedPoint,
        }
    }
}

impl PlannerConfig {
    /// Builder-style setter for the geometric tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder-style setter for the footprint and its scale.
    #[must_use]
    pub fn with_footprint(mut self, footprint: RobotFootprint, scale: f64) -> Self {
        self.footprint = footprint;
        self.footprint_scale = scale;
        self
    }

    /// Builder-style setter for the growth strategy.
    #[must_use]
    pub fn with_grow_strategy(mut self, strategy: GrowStrategy) -> Self {
        self.grow_strategy = strategy;
        self
    }

    /// Builder-style setter for the merge policy.
    #[must_use]
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_footprint_is_centered_rectangle() {
        let fp = RobotFootprint::default();
        assert_eq!(fp.corners().len(), 4);
        assert_eq!(fp.reference(), Point2::new(185.0, 275.0));
        let offsets = fp.offsets(2.0);
        assert_eq!(offsets[0], Vector2::new(-370.0, -550.0));
        assert_eq!(offsets[2], Vector2::new(370.0, 550.0));
    }

    #[test]
    fn default_diameter_matches_footprint_diagonal() {
        let (w, l) = DEFAULT_ROBOT_SIZE;
        assert!((w.hypot(l) - DEFAULT_ROBOT_DIAMETER).abs() < 1e-9);
    }

    #[test]
    fn builders() {
        let cfg = PlannerConfig::default()
            .with_epsilon(1e-6)
            .with_footprint(RobotFootprint::point(), 0.0)
            .with_merge_policy(MergePolicy::SinglePass)
            .with_grow_strategy(GrowStrategy::EdgeOffset { distance: 5.0 });
        assert!((cfg.epsilon - 1e-6).abs() < f64::EPSILON);
        assert_eq!(cfg.footprint.offsets(1.0), vec![Vector2::zeros()]);
        assert_eq!(cfg.merge_policy, MergePolicy::SinglePass);
        assert_eq!(
            cfg.grow_strategy,
            GrowStrategy::EdgeOffset { distance: 5.0 }
        );
    }
}
