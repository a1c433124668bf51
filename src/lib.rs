pub mod collections;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod math;
pub mod operations;
pub mod planner;
pub mod search;
pub mod world;

pub use config::{GrowStrategy, MergePolicy, PlannerConfig, RobotFootprint};
pub use error::{PlannerError, Result};
pub use graph::{CircleObstacle, VisibilityGraph};
pub use math::Point2;
pub use planner::Planner;
pub use search::{find_path, Path, PathCursor};
pub use world::{ObstacleModel, ShapeId};
