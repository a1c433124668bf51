use thiserror::Error;

/// Top-level error type for the path planner.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Errors raised while validating or growing obstacle polygons.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer than 3 non-collinear vertices remain.
    #[error("degenerate obstacle: {vertices} usable vertices, at least 3 non-collinear required")]
    DegenerateObstacle { vertices: usize },

    /// Vertex turns disagree in sign beyond tolerance.
    #[error("obstacle is not convex ({left_turns} left turns, {right_turns} right turns)")]
    NonConvexObstacle {
        left_turns: usize,
        right_turns: usize,
    },

    /// Adjacent edges are parallel or zero-length during edge-offset growth.
    #[error("degenerate edge at vertex {vertex} of shape {shape}")]
    DegenerateEdge { shape: usize, vertex: usize },
}

/// Errors related to the visibility graph.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("{0} area has no points")]
    EmptyArea(&'static str),

    #[error("visibility graph has not been built")]
    NotBuilt,

    #[error("node {index} is out of range (graph has {count} nodes)")]
    NodeOutOfRange { index: usize, count: usize },
}

/// Errors related to shortest-path search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("no path from start to goal")]
    NoPathFound,
}

/// Convenience type alias for results using [`PlannerError`].
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_errors_convert_into_planner_error() {
        let err: PlannerError = GeometryError::DegenerateEdge { shape: 2, vertex: 5 }.into();
        assert!(matches!(
            err,
            PlannerError::Geometry(GeometryError::DegenerateEdge { shape: 2, vertex: 5 })
        ));
        assert_eq!(err.to_string(), "degenerate edge at vertex 5 of shape 2");
    }

    #[test]
    fn search_error_message() {
        let err: PlannerError = SearchError::NoPathFound.into();
        assert_eq!(err.to_string(), "no path from start to goal");
    }
}
