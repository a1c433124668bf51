use crate::math::{line_rside, segment_enters_convex, segments_intersect, Point2};
use crate::world::{ObstacleModel, Shape, ShapeId};

/// Outcome of a line-of-sight test between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sight {
    Visible,
    Blocked,
    /// One end lies strictly inside a grown obstacle and sees nothing.
    Interior,
}

impl Sight {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Sight::Visible
    }
}

/// Returns the grown shape that strictly contains `p`, if any.
///
/// Points on a shape's boundary (within `eps`) are not contained.
#[must_use]
pub fn enclosing_shape(model: &ObstacleModel, p: &Point2, eps: f64) -> Option<ShapeId> {
    let gv = model.grown_vertices();
    model
        .grown_shapes()
        .iter()
        .position(|shape| {
            shape
                .edges()
                .all(|(a, b)| line_rside(p, &gv[a].point, &gv[b].point, eps).is_left())
        })
        .map(ShapeId)
}

/// Returns `true` if segment `p q` crosses no grown edge and does not pass
/// through the interior of any grown shape.
///
/// Touching a shape at a vertex or running along one of its edges is
/// allowed.
#[must_use]
pub fn segment_clear(model: &ObstacleModel, p: &Point2, q: &Point2, eps: f64) -> bool {
    let gv = model.grown_vertices();
    model.grown_shapes().iter().all(|shape| {
        let crosses = shape
            .edges()
            .any(|(a, b)| segments_intersect(p, q, &gv[a].point, &gv[b].point, eps));
        !crosses && !enters_interior(model, shape, p, q, eps)
    })
}

/// Returns `true` if some part of segment `p q` lies more than `eps` inside
/// grown `shape`.
#[must_use]
pub fn enters_interior(
    model: &ObstacleModel,
    shape: &Shape,
    p: &Point2,
    q: &Point2,
    eps: f64,
) -> bool {
    let gv = model.grown_vertices();
    let edges = shape.edges().map(|(a, b)| (gv[a].point, gv[b].point));
    segment_enters_convex(p, q, edges, eps)
}
