use crate::math::{point_to_segment_dist, Point2};

/// Circular obstacle discovered while driving, such as a sensed object.
///
/// Circles are not grown; they only cut visibility edges that pass within
/// `radius` of `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CircleObstacle {
    pub center: Point2,
    pub radius: f64,
}

impl CircleObstacle {
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Returns `true` if segment `p q` comes closer than `radius` to the
    /// center.
    #[must_use]
    pub fn blocks(&self, p: &Point2, q: &Point2) -> bool {
        point_to_segment_dist(&self.center, p, q) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_segments_within_radius() {
        let circle = CircleObstacle::new(Point2::new(5.0, 1.0), 2.0);
        assert!(circle.blocks(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0)));
        assert!(!circle.blocks(&Point2::new(0.0, 4.0), &Point2::new(10.0, 4.0)));
        // Closest approach is the segment end, 3 away.
        assert!(!circle.blocks(&Point2::new(0.0, 1.0), &Point2::new(2.0, 1.0)));
    }
}
