use std::ops::BitAnd;

use super::Point2;

/// Side of a line a point lies on, as bit flags.
///
/// A point within tolerance of the line is on [`Side::BOTH`], which shares a
/// flag with either side. Segment tests rely on this to let touching
/// endpoints through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Side(u8);

impl Side {
    pub const LEFT: Side = Side(0b01);
    pub const RIGHT: Side = Side(0b10);
    pub const BOTH: Side = Side(0b11);

    /// Returns `true` when the two classifications have a flag in common.
    #[inline]
    #[must_use]
    pub fn shares(self, other: Side) -> bool {
        self.0 & other.0 != 0
    }

    /// Swaps `LEFT` and `RIGHT`; `BOTH` is unchanged.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Side {
        Side(((self.0 & 0b01) << 1) | ((self.0 & 0b10) >> 1))
    }

    /// Strictly left (not collinear).
    #[inline]
    #[must_use]
    pub fn is_left(self) -> bool {
        self == Side::LEFT
    }
}

impl BitAnd for Side {
    type Output = bool;

    fn bitand(self, rhs: Side) -> bool {
        self.shares(rhs)
    }
}

/// Returns `true` if `a` comes before `b` when walking a line "upward":
/// by y, or by x when the two are level within `eps`.
#[inline]
#[must_use]
pub fn precedes(a: &Point2, b: &Point2, eps: f64) -> bool {
    if (a.y - b.y).abs() < eps {
        a.x <= b.x
    } else {
        a.y < b.y
    }
}

/// Classifies `pt` against the undirected line through `p` and `q`.
///
/// Sides are named as seen walking the line upward (rightward when the line
/// is horizontal), so swapping `p` and `q` never changes the result. A
/// horizontal line compares y only; otherwise x is compared with the line's
/// x at `pt.y`. Ties within `eps` are [`Side::BOTH`].
#[must_use]
pub fn orientation(pt: &Point2, p: &Point2, q: &Point2, eps: f64) -> Side {
    let (a, b) = if precedes(p, q, eps) { (p, q) } else { (q, p) };

    if (b.y - a.y).abs() < eps {
        return if pt.y > a.y + eps {
            Side::LEFT
        } else if pt.y < a.y - eps {
            Side::RIGHT
        } else {
            Side::BOTH
        };
    }

    let x = a.x + (b.x - a.x) * (pt.y - a.y) / (b.y - a.y);
    if pt.x < x - eps {
        Side::LEFT
    } else if pt.x > x + eps {
        Side::RIGHT
    } else {
        Side::BOTH
    }
}

/// Classifies `pt` against the directed line `p -> q`.
///
/// Same as [`orientation`] with `LEFT`/`RIGHT` swapped when `p` comes after
/// `q`, so `LEFT` is the walker's left going from `p` to `q`.
#[must_use]
pub fn line_rside(pt: &Point2, p: &Point2, q: &Point2, eps: f64) -> Side {
    let side = orientation(pt, p, q, eps);
    if precedes(p, q, eps) {
        side
    } else {
        side.flipped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn flags() {
        assert!(Side::LEFT.shares(Side::BOTH));
        assert!(Side::RIGHT & Side::BOTH);
        assert!(!(Side::LEFT & Side::RIGHT));
        assert_eq!(Side::LEFT.flipped(), Side::RIGHT);
        assert_eq!(Side::BOTH.flipped(), Side::BOTH);
    }

    #[test]
    fn orientation_ignores_endpoint_order() {
        let p = pt(0.0, 0.0);
        let q = pt(3.0, 7.0);
        for c in [pt(-1.0, 2.0), pt(5.0, 1.0), pt(1.5, 3.5)] {
            assert_eq!(
                orientation(&c, &p, &q, EPSILON),
                orientation(&c, &q, &p, EPSILON)
            );
        }
        assert_eq!(orientation(&pt(1.5, 3.5), &p, &q, EPSILON), Side::BOTH);
    }

    #[test]
    fn horizontal_line_compares_y() {
        let p = pt(0.0, 5.0);
        let q = pt(10.0, 5.0);
        assert_eq!(orientation(&pt(50.0, 6.0), &p, &q, EPSILON), Side::LEFT);
        assert_eq!(orientation(&pt(-50.0, 4.0), &p, &q, EPSILON), Side::RIGHT);
        assert_eq!(orientation(&pt(42.0, 5.0), &p, &q, EPSILON), Side::BOTH);
    }

    #[test]
    fn vertical_line_compares_x() {
        let p = pt(2.0, 0.0);
        let q = pt(2.0, 10.0);
        assert_eq!(orientation(&pt(1.0, 20.0), &p, &q, EPSILON), Side::LEFT);
        assert_eq!(orientation(&pt(3.0, -4.0), &p, &q, EPSILON), Side::RIGHT);
    }

    #[test]
    fn rside_follows_direction() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);
        let above = pt(5.0, 1.0);
        assert_eq!(line_rside(&above, &a, &b, EPSILON), Side::LEFT);
        assert_eq!(line_rside(&above, &b, &a, EPSILON), Side::RIGHT);

        let c = pt(0.0, 10.0);
        let right = pt(1.0, 5.0);
        assert_eq!(line_rside(&right, &a, &c, EPSILON), Side::RIGHT);
        assert_eq!(line_rside(&right, &c, &a, EPSILON), Side::LEFT);
    }

    #[test]
    fn rside_matches_cross_product_sign() {
        let p = pt(-3.0, 4.0);
        let q = pt(6.0, -2.0);
        for c in [pt(0.0, 0.0), pt(10.0, 10.0), pt(-10.0, -10.0), pt(2.0, 5.0)] {
            let z = crate::math::cross(&p, &q, &c);
            let expected = if z > 0.0 { Side::LEFT } else { Side::RIGHT };
            assert_eq!(line_rside(&c, &p, &q, EPSILON), expected, "c={c}");
        }
    }
}
