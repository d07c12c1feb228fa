//! Parametric line segment type.
//!
//! [`Segment`] stores an origin and a direction vector; the segment is
//! the point set `origin + t * direction` for `t` in `[0, 1]`. This
//! representation makes the per-axis plane evaluation and the
//! shorten-at-both-ends operation single expressions.

use super::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A line segment in parametric form: `{origin + t * direction, t in [0, 1]}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub origin: Point,
    pub direction: Point,
}

impl Segment {
    /// Create a segment from an origin and a direction vector.
    #[inline]
    pub const fn new(origin: Point, direction: Point) -> Self {
        Self { origin, direction }
    }

    /// Create the segment running from `a` to `b`.
    #[inline]
    pub fn between(a: Point, b: Point) -> Self {
        Self::new(a, b - a)
    }

    /// The far endpoint, `origin + direction`.
    #[inline]
    pub fn end(&self) -> Point {
        self.origin + self.direction
    }

    /// Segment length (3D).
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction.magnitude()
    }

    /// Reverse traversal direction. The geometric point set is unchanged.
    #[inline]
    pub fn flip(&self) -> Self {
        Self::new(self.end(), -self.direction)
    }

    /// Shorten the segment by `amount` millimetres at both ends.
    ///
    /// The origin advances along the direction by `amount` and the
    /// length shrinks by `2 * amount`. A zero-length segment is returned
    /// unchanged; callers that might shorten past the midpoint filter on
    /// [`Segment::length`] first.
    pub fn shorten_by(&self, amount: f64) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        let f = amount / len;
        Self::new(
            self.origin + self.direction * f,
            self.direction * (1.0 - 2.0 * f),
        )
    }

    /// Evaluate the point on the segment whose `axis` coordinate equals `v`.
    ///
    /// Solves `(v - origin.axis) / direction.axis = t` and returns
    /// `origin + t * direction` iff `t` lies in `[0, 1]`. A segment
    /// parallel to the queried axis plane (`direction.axis == 0`) yields
    /// `None` without dividing.
    pub fn point_at(&self, axis: Axis, v: f64) -> Option<Point> {
        let (o, d) = match axis {
            Axis::X => (self.origin.x, self.direction.x),
            Axis::Y => (self.origin.y, self.direction.y),
            Axis::Z => (self.origin.z, self.direction.z),
        };
        if d == 0.0 {
            return None;
        }
        let t = (v - o) / d;
        if (0.0..=1.0).contains(&t) {
            Some(self.origin + self.direction * t)
        } else {
            None
        }
    }

    /// 2D intersection of two segments, ignoring z.
    ///
    /// With segments `(P, r)` and `(Q, s)`: if `r × s = 0` the segments
    /// are parallel or collinear and there is no intersection. Otherwise
    /// `t = ((Q - P) × s) / (r × s)` and `u = ((Q - P) × r) / (r × s)`;
    /// the intersection exists iff both lie in `[0, 1]` (inclusive, so
    /// endpoint touches count) and equals `P + t * r`. The z coordinate
    /// of the result comes from this segment's parametrization.
    pub fn intersect_2d(&self, other: &Segment) -> Option<Point> {
        let r = self.direction;
        let s = other.direction;
        let denom = r.cross2(&s);
        if denom == 0.0 {
            return None;
        }
        let qp = other.origin - self.origin;
        let t = qp.cross2(&s) / denom;
        let u = qp.cross2(&r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.origin + r * t)
        } else {
            None
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.origin, self.end())
    }
}
