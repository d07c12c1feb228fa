//! Contour reconstruction.
//!
//! A layer's cross-section arrives as an unordered bag of 2-point
//! segments, one per facet crossing the plane. [`chain_contours`] stitches
//! them into closed polygons by repeated endpoint matching; the 5-decimal
//! rounding applied in the layer extractor makes the endpoint comparison
//! exact.

use crate::geometry::{Point, Segment};
use crate::mesh::BoundingBox;
use log::warn;

/// A closed polygonal cross-section of the solid at a fixed z.
///
/// The point sequence is cyclic: the path implicitly closes from the
/// last point back to the first. Consecutive points always differ.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Create a contour from an ordered point sequence.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The ordered points (closure back to the first point is implicit).
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first point, if any.
    #[inline]
    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The edges of the contour, including the closing edge.
    pub fn edges(&self) -> Vec<Segment> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| Segment::between(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// Axis-aligned bounding box over the contour points.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for p in &self.points {
            bb.include(p);
        }
        bb
    }
}

/// Chain an unordered bag of segments into closed contours.
///
/// Repeatedly starts a contour with an arbitrary pool segment and
/// extends it with any segment sharing an endpoint with the contour's
/// current tail, appending the segment's other endpoint. A chain whose
/// tail returns to its head is a closed contour; a chain that runs out
/// of matching segments first signals a malformed mesh and is dropped
/// with a warning. The pool strictly shrinks, so this always terminates.
pub fn chain_contours(segments: Vec<Segment>) -> Vec<Contour> {
    let mut pool: Vec<(Point, Point)> = segments
        .into_iter()
        .map(|s| (s.origin, s.end()))
        .collect();
    let mut contours = Vec::new();

    while let Some((head, next)) = pool.pop() {
        let mut chain = vec![head, next];

        loop {
            let tail = *chain.last().unwrap();
            let found = pool.iter().position(|&(a, b)| a == tail || b == tail);
            match found {
                Some(i) => {
                    let (a, b) = pool.swap_remove(i);
                    let other = if a == tail { b } else { a };
                    if other != tail {
                        chain.push(other);
                    }
                }
                None => break,
            }
        }

        if chain.len() > 3 && chain.first() == chain.last() {
            chain.pop();
            contours.push(Contour::new(chain));
        } else {
            warn!(
                "discarding unclosed chain of {} points at z={}",
                chain.len(),
                head.z
            );
        }
    }

    contours
}
