//! Triangle mesh types.
//!
//! This module provides [`Facet`] (one triangle of the input surface),
//! [`Mesh`] (the facet soup parsed from an STL file), the axis-aligned
//! [`BoundingBox`], and the bed-centering normalization applied before
//! slicing.

mod stl;

pub use stl::{load_stl, parse_stl};

use crate::geometry::{Point, Segment};
use serde::{Deserialize, Serialize};

/// One triangle of the input surface mesh.
///
/// Facets are immutable after parsing; the three directed edges are
/// recoverable from the vertex order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    vertices: [Point; 3],
}

impl Facet {
    /// Create a facet from three vertices.
    #[inline]
    pub const fn new(vertices: [Point; 3]) -> Self {
        Self { vertices }
    }

    /// The three vertices.
    #[inline]
    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    /// The three directed edges, closing back to the first vertex.
    #[inline]
    pub fn edges(&self) -> [Segment; 3] {
        let [a, b, c] = self.vertices;
        [
            Segment::between(a, b),
            Segment::between(b, c),
            Segment::between(c, a),
        ]
    }

    /// Translate the facet by a vector.
    #[inline]
    pub fn translated(&self, v: Point) -> Facet {
        Facet::new([
            self.vertices[0] + v,
            self.vertices[1] + v,
            self.vertices[2] + v,
        ])
    }
}

/// An axis-aligned 3D bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// An empty (undefined) bounding box; grows as points are included.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Whether at least one point has been included.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.min.x <= self.max.x
    }

    /// Grow the box to include a point.
    pub fn include(&mut self, p: &Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Center of the box in the xy-plane (z is taken from min).
    pub fn center_xy(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            self.min.z,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// A triangle mesh: the unordered collection of facets from an STL file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    facets: Vec<Facet>,
}

impl Mesh {
    /// Create a mesh from facets.
    pub fn new(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// The facets.
    #[inline]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Number of facets.
    #[inline]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Whether the mesh has no facets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Compute the axis-aligned bounding box over all vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for facet in &self.facets {
            for v in facet.vertices() {
                bb.include(v);
            }
        }
        bb
    }

    /// Maximum z over all vertices.
    pub fn max_z(&self) -> f64 {
        self.bounding_box().max.z
    }

    /// Center the mesh over the bed and drop it onto the build plate.
    ///
    /// Shifts every facet so the xy-center of the bounding box lands on
    /// `(bed_x / 2, bed_y / 2)` and the minimum z lands on 0.
    pub fn center_on_bed(&mut self, bed_x: f64, bed_y: f64) {
        let bb = self.bounding_box();
        if !bb.is_defined() {
            return;
        }
        let center = bb.center_xy();
        let shift = Point::new(
            bed_x / 2.0 - center.x,
            bed_y / 2.0 - center.y,
            -bb.min.z,
        );
        for facet in &mut self.facets {
            *facet = facet.translated(shift);
        }
    }
}
