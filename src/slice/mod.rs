//! Layer extraction - converts a mesh into per-layer contours.
//!
//! This module contains the core slicing functionality:
//! - [`facet_cross_section`] - plane/facet intersection with the trim rule
//! - [`cross_section_segments`] - the unordered segment bag at one z
//! - [`chain_contours`] / [`Contour`] - closed polygon reconstruction
//! - [`LayerType`] / [`classify_layer`] - solid-shell vs. sparse layers
//! - [`slice_mesh`] - the parallel slicing driver producing [`LayerPlan`]s
//!
//! Layers are enumerated top-down (`zmax, zmax - t, ...`, stopping at 0)
//! and reversed once at the end, so the returned plans are ordered
//! bottom-up the way the emitter consumes them.

mod contour;

pub use contour::{chain_contours, Contour};

use crate::config::DEFAULT_BOTTOM_TOP_THICKNESS;
use crate::geometry::{Axis, Point, Segment};
use crate::mesh::{Facet, Mesh};
use crate::round_coord;
use rayon::prelude::*;

/// Infill pattern class for one layer.
///
/// Bottom and top shells alternate two orthogonal full rasters
/// (`BaseOdd` / `BaseEven`); interior layers get the sparse pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerType {
    /// Solid shell layer with an odd bottom index: full down-diagonal raster.
    BaseOdd,
    /// Solid shell layer with an even bottom index: full up-diagonal raster.
    BaseEven,
    /// Interior layer: sparse raster at the configured infill percentage.
    Middle,
}

/// Classify a layer by its 1-based indices from the bottom and the top.
///
/// A layer within `round(0.8 mm / thickness)` layers of either end of
/// the print is a solid shell layer; its raster direction alternates
/// with the parity of the bottom index. Everything else is `Middle`.
pub fn classify_layer(from_start: usize, to_end: usize, thickness: f64) -> LayerType {
    let top_bottom_layers = (DEFAULT_BOTTOM_TOP_THICKNESS / thickness).round() as usize;
    if from_start <= top_bottom_layers || to_end <= top_bottom_layers {
        if from_start % 2 == 0 {
            LayerType::BaseEven
        } else {
            LayerType::BaseOdd
        }
    } else {
        LayerType::Middle
    }
}

/// Intersect one facet with the plane `z = v`.
///
/// Evaluates all three edges, rounds the hits to 5 decimal places and
/// de-duplicates them. Fewer than 2 distinct points (a single-vertex
/// touch, or no crossing at all) is not a cross-section and yields
/// `None`.
pub fn facet_cross_section(facet: &Facet, z: f64) -> Option<Vec<Point>> {
    let mut points: Vec<Point> = Vec::with_capacity(3);
    for edge in facet.edges() {
        if let Some(p) = edge.point_at(Axis::Z, z) {
            let p = p.rounded();
            if !points.contains(&p) {
                points.push(p);
            }
        }
    }
    if points.len() < 2 {
        None
    } else {
        Some(points)
    }
}

/// The unordered bag of cross-section segments at one z plane.
///
/// Each contributing facet yields the segment between the first and
/// last of its retained intersection points.
pub fn cross_section_segments(mesh: &Mesh, z: f64) -> Vec<Segment> {
    mesh.facets()
        .iter()
        .filter_map(|facet| {
            let points = facet_cross_section(facet, z)?;
            Some(Segment::between(points[0], *points.last().unwrap()))
        })
        .collect()
}

/// Enumerate layer z values top-down: `zmax, zmax - t, ...`, stopping
/// before the first value at or below 0. Values are rounded to 5
/// decimals so they match the rounded contour coordinates exactly.
pub fn layer_zs(zmax: f64, thickness: f64) -> Vec<f64> {
    let mut zs = Vec::new();
    if !(thickness > 0.0) || !zmax.is_finite() {
        return zs;
    }
    let mut k = 0u32;
    loop {
        let z = round_coord(zmax - f64::from(k) * thickness);
        if z <= 0.0 {
            break;
        }
        zs.push(z);
        k += 1;
    }
    zs
}

/// The per-layer slicing result consumed by the emitter.
#[derive(Clone, Debug)]
pub struct LayerPlan {
    /// Closed contours of the solid at this z.
    pub contours: Vec<Contour>,
    /// Plane height in mm.
    pub z: f64,
    /// 1-based layer index counted from the bottom of the print.
    pub from_bottom: usize,
    /// 1-based layer index counted from the top of the print.
    pub from_top: usize,
}

impl LayerPlan {
    /// The infill pattern class for this layer.
    pub fn layer_type(&self, thickness: f64) -> LayerType {
        classify_layer(self.from_bottom, self.from_top, thickness)
    }
}

/// Slice a mesh into bottom-up ordered layer plans.
///
/// Layers are independent and sliced in parallel; planes that intersect
/// no facet, or whose segments yield no closed contour, are discarded
/// before the bottom/top indices are assigned.
pub fn slice_mesh(mesh: &Mesh, thickness: f64) -> Vec<LayerPlan> {
    let zs = layer_zs(mesh.max_z(), thickness);

    let mut sliced: Vec<(f64, Vec<Contour>)> = zs
        .par_iter()
        .map(|&z| (z, chain_contours(cross_section_segments(mesh, z))))
        .collect();

    sliced.retain(|(_, contours)| !contours.is_empty());
    sliced.reverse();

    let count = sliced.len();
    sliced
        .into_iter()
        .enumerate()
        .map(|(i, (z, contours))| LayerPlan {
            contours,
            z,
            from_bottom: i + 1,
            from_top: count - i,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_cross_section_two_points() {
        // Triangle rising from z=0 to z=1; the plane at z=0.5 crosses
        // two edges.
        let facet = Facet::new([
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        ]);
        let points = facet_cross_section(&facet, 0.5).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.contains(&Point::new(0.5, 0.0, 0.5)));
        assert!(points.contains(&Point::new(0.0, 0.5, 0.5)));
    }

    #[test]
    fn test_facet_cross_section_vertex_touch_is_dropped() {
        // The plane grazes the facet at a single vertex.
        let facet = Facet::new([
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ]);
        assert!(facet_cross_section(&facet, 1.0).is_none());
    }

    #[test]
    fn test_facet_cross_section_coplanar_is_dropped() {
        // A facet lying in the plane: all edges are parallel to it.
        let facet = Facet::new([
            Point::new(0.0, 0.0, 0.5),
            Point::new(1.0, 0.0, 0.5),
            Point::new(0.0, 1.0, 0.5),
        ]);
        assert!(facet_cross_section(&facet, 0.5).is_none());
    }

    #[test]
    fn test_facet_cross_section_never_one_point() {
        // Sweep planes across a generic facet: the distinct point count
        // is always 0, 2 or 3, never 1.
        let facet = Facet::new([
            Point::new(0.3, 0.1, 0.0),
            Point::new(1.7, 0.2, 0.73),
            Point::new(0.9, 1.4, 1.21),
        ]);
        let mut v = 0.0;
        while v <= 1.3 {
            if let Some(points) = facet_cross_section(&facet, v) {
                assert!(points.len() == 2 || points.len() == 3);
            }
            v += 0.01;
        }
    }

    #[test]
    fn test_layer_zs() {
        let zs = layer_zs(1.0, 0.2);
        assert_eq!(zs, vec![1.0, 0.8, 0.6, 0.4, 0.2]);

        // A z extent equal to one layer thickness gives exactly one layer.
        assert_eq!(layer_zs(0.2, 0.2), vec![0.2]);

        // Nothing above the plate, nothing to slice.
        assert!(layer_zs(0.0, 0.2).is_empty());
    }

    #[test]
    fn test_classify_layer() {
        // thickness 0.2 -> 4 solid shell layers at each end
        assert_eq!(classify_layer(1, 10, 0.2), LayerType::BaseOdd);
        assert_eq!(classify_layer(2, 9, 0.2), LayerType::BaseEven);
        assert_eq!(classify_layer(4, 7, 0.2), LayerType::BaseEven);
        assert_eq!(classify_layer(5, 6, 0.2), LayerType::Middle);
        assert_eq!(classify_layer(6, 5, 0.2), LayerType::Middle);
        // near the top the bottom index decides the parity
        assert_eq!(classify_layer(7, 4, 0.2), LayerType::BaseOdd);
        assert_eq!(classify_layer(8, 3, 0.2), LayerType::BaseEven);
    }

    #[test]
    fn test_classify_single_layer_print() {
        // A one-layer print is a boundary layer with an odd bottom index.
        assert_eq!(classify_layer(1, 1, 0.2), LayerType::BaseOdd);
    }

    fn quad(a: Point, b: Point, c: Point, d: Point) -> [Facet; 2] {
        [Facet::new([a, b, c]), Facet::new([a, c, d])]
    }

    /// An axis-aligned cuboid built from 12 facets.
    fn cuboid(min: Point, max: Point) -> Mesh {
        let p = |x: f64, y: f64, z: f64| Point::new(x, y, z);
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        let mut facets = Vec::new();
        // bottom, top
        facets.extend(quad(p(x0, y0, z0), p(x1, y0, z0), p(x1, y1, z0), p(x0, y1, z0)));
        facets.extend(quad(p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)));
        // sides
        facets.extend(quad(p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)));
        facets.extend(quad(p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)));
        facets.extend(quad(p(x1, y1, z0), p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1)));
        facets.extend(quad(p(x0, y1, z0), p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1)));
        Mesh::new(facets)
    }

    #[test]
    fn test_slice_mesh_cube() {
        let mesh = cuboid(Point::zero(), Point::new(1.0, 1.0, 1.0));
        let layers = slice_mesh(&mesh, 0.2);

        assert_eq!(layers.len(), 5);
        for (i, layer) in layers.iter().enumerate() {
            assert_eq!(layer.from_bottom, i + 1);
            assert_eq!(layer.from_top, layers.len() - i);
            assert_eq!(layer.contours.len(), 1);
            // every contour point sits exactly on the layer plane
            for p in layer.contours[0].points() {
                assert_eq!(p.z, layer.z);
            }
        }

        // bottom-up ordering
        assert!((layers[0].z - 0.2).abs() < 1e-9);
        assert!((layers[4].z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_chain_closure_endpoint_parity() {
        // Every endpoint of the segment bag appears exactly twice across
        // the union of all contours of a well-formed layer.
        let mesh = cuboid(Point::zero(), Point::new(1.0, 1.0, 1.0));
        let segments = cross_section_segments(&mesh, 0.6);
        let contours = chain_contours(segments.clone());
        assert_eq!(contours.len(), 1);

        for seg in &segments {
            for endpoint in [seg.origin, seg.end()] {
                // Each endpoint becomes exactly one contour vertex, where
                // it terminates two edges of the closed polygon.
                let occurrences: usize = contours
                    .iter()
                    .map(|c| c.points().iter().filter(|&&q| q == endpoint).count())
                    .sum();
                assert_eq!(occurrences, 1, "endpoint {:?} not matched exactly", endpoint);
            }
        }
    }
}
