//! Support structure generation.
//!
//! Support covers the layer's bounding box (inset by 1 mm per side) with
//! the fixed 20% sparse raster, clipped against the box rectangle plus
//! the model contours so the lines land outside the model interior.
//! Every support segment is shortened at both ends so it does not fuse
//! into the model walls. Support is generated for every layer
//! identically; overhang detection is out of scope.

use crate::config::{DEFAULT_THICKNESS, SUPPORT_INFILL_PERCENT};
use crate::geometry::{Point, Segment};
use crate::infill::{clip_line_to_contours, sparse_cover};
use crate::mesh::BoundingBox;
use crate::slice::Contour;

/// Inset applied to the layer bounding box on every side (mm).
const BOX_INSET: f64 = 1.0;

/// Clearance trimmed off each end of a support segment (mm).
const END_TRIM: f64 = 2.0 * DEFAULT_THICKNESS;

/// Bounding box over all contours of a layer.
fn contours_bounding_box(contours: &[Contour]) -> BoundingBox {
    let mut bb = BoundingBox::empty();
    for contour in contours {
        for p in contour.points() {
            bb.include(p);
        }
    }
    bb
}

/// The support clipping region: the inset bounding-box rectangle at the
/// layer's z, if the inset leaves any area.
fn support_box(contours: &[Contour], z: f64) -> Option<Contour> {
    let bb = contours_bounding_box(contours);
    if !bb.is_defined() {
        return None;
    }
    let (x0, y0) = (bb.min.x + BOX_INSET, bb.min.y + BOX_INSET);
    let (x1, y1) = (bb.max.x - BOX_INSET, bb.max.y - BOX_INSET);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Contour::new(vec![
        Point::new(x0, y0, z),
        Point::new(x1, y0, z),
        Point::new(x1, y1, z),
        Point::new(x0, y1, z),
    ]))
}

/// Generate the support segments for one layer.
///
/// The 20% sparse pattern is clipped against the inset rectangle
/// together with the original contours, then every resulting segment is
/// shortened by [`END_TRIM`] at each end; segments too short to survive
/// the trim are dropped.
pub fn generate_support(contours: &[Contour], z: f64) -> Vec<Segment> {
    let Some(rect) = support_box(contours, z) else {
        return Vec::new();
    };

    let mut region = Vec::with_capacity(contours.len() + 1);
    region.push(rect);
    region.extend_from_slice(contours);

    sparse_cover(SUPPORT_INFILL_PERCENT, z)
        .iter()
        .flat_map(|line| clip_line_to_contours(line, &region))
        .filter(|seg| seg.length() > 2.0 * END_TRIM)
        .map(|seg| seg.shorten_by(END_TRIM))
        .collect()
}
