//! Infill pattern generation.
//!
//! Infill is produced by clipping diagonal raster line families, defined
//! over the whole bed, against the layer's contours:
//! - up-diagonal lines (slope +1) for `BaseEven` shell layers
//! - down-diagonal lines (slope -1) for `BaseOdd` shell layers
//! - a sparse cover of both families for `Middle` layers, keeping every
//!   n-th line for the configured density
//!
//! # Clipping
//!
//! A raster line is intersected with every contour edge; the hits are
//! rounded, de-duplicated and sorted along the line. Taken pairwise,
//! consecutive hits alternate between interior and exterior spans of a
//! simple polygon, so the even-indexed pairs are the covered segments.
//! A raster line coincident with a contour edge contributes nothing:
//! parallel segments do not intersect.

use crate::config::{BED_SIZE_X, BED_SIZE_Y, LINE_THICKNESS};
use crate::geometry::{Point, Segment};
use crate::slice::{Contour, LayerType};
use std::cmp::Ordering;

/// Length of a diagonal raster line: enough to cross the whole bed in
/// either diagonal direction.
fn raster_extent() -> f64 {
    BED_SIZE_X + BED_SIZE_Y
}

/// The up-diagonal raster family at height `z`.
///
/// Lines start at `(0, v, z)` with direction `(ext, ext, 0)` for `v`
/// from `-BED_SIZE_X` to `BED_SIZE_Y` in steps of [`LINE_THICKNESS`].
pub fn up_diagonals(z: f64) -> Vec<Segment> {
    let ext = raster_extent();
    let direction = Point::new(ext, ext, 0.0);
    let steps = (raster_extent() / LINE_THICKNESS) as usize;
    (0..=steps)
        .map(|k| {
            let v = -BED_SIZE_X + k as f64 * LINE_THICKNESS;
            Segment::new(Point::new(0.0, v, z), direction)
        })
        .collect()
}

/// The down-diagonal raster family at height `z`.
///
/// Lines start at `(0, v, z)` with direction `(ext, -ext, 0)` for `v`
/// from 0 to `BED_SIZE_X + BED_SIZE_Y` in steps of [`LINE_THICKNESS`].
pub fn down_diagonals(z: f64) -> Vec<Segment> {
    let ext = raster_extent();
    let direction = Point::new(ext, -ext, 0.0);
    let steps = (raster_extent() / LINE_THICKNESS) as usize;
    (0..=steps)
        .map(|k| {
            let v = k as f64 * LINE_THICKNESS;
            Segment::new(Point::new(0.0, v, z), direction)
        })
        .collect()
}

/// Sparse cover: both diagonal families thinned to the given density.
///
/// Keeps every `n = max(1, 100 / percent)`-th line of each family
/// (integer division). Zero percent means no infill at all; the guard
/// short-circuits before the division.
pub fn sparse_cover(percent: u32, z: f64) -> Vec<Segment> {
    if percent == 0 {
        return Vec::new();
    }
    let n = (100 / percent as usize).max(1);
    let thin = |family: Vec<Segment>| {
        family
            .into_iter()
            .step_by(n)
            .collect::<Vec<_>>()
    };
    let mut cover = thin(up_diagonals(z));
    cover.extend(thin(down_diagonals(z)));
    cover
}

/// Select the raster pattern for a layer.
pub fn pattern_for_layer(layer_type: LayerType, infill_percent: u32, z: f64) -> Vec<Segment> {
    match layer_type {
        LayerType::BaseEven => up_diagonals(z),
        LayerType::BaseOdd => down_diagonals(z),
        LayerType::Middle => sparse_cover(infill_percent, z),
    }
}

/// Order points along a raster line: x primary, y secondary.
fn compare_along_line(a: &Point, b: &Point) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Clip one raster line against a set of contours.
///
/// Returns the interior sub-segments of the line: the even-indexed
/// pairs of the sorted, de-duplicated crossing points.
pub fn clip_line_to_contours(line: &Segment, contours: &[Contour]) -> Vec<Segment> {
    let mut hits: Vec<Point> = Vec::new();
    for contour in contours {
        for edge in contour.edges() {
            if let Some(p) = line.intersect_2d(&edge) {
                let p = p.rounded();
                if !hits.contains(&p) {
                    hits.push(p);
                }
            }
        }
    }
    hits.sort_by(compare_along_line);

    hits.chunks_exact(2)
        .map(|pair| Segment::between(pair[0], pair[1]))
        .collect()
}

/// Generate the infill segments for one layer.
pub fn generate_infill(
    contours: &[Contour],
    layer_type: LayerType,
    infill_percent: u32,
    z: f64,
) -> Vec<Segment> {
    pattern_for_layer(layer_type, infill_percent, z)
        .iter()
        .flat_map(|line| clip_line_to_contours(line, contours))
        .collect()
}
