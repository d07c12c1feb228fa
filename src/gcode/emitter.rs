//! Layer-by-layer G-code emission.
//!
//! The emitter walks the layer plans bottom-up and serializes, per
//! layer: a travel to the layer's first contour point, the contour
//! walls, the infill raster and the support raster. One
//! [`ExtruderState`](super::ExtruderState) is threaded through the
//! whole print so the emitted E values are cumulative and monotone.

use super::{ExtruderState, GcodeProgram, Move};
use crate::config::SliceOptions;
use crate::geometry::{Point, Segment};
use crate::infill::generate_infill;
use crate::slice::{Contour, LayerPlan};
use crate::support::generate_support;

/// Serializes layer plans into G-code lines.
pub struct Emitter {
    options: SliceOptions,
    extruder: ExtruderState,
    lines: Vec<String>,
}

impl Emitter {
    /// Create an emitter for the given options.
    pub fn new(options: &SliceOptions) -> Self {
        Self {
            options: options.clone(),
            extruder: ExtruderState::new(options.thickness),
            lines: Vec::new(),
        }
    }

    /// Emit a complete print from bottom-up ordered layer plans.
    pub fn emit_print(self, layers: &[LayerPlan]) -> GcodeProgram {
        self.emit_print_with_callback(layers, |_| {})
    }

    /// Emit a complete print, reporting per-layer progress in `[0, 1]`.
    pub fn emit_print_with_callback<F>(mut self, layers: &[LayerPlan], mut callback: F) -> GcodeProgram
    where
        F: FnMut(f64),
    {
        let total = layers.len();
        for (i, layer) in layers.iter().enumerate() {
            self.emit_layer(layer, i == 0);
            callback((i + 1) as f64 / total.max(1) as f64);
        }
        GcodeProgram::new(self.lines, total)
    }

    fn push(&mut self, m: Move) {
        self.lines.push(m.to_gcode());
    }

    fn emit_travel(&mut self, target: Point) {
        self.push(Move::Travel { target });
    }

    /// Emit one contour: a positioning move to the first point, then
    /// cumulative extrusion moves through the remaining points and back
    /// to the first.
    fn emit_contour(&mut self, contour: &Contour) {
        let points = contour.points();
        let Some(&first) = points.first() else {
            return;
        };
        self.emit_travel(first);

        let mut prev = first;
        for &p in &points[1..] {
            let e = self.extruder.advance(&prev, &p);
            self.push(Move::Extrude { target: p, e });
            prev = p;
        }
        let e = self.extruder.advance(&prev, &first);
        self.push(Move::Extrude { target: first, e });
    }

    /// Emit a raster segment batch as travel/extrude pairs.
    ///
    /// Every other segment is reversed first so consecutive segments
    /// chain end-to-start, keeping the positioning hops short.
    fn emit_segments(&mut self, segments: &[Segment]) {
        for (i, segment) in segments.iter().enumerate() {
            let seg = if i % 2 == 1 { segment.flip() } else { *segment };
            self.emit_travel(seg.origin);
            let end = seg.end();
            let e = self.extruder.advance(&seg.origin, &end);
            self.push(Move::Extrude { target: end, e });
        }
    }

    fn emit_layer(&mut self, layer: &LayerPlan, first_layer: bool) {
        if !first_layer {
            if let Some(p) = layer.contours.first().and_then(Contour::first_point) {
                self.emit_travel(p);
            }
        }

        for contour in &layer.contours {
            self.emit_contour(contour);
        }

        let infill = generate_infill(
            &layer.contours,
            layer.layer_type(self.options.thickness),
            self.options.infill_percent,
            layer.z,
        );
        self.emit_segments(&infill);

        let support = generate_support(&layer.contours, layer.z);
        self.emit_segments(&support);
    }
}
