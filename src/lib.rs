//! # fff-slicer
//!
//! An ASCII-STL to G-code slicer for fused-filament-fabrication printers.
//!
//! The library implements the full slicing pipeline:
//! - ASCII STL parsing and mesh normalization (centering over the bed)
//! - Layer extraction by plane/facet intersection
//! - Contour reconstruction from unordered cross-section segments
//! - Diagonal raster infill with per-layer pattern selection
//! - Uniform support with trimmed line ends
//! - G-code emission with a monotone cumulative extruder value
//!
//! ## Example
//!
//! ```rust,ignore
//! use fff_slicer::{load_stl, SliceOptions, SlicePipeline};
//!
//! let mesh = load_stl("model.stl")?;
//! let pipeline = SlicePipeline::new(SliceOptions::default());
//! let gcode = pipeline.process(&mesh)?;
//! gcode.write_to_file("sampleGcode.g")?;
//! ```

pub mod config;
pub mod gcode;
pub mod geometry;
pub mod infill;
pub mod mesh;
pub mod pipeline;
pub mod slice;
pub mod support;

// Re-export commonly used types
pub use config::{
    SliceOptions, BED_SIZE_X, BED_SIZE_Y, DEFAULT_BOTTOM_TOP_THICKNESS, DEFAULT_INFILL_PERCENT,
    DEFAULT_PERIMETER_LAYERS, DEFAULT_THICKNESS, FILAMENT_DIAMETER, LINE_THICKNESS,
    NOZZLE_DIAMETER, SUPPORT_INFILL_PERCENT,
};
pub use gcode::{parse_last_e, Emitter, ExtruderState, GcodeProgram, Move, PrintStats};
pub use geometry::{Axis, Point, Segment};
pub use infill::generate_infill;
pub use mesh::{load_stl, parse_stl, BoundingBox, Facet, Mesh};
pub use pipeline::SlicePipeline;
pub use slice::{chain_contours, classify_layer, slice_mesh, Contour, LayerPlan, LayerType};
pub use support::generate_support;

/// Scale factor for 5-decimal coordinate rounding.
///
/// All coordinates produced by the slicing pipeline are rounded to 5
/// decimal places so that floating-point endpoints produced by adjacent
/// facets compare exactly equal when chaining contours.
pub const ROUND_FACTOR: f64 = 100_000.0;

/// Round a coordinate to 5 decimal places.
#[inline]
pub fn round_coord(v: f64) -> f64 {
    // The `+ 0.0` folds -0.0 into 0.0 so it never reaches the output.
    (v * ROUND_FACTOR).round() / ROUND_FACTOR + 0.0
}

/// Result type used throughout the slicer.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for slicer operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("STL error: {0}")]
    Stl(String),

    #[error("Mesh error: {0}")]
    Mesh(String),

    #[error("Slicing error: {0}")]
    Slicing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(1.000004), 1.0);
        assert_eq!(round_coord(1.000006), 1.00001);
        assert_eq!(round_coord(-0.123456789), -0.12346);

        // Values produced by two different computations of the same
        // geometric point must compare exactly equal after rounding.
        let a = 0.1 + 0.2;
        let b = 0.3;
        assert_ne!(a, b);
        assert_eq!(round_coord(a), round_coord(b));
    }
}
