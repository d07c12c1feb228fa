//! Pipeline - orchestrates the complete slicing process.
//!
//! mesh → normalization → layer extraction → contour chaining → G-code
//!
//! The per-layer slicing fans out over a rayon pool (layers are
//! independent); emission is a single sequential bottom-up pass because
//! the extrusion accountant carries state across the whole print.
//!
//! # Example
//!
//! ```rust,ignore
//! use fff_slicer::{SliceOptions, SlicePipeline};
//!
//! let pipeline = SlicePipeline::new(SliceOptions::default());
//! let gcode = pipeline.process(&mesh)?;
//! gcode.write_to_file("sampleGcode.g")?;
//! ```

use crate::config::{SliceOptions, BED_SIZE_X, BED_SIZE_Y};
use crate::gcode::{Emitter, GcodeProgram};
use crate::mesh::Mesh;
use crate::slice::slice_mesh;
use crate::{Error, Result};
use log::{debug, info};

/// The complete slicing pipeline.
pub struct SlicePipeline {
    options: SliceOptions,
}

impl SlicePipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: SliceOptions) -> Self {
        Self { options }
    }

    /// The pipeline options.
    pub fn options(&self) -> &SliceOptions {
        &self.options
    }

    /// Slice a mesh and emit the G-code program.
    pub fn process(&self, mesh: &Mesh) -> Result<GcodeProgram> {
        self.process_with_callback(mesh, |_, _| {})
    }

    /// Slice a mesh, reporting progress per stage.
    ///
    /// The callback receives a stage name (`"slicing"` or `"gcode"`)
    /// and a fraction in `[0, 1]`.
    pub fn process_with_callback<F>(&self, mesh: &Mesh, mut callback: F) -> Result<GcodeProgram>
    where
        F: FnMut(&str, f64),
    {
        if mesh.is_empty() {
            return Err(Error::Mesh("cannot slice an empty mesh".into()));
        }

        // Center over the bed, drop onto the build plate.
        let mut mesh = mesh.clone();
        mesh.center_on_bed(BED_SIZE_X, BED_SIZE_Y);
        debug!("normalized mesh, zmax = {}", mesh.max_z());

        callback("slicing", 0.0);
        let layers = slice_mesh(&mesh, self.options.thickness);
        callback("slicing", 1.0);

        if layers.is_empty() {
            return Err(Error::Slicing("no printable layers".into()));
        }
        info!("sliced {} layers", layers.len());

        let program = Emitter::new(&self.options)
            .emit_print_with_callback(&layers, |progress| callback("gcode", progress));

        info!(
            "emitted {} moves, {:.2} mm filament",
            program.stats.move_count, program.stats.filament_used_mm
        );
        Ok(program)
    }
}
