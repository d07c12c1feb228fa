//! Slicing configuration.
//!
//! This module provides [`SliceOptions`], the user-facing configuration
//! record, plus the fixed process constants of the printer model.
//!
//! Option validation is deliberately permissive: an out-of-range value
//! keeps the current (default) value rather than aborting the run.

use crate::{Error, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nozzle orifice diameter (mm).
pub const NOZZLE_DIAMETER: f64 = 0.4;
/// Filament stock diameter (mm).
pub const FILAMENT_DIAMETER: f64 = 1.75;
/// Default layer thickness (mm).
pub const DEFAULT_THICKNESS: f64 = 0.2;
/// Bed size along X (mm).
pub const BED_SIZE_X: f64 = 150.0;
/// Bed size along Y (mm).
pub const BED_SIZE_Y: f64 = 150.0;
/// Total thickness of the solid bottom and top shells (mm).
pub const DEFAULT_BOTTOM_TOP_THICKNESS: f64 = 0.8;
/// Spacing between adjacent raster infill lines (mm).
pub const LINE_THICKNESS: f64 = 0.6;
/// Default number of perimeter layers.
pub const DEFAULT_PERIMETER_LAYERS: u32 = 2;
/// Default infill density (percent).
pub const DEFAULT_INFILL_PERCENT: u32 = 20;
/// Infill density used for support structures (percent).
pub const SUPPORT_INFILL_PERCENT: u32 = 20;

/// User-facing slicing options.
///
/// Defaults match the command-line defaults: 2 perimeter layers, 20%
/// infill, 0.2 mm layer thickness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceOptions {
    /// Number of perimeter layers (> 0).
    pub perimeter_layers: u32,
    /// Infill density in percent (0 - 100).
    pub infill_percent: u32,
    /// Layer thickness in mm (> 0).
    pub thickness: f64,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            perimeter_layers: DEFAULT_PERIMETER_LAYERS,
            infill_percent: DEFAULT_INFILL_PERCENT,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl SliceOptions {
    /// Create options with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid options file: {}", e)))
    }

    /// Builder: set the perimeter layer count.
    ///
    /// Values that are not strictly positive keep the current value.
    pub fn perimeter_layers(mut self, count: i64) -> Self {
        if count > 0 {
            self.perimeter_layers = count as u32;
        } else {
            warn!(
                "ignoring perimeter layer count {}, keeping {}",
                count, self.perimeter_layers
            );
        }
        self
    }

    /// Builder: set the infill percentage.
    ///
    /// Values outside `[0, 100]` keep the current value.
    pub fn infill_percent(mut self, percent: i64) -> Self {
        if (0..=100).contains(&percent) {
            self.infill_percent = percent as u32;
        } else {
            warn!(
                "ignoring infill percentage {}, keeping {}",
                percent, self.infill_percent
            );
        }
        self
    }

    /// Builder: set the layer thickness in mm.
    ///
    /// Values that are not strictly positive keep the current value.
    pub fn thickness(mut self, thickness: f64) -> Self {
        if thickness > 0.0 && thickness.is_finite() {
            self.thickness = thickness;
        } else {
            warn!(
                "ignoring layer thickness {}, keeping {}",
                thickness, self.thickness
            );
        }
        self
    }
}
