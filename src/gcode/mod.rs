//! G-code generation.
//!
//! This module provides the typed move representation, the extrusion
//! accountant threading one cumulative E value through the whole print,
//! and [`GcodeProgram`], the emitted line sequence with print statistics.

mod emitter;

pub use emitter::Emitter;

use crate::config::{FILAMENT_DIAMETER, NOZZLE_DIAMETER};
use crate::geometry::Point;
use crate::round_coord;
use crate::Result;
use std::f64::consts::PI;
use std::path::Path;

/// A single printer move.
///
/// Travel moves reposition the head without feeding filament and carry
/// no E field; extrude moves carry the cumulative E value after the
/// move. Keeping the distinction in the type means no emitted line ever
/// needs a post-pass to strip a spurious E token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Move {
    /// Reposition without extruding.
    Travel { target: Point },
    /// Extrude along the way; `e` is the cumulative extruder value.
    Extrude { target: Point, e: f64 },
}

/// Format a 5-decimal-rounded coordinate for a G-code field.
///
/// Trailing zeros are trimmed but at least one fractional digit is
/// kept, so whole numbers serialize as `20.0`, not `20`.
fn format_coord(v: f64) -> String {
    let fixed = format!("{:.5}", round_coord(v));
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

impl Move {
    /// Serialize the move as one G-code line.
    ///
    /// Coordinates are 5-decimal-rounded values with a decimal point
    /// always present; all tokens are upper-case.
    pub fn to_gcode(&self) -> String {
        match self {
            Move::Travel { target } => format!(
                "G1 X{} Y{} Z{}",
                format_coord(target.x),
                format_coord(target.y),
                format_coord(target.z)
            ),
            Move::Extrude { target, e } => format!(
                "G1 X{} Y{} Z{} E{}",
                format_coord(target.x),
                format_coord(target.y),
                format_coord(target.z),
                format_coord(*e)
            ),
        }
    }
}

/// The extrusion accountant.
///
/// Holds the single cumulative E value for the print and the per-mm
/// feed factor derived from the nozzle and filament geometry. The value
/// is monotonically non-decreasing: every extruding move adds exactly
/// that move's extrusion amount.
#[derive(Clone, Debug)]
pub struct ExtruderState {
    e: f64,
    per_mm: f64,
}

impl ExtruderState {
    /// Create the accountant for a given layer thickness.
    pub fn new(thickness: f64) -> Self {
        Self {
            e: 0.0,
            per_mm: NOZZLE_DIAMETER * thickness * (2.0 / FILAMENT_DIAMETER) / PI,
        }
    }

    /// The extrusion amount for a move between two points (3D distance).
    #[inline]
    pub fn extrusion_for(&self, from: &Point, to: &Point) -> f64 {
        self.per_mm * from.distance(to)
    }

    /// Account a move and return the new cumulative E value.
    pub fn advance(&mut self, from: &Point, to: &Point) -> f64 {
        self.e += self.extrusion_for(from, to);
        self.e
    }

    /// The current cumulative E value.
    #[inline]
    pub fn current(&self) -> f64 {
        self.e
    }
}

/// Scan emitted G-code lines in reverse for the last E token and parse
/// its numeric tail.
pub fn parse_last_e(lines: &[String]) -> Option<f64> {
    lines.iter().rev().find_map(|line| {
        line.split_whitespace()
            .rev()
            .find(|token| token.starts_with('E'))
            .and_then(|token| token[1..].parse().ok())
    })
}

/// Print statistics for an emitted program.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrintStats {
    /// Number of layers emitted.
    pub layer_count: usize,
    /// Number of moves emitted.
    pub move_count: usize,
    /// Filament fed into the hotend, in mm (the final E value).
    pub filament_used_mm: f64,
}

/// An emitted G-code program: the ordered line sequence plus statistics.
#[derive(Clone, Debug, Default)]
pub struct GcodeProgram {
    lines: Vec<String>,
    pub stats: PrintStats,
}

impl GcodeProgram {
    /// Create a program from emitted lines.
    pub fn new(lines: Vec<String>, layer_count: usize) -> Self {
        let stats = PrintStats {
            layer_count,
            move_count: lines.len(),
            filament_used_mm: parse_last_e(&lines).unwrap_or(0.0),
        };
        Self { lines, stats }
    }

    /// The emitted lines.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of emitted lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The program as a single newline-joined string.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the program to a file, one line per move.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut content = self.content();
        content.push('\n');
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
