//! Geometry primitives for the slicer.
//!
//! This module provides the fundamental geometric types used throughout
//! the slicing pipeline:
//! - [`Point`] - a 3D point (or vector) with `f64` coordinates in mm
//! - [`Segment`] - a parametric line segment (origin + direction)
//! - [`Axis`] - coordinate axis selector for plane evaluation
//!
//! ## Coordinate rounding
//!
//! The pipeline works in plain `f64` millimetres. Every coordinate that
//! survives a plane intersection is rounded to 5 decimal places (see
//! [`crate::round_coord`]); this makes endpoint equality exact where the
//! contour reconstruction needs it.

mod point;
mod segment;

pub use point::Point;
pub use segment::{Axis, Segment};
