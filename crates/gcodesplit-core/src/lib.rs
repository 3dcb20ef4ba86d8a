//! # GCodeSplit Core
//!
//! Core types and utilities for GCodeSplit.
//! Provides the geometry kernel shared by the toolpath renderer and the
//! plane-split engine, unit handling, and the error types used across the
//! workspace.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, GcodeError, GeometryError, Result};

pub use geometry::{
    angle_of, arc_sweep, deg_to_rad, distance, distance_xy, line_circle_intersect, line_y_at_x,
    rad_to_deg, rotate, rotate_about_origin, ArcDirection, LineCircleIntersection, Point, EPSILON,
};

pub use units::{format_decimal, MeasurementSystem, MM_PER_INCH};
