//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for split and transform
//! parameter validation, plus the non-fatal diagnostics a split reports.

use gcodesplit_core::GcodeError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Invalid parameters were provided to a CAM tool.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Program text could not be parsed.
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Something odd the splitter noticed and worked around
#[derive(Debug, Clone, PartialEq)]
pub enum SplitDiagnostic {
    /// Start and end of an arc are at different distances from its center.
    /// The declared center and the start radius were used.
    RadiusMismatch {
        /// Index of the source instruction
        index: usize,
        start_radius: f64,
        end_radius: f64,
    },
    /// An arc whose center coincides with its start was split as a line
    ZeroRadiusArc { index: usize },
}

impl SplitDiagnostic {
    /// Index of the source instruction the diagnostic refers to
    pub fn index(&self) -> usize {
        match self {
            Self::RadiusMismatch { index, .. } | Self::ZeroRadiusArc { index } => *index,
        }
    }
}

impl fmt::Display for SplitDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RadiusMismatch {
                index,
                start_radius,
                end_radius,
            } => write!(
                f,
                "instruction {}: arc radius mismatch (start {:.4}, end {:.4})",
                index, start_radius, end_radius
            ),
            Self::ZeroRadiusArc { index } => {
                write!(f, "instruction {}: zero-radius arc treated as a line", index)
            }
        }
    }
}
