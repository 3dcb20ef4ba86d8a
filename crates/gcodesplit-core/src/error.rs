//! Error handling for GCodeSplit
//!
//! Provides error types for all layers of the toolkit:
//! - G-Code errors (parsing a single program line)
//! - Geometry errors (degenerate inputs a caller asked to have reported)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Geometric degeneracies inside the kernel are handled by explicit branches
//! and never surface as errors unless a checked variant is requested.

use thiserror::Error;

/// G-Code error type
///
/// Scoped to one program line. A program parse never aborts because of one
/// of these; the offending words are left out of the instruction instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Text that is not a `<letter><number>` word
    #[error("Invalid syntax at line {line_number}: {reason}")]
    InvalidSyntax {
        /// The 1-based line number where the syntax error occurred.
        line_number: usize,
        /// The reason for the syntax error.
        reason: String,
    },

    /// A word whose numeric part could not be parsed
    #[error("Invalid parameter '{param}' at line {line_number}: {reason}")]
    InvalidParameter {
        /// The 1-based line number where the invalid parameter was found.
        line_number: usize,
        /// The word letter.
        param: char,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// Generic G-Code error
    #[error("G-Code error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

impl GcodeError {
    /// Line number the error refers to, when it has one
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::InvalidSyntax { line_number, .. } | Self::InvalidParameter { line_number, .. } => {
                Some(*line_number)
            }
            Self::Other { .. } => None,
        }
    }

    /// Return a copy of this error re-attributed to `line_number`
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            Self::InvalidSyntax { reason, .. } => Self::InvalidSyntax {
                line_number,
                reason,
            },
            Self::InvalidParameter { param, reason, .. } => Self::InvalidParameter {
                line_number,
                param,
                reason,
            },
            other => other,
        }
    }
}

/// Geometry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Two points that must differ are identical
    #[error("Degenerate segment: start and end coincide at ({x}, {y})")]
    ZeroLength {
        /// X coordinate of the coincident point.
        x: f64,
        /// Y coordinate of the coincident point.
        y: f64,
    },

    /// A circle with a non-positive radius
    #[error("Invalid radius: {radius}")]
    InvalidRadius {
        /// The offending radius.
        radius: f64,
    },

    /// A value that must be finite was NaN or infinite
    #[error("Non-finite value for {name}")]
    NonFinite {
        /// The name of the value.
        name: String,
    },
}

/// Main error type for GCodeSplit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
