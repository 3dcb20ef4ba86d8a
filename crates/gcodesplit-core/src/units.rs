//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) program units
//! and the invariant decimal formatting used when writing G-code words.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Maximum number of fractional digits written for a G-code word
pub const MAX_FRACTION_DIGITS: usize = 4;

/// Measurement system of a program (G21 = metric, G20 = imperial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Build from the `metric` flag carried on parsed instructions
    pub fn from_metric_flag(metric: bool) -> Self {
        if metric {
            Self::Metric
        } else {
            Self::Imperial
        }
    }

    /// Scale factor that converts a value in this system to millimeters
    pub fn mm_scale(self) -> f64 {
        match self {
            Self::Metric => 1.0,
            Self::Imperial => MM_PER_INCH,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" | "g21" => Ok(Self::Metric),
            "imperial" | "inch" | "in" | "g20" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Convert a value expressed in `system` units to millimeters
pub fn to_millimeters(value: f64, system: MeasurementSystem) -> f64 {
    value * system.mm_scale()
}

/// Convert a millimeter value to `system` units
pub fn from_millimeters(value_mm: f64, system: MeasurementSystem) -> f64 {
    value_mm / system.mm_scale()
}

/// Format a G-code word value with at most four fractional digits.
///
/// Mirrors the `0.####` pattern: trailing zeros and a trailing decimal point
/// are dropped and negative zero prints as `0`. The period is always the
/// decimal separator regardless of host locale.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let mut text = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
