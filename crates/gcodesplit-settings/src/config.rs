//! Configuration for GCodeSplit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Split settings (plane placement, retract height, numeric tolerances)
//! - Render settings (arc chord resolution)
//! - Output settings (block markers, peck depths)

use gcodesplit_camtools::{
    SplitOptions, SplitPlane, DEFAULT_ARC_RADIUS_TOLERANCE, DEFAULT_BOUNDARY_EPSILON,
    DEFAULT_MIN_ARC_LENGTH,
};
use gcodesplit_core::Point;
pub use gcodesplit_toolpath::RenderSettings;
use gcodesplit_toolpath::WriterOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Plane placement and split tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Plane origin X
    pub origin_x: f64,
    /// Plane origin Y
    pub origin_y: f64,
    /// Plane rotation in degrees
    pub angle_degrees: f64,
    /// Retract height between pieces and at the end of each side
    pub z_clearance: f64,
    /// Shortest sub-arc kept after a crossing
    pub min_arc_length: f64,
    /// Accepted start/end radius difference before a diagnostic is raised
    pub arc_radius_tolerance: f64,
    /// Distance from the boundary that still counts as on it
    pub boundary_epsilon: f64,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            angle_degrees: 0.0,
            z_clearance: 5.0,
            min_arc_length: DEFAULT_MIN_ARC_LENGTH,
            arc_radius_tolerance: DEFAULT_ARC_RADIUS_TOLERANCE,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
        }
    }
}

impl SplitSettings {
    pub fn plane(&self) -> SplitPlane {
        SplitPlane::new(Point::xy(self.origin_x, self.origin_y), self.angle_degrees)
    }

    pub fn options(&self) -> SplitOptions {
        SplitOptions {
            z_clearance: self.z_clearance,
            min_arc_length: self.min_arc_length,
            arc_radius_tolerance: self.arc_radius_tolerance,
            boundary_epsilon: self.boundary_epsilon,
        }
    }
}

/// Program text output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Bracket blocks with start/end marker comments
    pub block_markers: bool,
    /// Repeat the program once per depth, replacing Z at or below zero
    pub peck_depths: Vec<f64>,
}

impl OutputSettings {
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            block_markers: self.block_markers,
            z_override: None,
        }
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub split: SplitSettings,
    pub render: RenderSettings,
    pub output: OutputSettings,
}

/// On-disk format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path).ok_or_else(|| {
            SettingsError::LoadError(format!(
                "{}: config file must be .json or .toml",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let format = Format::of(path).ok_or_else(|| {
            SettingsError::SaveError(format!(
                "{}: config file must be .json or .toml",
                path.display()
            ))
        })?;
        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
        };

        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let split = &self.split;
        let finite = [
            ("split.origin_x", split.origin_x),
            ("split.origin_y", split.origin_y),
            ("split.angle_degrees", split.angle_degrees),
            ("split.z_clearance", split.z_clearance),
            ("split.min_arc_length", split.min_arc_length),
            ("split.arc_radius_tolerance", split.arc_radius_tolerance),
            ("split.boundary_epsilon", split.boundary_epsilon),
            ("render.steps_per_degree", self.render.steps_per_degree),
            ("render.curve_section", self.render.curve_section),
        ];
        for (key, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::invalid(key, "must be a finite number"));
            }
        }

        if split.min_arc_length <= 0.0 {
            return Err(SettingsError::invalid("split.min_arc_length", "must be > 0"));
        }
        if split.arc_radius_tolerance < 0.0 {
            return Err(SettingsError::invalid(
                "split.arc_radius_tolerance",
                "must be >= 0",
            ));
        }
        if split.boundary_epsilon < 0.0 {
            return Err(SettingsError::invalid("split.boundary_epsilon", "must be >= 0"));
        }

        if self.render.steps_per_degree <= 0.0 {
            return Err(SettingsError::invalid("render.steps_per_degree", "must be > 0"));
        }
        if self.render.curve_section <= 0.0 {
            return Err(SettingsError::invalid("render.curve_section", "must be > 0"));
        }

        for depth in &self.output.peck_depths {
            if !depth.is_finite() || *depth > 0.0 {
                return Err(SettingsError::invalid(
                    "output.peck_depths",
                    format!("{} is not a depth at or below zero", depth),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.split.min_arc_length, 0.025);
        assert_eq!(config.render.steps_per_degree, 2.4);
        assert!(!config.output.block_markers);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.render.curve_section = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.split.angle_degrees = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "split.angle_degrees"
        ));

        let mut config = Config::default();
        config.output.peck_depths = vec![-1.0, 0.5];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_settings_conversion() {
        let settings = SplitSettings {
            origin_x: 12.0,
            angle_degrees: 15.0,
            z_clearance: 3.0,
            ..SplitSettings::default()
        };
        assert_eq!(settings.plane(), SplitPlane::new(Point::xy(12.0, 0.0), 15.0));
        assert_eq!(settings.options().z_clearance, 3.0);
        assert!(settings.options().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[split]\norigin_x = 40.0\n").unwrap();
        assert_eq!(config.split.origin_x, 40.0);
        assert_eq!(config.split.z_clearance, 5.0);
        assert_eq!(config.render, RenderSettings::default());
    }
}
