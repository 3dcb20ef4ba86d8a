//! GCodeSplit Settings Crate
//!
//! Handles configuration loading, validation and persistence. Settings are
//! passed explicitly to the parser, renderer and splitter.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, OutputSettings, RenderSettings, SplitSettings};
pub use error::{SettingsError, SettingsResult};
pub use persistence::{default_config_path, SettingsPersistence};
