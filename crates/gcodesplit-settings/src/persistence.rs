//! Settings Persistence
//!
//! Locates the per-user config file and loads or saves it, falling back to
//! defaults when nothing has been written yet.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

/// Directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "gcodesplit";

/// File name of the default config
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/gcodesplit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no config directory on this platform".to_string())
    })?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load `path`, or defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}

/// Config bound to the file it came from
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    path: PathBuf,
    config: Config,
}

impl SettingsPersistence {
    /// Open the config at `path`, defaulting when absent
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = Config::load_or_default(&path)?;
        Ok(Self { path, config })
    }

    /// Open the per-user default config
    pub fn open_default() -> SettingsResult<Self> {
        Self::open(default_config_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Write the config back, creating its directory if needed
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", dir.display(), e))
                })?;
            }
        }
        self.config.save_to_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_shape() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("gcodesplit/config.toml"));
        }
    }
}
