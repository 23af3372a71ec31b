//! Inspector settings with persistence
//!
//! Settings are saved to `~/.config/cairn/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Tool-wide settings for the cairn inspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorSettings {
    /// Directory asset modules are resolved under.
    pub asset_root: PathBuf,
    /// How many leading values of each decoded stream to print.
    pub preview_values: usize,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            preview_values: 8,
        }
    }
}

impl InspectorSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cairn"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Settings file failed to parse: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Settings file is unreadable: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        fs::create_dir_all(&dir)?;
        let path = dir.join("settings.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
