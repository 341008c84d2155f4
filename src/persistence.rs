//! Settings file for the gesture modes
//!
//! The runtime store starts from whatever was saved last. A missing file is
//! not an error: the gestures simply start disabled.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::GestureSettings;

const CONFIG_DIR: &str = "touchwake";
const SETTINGS_FILE: &str = "settings.toml";

/// `<config dir>/touchwake/settings.toml`, falling back to the home directory
pub fn default_settings_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(CONFIG_DIR);
    path.push(SETTINGS_FILE);
    path
}

pub async fn load_settings(path: &Path) -> Result<GestureSettings> {
    if !tokio::fs::try_exists(path)
        .await
        .map_err(|e| eyre!("Failed to check settings file {}: {}", path.display(), e))?
    {
        info!("No settings at {}, using defaults", path.display());
        return Ok(GestureSettings::default());
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| eyre!("Failed to read settings file {}: {}", path.display(), e))?;
    let settings: GestureSettings = toml::from_str(&content)
        .map_err(|e| eyre!("Failed to parse settings file {}: {}", path.display(), e))?;

    debug!("Loaded settings {:?}", settings);
    Ok(settings)
}

pub async fn save_settings(path: &Path, settings: &GestureSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| eyre!("Failed to create settings directory: {}", e))?;
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| eyre!("Failed to serialize settings: {}", e))?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| eyre!("Failed to write settings file: {}", e))?;

    info!("Settings saved to {}", path.display());
    Ok(())
}
