use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::categorizer::CategoryMap;
use crate::error::{PromoError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Category map file; the built-in map is used when unset.
    #[serde(default)]
    pub categories_path: Option<String>,
    #[serde(default)]
    pub include_expired: bool,
    /// Assembly threads, 0 lets rayon decide.
    #[serde(default)]
    pub workers: usize,
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("promoscan")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn default_categories_path() -> PathBuf {
    config_dir().join("categories.json")
}

fn read_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub fn load_settings() -> Settings {
    read_settings(&settings_path())
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| PromoError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_settings(&settings_path(), settings)
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// Resolve the category map: an explicit path wins over the configured one,
/// and with neither the built-in map applies.
pub fn category_map(explicit: Option<&str>, settings: &Settings) -> CategoryMap {
    match explicit.or(settings.categories_path.as_deref()) {
        Some(path) => CategoryMap::load_or_empty(Path::new(&shellexpand_path(path))),
        None => CategoryMap::builtin(),
    }
}
