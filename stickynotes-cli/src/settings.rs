//! Application settings persistence for Sticky Notes.
//!
//! Stores user preferences (database location, widget snapshot, OCR service)
//! in a JSON file at an OS-appropriate location.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stickynotes_core::OcrConfig;

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// SQLite file holding the note and widget slots.
    pub database_path: String,
    /// JSON file the home-screen widget renders from.
    pub widget_snapshot_path: String,
    pub ocr: OcrConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        let data = default_data_directory();
        Self {
            database_path: data.join("notes.db").to_string_lossy().to_string(),
            widget_snapshot_path: data.join("widget.json").to_string_lossy().to_string(),
            ocr: OcrConfig::default(),
        }
    }
}

/// Settings file under the OS config directory, e.g.
/// `~/.config/stickynotes/settings.json` on Linux.
pub fn settings_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stickynotes")
        .join("settings.json")
}

/// Returns the default data directory, e.g. `~/.local/share/StickyNotes`.
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("StickyNotes")
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings(path: &Path) -> AppSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings at {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(settings)?)
        .with_context(|| format!("writing settings to {}", path.display()))
}
