//! Settings file handling for the session.
//
// Serialized as `oriel.toml` under the platform config directory. Every
// field carries a default so a partial or missing file still yields a
// usable configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TOAST_POOL;

/// Which chrome buttons a window suppresses, keyed by window title in
/// [`Settings::window_controls`]. Suppressed regions fall back to plain
/// drag behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsPolicy {
    pub hide_back: bool,
    pub hide_minimize: bool,
    pub hide_maximize: bool,
    pub hide_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: i32,
    pub height: i32,
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Write logs into the project data directory.
    pub log_to_file: bool,
    /// Mirror logs to stdout.
    pub console: bool,
    /// Host display the demo script lays its windows out on.
    pub display: DisplaySize,
    /// Whether created windows accept user resizing.
    pub resizable_windows: bool,
    /// Hidden overlay windows pre-created at startup.
    pub toast_pool: usize,
    /// Guest package name → window title directory.
    pub app_titles: HashMap<String, String>,
    /// Window title → suppressed chrome buttons.
    pub window_controls: HashMap<String, ControlsPolicy>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_to_file: true,
            console: true,
            display: DisplaySize::default(),
            resizable_windows: true,
            toast_pool: DEFAULT_TOAST_POOL,
            app_titles: HashMap::new(),
            window_controls: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Could not parse settings file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("Could not serialize settings")?;
        fs::write(path, raw)
            .with_context(|| format!("Could not write settings file {}", path.display()))
    }

    /// Settings from the default config file. A missing file is written out
    /// with defaults first; an unreadable one falls back to defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_file() else {
            tracing::warn!("Could not determine a config directory, using default settings");
            return Self::default();
        };
        if !path.exists() {
            let defaults = Self::default();
            if let Err(err) = defaults.save(&path) {
                tracing::error!("Failed to write default settings: {err:#}");
            }
            return defaults;
        }
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!("Failed to load settings: {err:#}");
                Self::default()
            }
        }
    }

    pub fn config_file() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("org", "Oriel", "Oriel")?;
        Some(dirs.config_dir().join("oriel.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oriel.toml");

        let mut settings = Settings {
            console: false,
            resizable_windows: false,
            toast_pool: 2,
            display: DisplaySize {
                width: 2560,
                height: 1440,
            },
            ..Settings::default()
        };
        settings
            .app_titles
            .insert("org.example.player".to_string(), "Player".to_string());
        settings.window_controls.insert(
            "Player".to_string(),
            ControlsPolicy {
                hide_close: true,
                ..ControlsPolicy::default()
            },
        );

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oriel.toml");
        fs::write(&path, "toast_pool = 3\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.toast_pool, 3);
        assert!(settings.resizable_windows);
        assert_eq!(settings.display, DisplaySize::default());
    }

    #[test]
    fn test_controls_table_keys_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oriel.toml");
        fs::write(
            &path,
            "[window_controls.\"Player\"]\nhide_back = true\nhide_close = true\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        let policy = &settings.window_controls["Player"];
        assert!(policy.hide_back);
        assert!(policy.hide_close);
        assert!(!policy.hide_minimize);
        assert!(!policy.hide_maximize);
    }
}
