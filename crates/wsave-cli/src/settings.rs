//! Settings file for the terminal host.
//!
//! The file plays the role of a saved workflow document, so the target
//! file name is stored alongside the other save settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wsave_core::SaveConfig;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Save component settings.
    pub save: SaveConfig,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "No settings file, using defaults"
                );
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Ignoring invalid settings file"
            );
            Self::default()
        })
    }

    /// Save settings to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("write settings {}", path.display()))
    }

    /// The default settings file path.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "wsave", "wsave")
            .map(|dirs| dirs.config_dir().join("save.toml"))
            .unwrap_or_else(|| PathBuf::from("save.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(
            Settings::load_from(&dir.path().join("save.toml")),
            Settings::default()
        );
    }

    #[test]
    fn test_roundtrip_keeps_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("save.toml");
        let settings = Settings {
            save: SaveConfig {
                last_dir: PathBuf::from("/data"),
                filter: "Tab-separated values (*.tab)".into(),
                filename: PathBuf::from("/data/iris.tab"),
                auto_save: true,
            },
        };

        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_invalid_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.toml");
        std::fs::write(&path, "save = 3").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
