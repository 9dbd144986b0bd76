//! Persisted save settings and process environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings a save component persists across sessions.
///
/// `filename` is only meaningful inside a saved workflow document; global
/// snapshots drop it (see [`PersistScope`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Directory last used in the file picker. Empty means the home directory.
    pub last_dir: PathBuf,

    /// Currently selected filter label.
    pub filter: String,

    /// Full target path. Empty means no target has been chosen.
    pub filename: PathBuf,

    /// Save automatically whenever new input arrives.
    pub auto_save: bool,
}

impl SaveConfig {
    /// Whether a target file has been chosen.
    pub fn has_target(&self) -> bool {
        !self.filename.as_os_str().is_empty()
    }

    /// Copy of the settings suitable for the given persistence scope.
    pub fn for_scope(&self, scope: PersistScope) -> Self {
        match scope {
            PersistScope::Workflow => self.clone(),
            PersistScope::Global => Self {
                filename: PathBuf::new(),
                ..self.clone()
            },
        }
    }
}

/// Where a settings snapshot is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistScope {
    /// Application-wide defaults for new components.
    Global,
    /// A saved workflow document that owns this component.
    Workflow,
}

/// Values computed once at process start and shared by all components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEnvironment {
    /// The user's home directory, used when no other start directory is known.
    pub home_dir: PathBuf,
}

impl SaveEnvironment {
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
        }
    }

    /// Detect the home directory, falling back to the current directory.
    pub fn detect() -> Self {
        let home_dir = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!(home_dir = %home_dir.display(), "Detected home directory");
        Self { home_dir }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }
}
