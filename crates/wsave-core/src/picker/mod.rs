//! File picker adapters.
//!
//! The state machine only sees [`FilePicker`]: given a request it returns a
//! path and filter, or nothing when the user cancels. How the picker keeps
//! the file name's extension in line with the selected format depends on
//! what the platform dialog allows:
//!
//! - [`fixup`]: the dialog is a black box, so the name is corrected after
//!   it closes and an overwrite confirmation is asked by the adapter.
//! - [`live`]: the dialog reports filter changes while open, so the shown
//!   name is corrected as the user works.
//!
//! [`platform`] picks the strategy for the current target.

pub mod fixup;
pub mod live;
pub mod platform;

use std::path::{Path, PathBuf, is_separator};

use crate::error::Result;
use crate::extension::{KnownExtensions, extension_of};

pub use fixup::{FixupPicker, LabelStyle, NativeDialog, overwrite_question};
pub use live::{LiveDialog, LivePicker, LiveSession};
pub use platform::{PlatformStrategy, picker_for, platform_picker};

/// What the state machine asks the picker for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRequest {
    /// Initial file or directory.
    pub start: PathBuf,
    /// Filter labels to offer, in order.
    pub filters: Vec<String>,
    /// Label selected when the dialog opens.
    pub default_filter: String,
    /// Base name to propose when `start` is a directory. May be empty.
    pub suggested_name: String,
    /// Extension tokens the adapter may strip while normalizing.
    pub known_extensions: KnownExtensions,
}

impl PickerRequest {
    /// The path the dialog should show first.
    ///
    /// A directory start combined with a suggested name becomes the
    /// suggested file inside that directory, carrying the default filter's
    /// extension.
    pub fn initial_path(&self) -> Result<PathBuf> {
        if self.suggested_name.is_empty() || !self.start.is_dir() {
            return Ok(self.start.clone());
        }
        let extension = extension_of(&self.default_filter)?;
        Ok(self
            .known_extensions
            .normalize(&self.start.join(&self.suggested_name), extension))
    }
}

/// A confirmed picker result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerChoice {
    pub path: PathBuf,
    pub filter: String,
}

impl PickerChoice {
    pub fn new(path: impl Into<PathBuf>, filter: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filter: filter.into(),
        }
    }
}

/// Whether `path` names a directory rather than a file to write.
///
/// True for existing directories and for names ending in a separator,
/// such as `out/`, whether or not that directory exists.
pub fn names_directory(path: &Path) -> bool {
    path.is_dir() || path.to_string_lossy().ends_with(is_separator)
}

/// Asks the user for a save target.
pub trait FilePicker {
    /// Show the picker. `Ok(None)` means the user cancelled.
    fn choose(&mut self, request: &PickerRequest) -> Result<Option<PickerChoice>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request(start: PathBuf, suggested_name: &str) -> PickerRequest {
        PickerRequest {
            start,
            filters: vec!["Tab (*.tab)".into(), "Compressed (*.tab.gz)".into()],
            default_filter: "Compressed (*.tab.gz)".into(),
            suggested_name: suggested_name.into(),
            known_extensions: KnownExtensions::from_extensions([".tab", ".tab.gz"]),
        }
    }

    #[test]
    fn test_initial_path_uses_suggested_name_in_directory() {
        let dir = tempdir().unwrap();
        let req = request(dir.path().to_path_buf(), "iris.tab");
        assert_eq!(req.initial_path().unwrap(), dir.path().join("iris.tab.gz"));
    }

    #[test]
    fn test_initial_path_keeps_file_start() {
        let req = request(PathBuf::from("/data/out.tab"), "iris");
        assert_eq!(req.initial_path().unwrap(), PathBuf::from("/data/out.tab"));
    }

    #[test]
    fn test_initial_path_without_suggestion() {
        let dir = tempdir().unwrap();
        let req = request(dir.path().to_path_buf(), "");
        assert_eq!(req.initial_path().unwrap(), dir.path());
    }

    #[test]
    fn test_names_directory() {
        let dir = tempdir().unwrap();
        assert!(names_directory(dir.path()));
        assert!(names_directory(&dir.path().join("missing/")));
        assert!(!names_directory(&dir.path().join("missing")));
        assert!(!names_directory(&dir.path().join("iris.tab")));
    }
}
