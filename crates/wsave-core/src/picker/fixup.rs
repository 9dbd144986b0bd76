//! Post-hoc extension fixup for native dialogs.
//!
//! Native macOS and Windows dialogs do not handle compound extensions, so
//! no suffix is handed to them. After the dialog closes the returned name
//! is normalized, and only then is the user asked about overwriting an
//! existing file. Declining, or answering with a directory, shows the
//! dialog again.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{FilePicker, PickerChoice, PickerRequest, names_directory};
use crate::error::{Result, SaveError};
use crate::extension::extension_of;

/// A modal save dialog that cannot be observed while it is open.
pub trait NativeDialog {
    /// Show the dialog.
    ///
    /// `filters` are the labels as displayed and `selected` is one of them.
    /// Returns the chosen path and the displayed label of the chosen
    /// filter, or `None` when the user cancels.
    fn show(&mut self, start: &Path, filters: &[String], selected: &str) -> Option<PickerChoice>;

    /// Ask whether `path` may be overwritten.
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

/// How filter labels are presented to a native dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Labels are shown unchanged.
    #[default]
    Verbatim,
    /// The `*` of the extension pattern is removed, because the macOS dialog
    /// would otherwise treat the pattern as a suffix to enforce.
    Starless,
}

impl LabelStyle {
    /// The style the current platform's native dialog needs.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Starless
        } else {
            Self::Verbatim
        }
    }

    /// The label as shown in the dialog.
    pub fn display(self, label: &str) -> String {
        match self {
            Self::Verbatim => label.to_string(),
            Self::Starless => label.replace(" (*.", " (."),
        }
    }
}

/// Text of the overwrite confirmation for `path`.
pub fn overwrite_question(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("File {name} already exists.\nOverwrite?")
}

/// [`FilePicker`] that fixes the extension after the dialog closes.
#[derive(Debug)]
pub struct FixupPicker<N> {
    dialog: N,
    style: LabelStyle,
}

impl<N: NativeDialog> FixupPicker<N> {
    pub fn new(dialog: N, style: LabelStyle) -> Self {
        Self { dialog, style }
    }

    pub fn dialog(&self) -> &N {
        &self.dialog
    }

    pub fn into_dialog(self) -> N {
        self.dialog
    }
}

impl<N: NativeDialog> FilePicker for FixupPicker<N> {
    fn choose(&mut self, request: &PickerRequest) -> Result<Option<PickerChoice>> {
        let shown: Vec<String> = request
            .filters
            .iter()
            .map(|label| self.style.display(label))
            .collect();
        let selected = self.style.display(&request.default_filter);
        let mut start: PathBuf = request.initial_path()?;

        loop {
            let Some(answer) = self.dialog.show(&start, &shown, &selected) else {
                return Ok(None);
            };
            if names_directory(&answer.path) {
                debug!(chosen = %answer.path.display(), "Dialog returned a directory");
                start = answer.path;
                continue;
            }
            let filter = shown
                .iter()
                .position(|label| *label == answer.filter)
                .map(|index| request.filters[index].clone())
                .ok_or_else(|| SaveError::UnknownFilter {
                    label: answer.filter.clone(),
                })?;
            let path = request
                .known_extensions
                .normalize(&answer.path, extension_of(&filter)?);
            debug!(
                chosen = %answer.path.display(),
                normalized = %path.display(),
                "Fixed up file name after dialog"
            );

            if !path.exists() || self.dialog.confirm_overwrite(&path) {
                return Ok(Some(PickerChoice { path, filter }));
            }
            start = path;
        }
    }
}
