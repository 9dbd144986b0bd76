//! Live extension reconciliation for observable dialogs.
//!
//! A non-native dialog can report filter changes while it is open and let
//! us intercept the name it displays. [`LiveSession`] is that interception
//! surface: every filter selection and every displayed name goes through
//! it, so the name on screen always carries the selected extension.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{FilePicker, PickerChoice, PickerRequest, names_directory};
use crate::error::{Result, SaveError};
use crate::extension::{KnownExtensions, extension_of};

/// Dialog state shared between the adapter and a live dialog.
#[derive(Debug, Clone)]
pub struct LiveSession {
    filters: Vec<String>,
    known: KnownExtensions,
    selected_filter: String,
    suffix: String,
    displayed: PathBuf,
}

impl LiveSession {
    /// Start a session showing `start` with no filter selected yet.
    pub fn new(filters: Vec<String>, known: KnownExtensions, start: PathBuf) -> Self {
        Self {
            filters,
            known,
            selected_filter: String::new(),
            suffix: String::new(),
            displayed: start,
        }
    }

    /// Labels the dialog offers.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Filter-changed event, also used for the initial selection.
    pub fn select_filter(&mut self, label: &str) -> Result<()> {
        if !self.filters.iter().any(|filter| filter == label) {
            return Err(SaveError::UnknownFilter {
                label: label.to_string(),
            });
        }
        self.suffix = extension_of(label)?.to_string();
        self.selected_filter = label.to_string();
        let current = std::mem::take(&mut self.displayed);
        self.set_displayed_name(current);
        Ok(())
    }

    /// Intercepted attempt to display a name.
    ///
    /// File names get the selected extension. Directories and an empty
    /// name are shown as they are.
    pub fn set_displayed_name(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.displayed = if path.as_os_str().is_empty() || names_directory(path) {
            path.to_path_buf()
        } else {
            self.known.normalize(path, &self.suffix)
        };
        debug!(name = %self.displayed.display(), "Displayed name updated");
    }

    pub fn displayed_name(&self) -> &Path {
        &self.displayed
    }

    pub fn selected_filter(&self) -> &str {
        &self.selected_filter
    }

    /// Extension of the selected filter, including the dot.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The result of accepting the dialog.
    ///
    /// `None` when the displayed name is empty or names a directory.
    pub fn accept(&self) -> Option<PickerChoice> {
        if self.displayed.as_os_str().is_empty() || names_directory(&self.displayed) {
            return None;
        }
        Some(PickerChoice {
            path: self.displayed.clone(),
            filter: self.selected_filter.clone(),
        })
    }
}

/// A save dialog that drives a [`LiveSession`] while it is open.
pub trait LiveDialog {
    /// Run the dialog until the user accepts (`true`) or cancels (`false`).
    ///
    /// The session already has the default filter selected. The dialog
    /// reports every filter change through [`LiveSession::select_filter`]
    /// and every name it wants to show through
    /// [`LiveSession::set_displayed_name`].
    fn run(&mut self, session: &mut LiveSession) -> Result<bool>;
}

/// [`FilePicker`] that keeps the extension in line while the dialog is open.
#[derive(Debug)]
pub struct LivePicker<L> {
    dialog: L,
}

impl<L: LiveDialog> LivePicker<L> {
    pub fn new(dialog: L) -> Self {
        Self { dialog }
    }

    pub fn dialog(&self) -> &L {
        &self.dialog
    }
}

impl<L: LiveDialog> FilePicker for LivePicker<L> {
    fn choose(&mut self, request: &PickerRequest) -> Result<Option<PickerChoice>> {
        let mut session = LiveSession::new(
            request.filters.clone(),
            request.known_extensions.clone(),
            request.initial_path()?,
        );
        session.select_filter(&request.default_filter)?;

        if !self.dialog.run(&mut session)? {
            return Ok(None);
        }
        let choice = session.accept();
        if choice.is_none() {
            debug!("Dialog accepted without a file name");
        }
        Ok(choice)
    }
}
