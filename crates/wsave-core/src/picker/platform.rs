//! Picker strategy selection.
//!
//! - **macOS / Windows**: native dialogs, extension fixed after closing
//! - **Linux and anything else**: non-native dialog with live updates

use super::{FilePicker, FixupPicker, LabelStyle, LiveDialog, LivePicker, NativeDialog};

/// How the picker reconciles the file name with the selected format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStrategy {
    /// Normalize after the dialog closes, then confirm overwrites.
    Fixup,
    /// Normalize while the dialog is open.
    Live,
}

impl PlatformStrategy {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    pub fn current() -> Self {
        Self::Fixup
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub fn current() -> Self {
        Self::Live
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fixup => "fixup",
            Self::Live => "live",
        }
    }
}

/// Wrap `dialog` in the adapter for `strategy`.
pub fn picker_for<D>(strategy: PlatformStrategy, dialog: D) -> Box<dyn FilePicker>
where
    D: NativeDialog + LiveDialog + 'static,
{
    tracing::debug!(strategy = strategy.name(), "Selected file picker strategy");
    match strategy {
        PlatformStrategy::Fixup => Box::new(FixupPicker::new(dialog, LabelStyle::current())),
        PlatformStrategy::Live => Box::new(LivePicker::new(dialog)),
    }
}

/// Wrap `dialog` in the adapter for the current platform.
pub fn platform_picker<D>(dialog: D) -> Box<dyn FilePicker>
where
    D: NativeDialog + LiveDialog + 'static,
{
    picker_for(PlatformStrategy::current(), dialog)
}
