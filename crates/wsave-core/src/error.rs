//! Save error types.
//!
//! Configuration and lookup errors describe defects in the host component.
//! Only [`SaveError::Io`] is expected at runtime; the state machine folds it
//! into a status condition instead of returning it.

use std::path::PathBuf;
use thiserror::Error;

/// Save operation error.
#[derive(Debug, Error)]
pub enum SaveError {
    /// A filter label does not have the `prefix (*.ext)` shape.
    #[error("Filter label does not name an extension: {label:?}")]
    FilterFormat { label: String },

    /// A registry was built without any filters.
    #[error("No output formats are registered")]
    EmptyRegistry,

    /// The same label was registered twice.
    #[error("Output format registered twice: {label}")]
    DuplicateFilter { label: String },

    /// The label is not present in the registry.
    #[error("Unknown output format: {label}")]
    UnknownFilter { label: String },

    /// The filter was registered without a writer and `do_save` was not overridden.
    #[error("No writer registered for output format: {label}")]
    MissingWriter { label: String },

    /// The writer failed.
    #[error("{source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SaveError {
    /// Wrap an I/O failure raised while writing `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: "write",
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a runtime I/O failure rather than a defect.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::FilterFormat { label } => {
                format!("The output format '{label}' does not specify a file extension.")
            }
            Self::EmptyRegistry => "This component does not offer any output format.".to_string(),
            Self::DuplicateFilter { label } => {
                format!("The output format '{label}' is offered more than once.")
            }
            Self::UnknownFilter { label } => {
                format!("The output format '{label}' is not available.")
            }
            Self::MissingWriter { label } => {
                format!("Saving as '{label}' is not supported.")
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { .. } => {
                Some("Check that you have permission to write to this location.".into())
            }
            Self::UnknownFilter { .. } => Some("Choose another output format.".into()),
            Self::FilterFormat { .. }
            | Self::EmptyRegistry
            | Self::DuplicateFilter { .. }
            | Self::MissingWriter { .. } => None,
        }
    }
}

/// Result type alias for save operations.
pub type Result<T> = std::result::Result<T, SaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_displays_source_message() {
        let err = SaveError::write(
            "/tmp/out.tab",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        );
        assert!(err.is_io());
        assert_eq!(err.to_string(), "access denied");
        assert_eq!(err.user_message(), "Could not write the file at /tmp/out.tab");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_defects_are_not_io() {
        let err = SaveError::UnknownFilter {
            label: "Excel (*.xlsx)".into(),
        };
        assert!(!err.is_io());
        assert_eq!(err.to_string(), "Unknown output format: Excel (*.xlsx)");
    }
}
