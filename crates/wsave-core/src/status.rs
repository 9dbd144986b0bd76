//! User-visible status conditions.
//!
//! The report is recomputed from the current state instead of being
//! mutated incrementally, so every combination of flags maps to exactly one
//! set of conditions.

use std::fmt;

use crate::config::SaveConfig;

/// How a condition is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "info",
        }
    }
}

/// Identifies a condition regardless of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    NoFileName,
    GeneralError,
    EmptyInput,
}

/// A single active status condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Auto-save is on but no target file was chosen.
    NoFileName,
    /// The last save attempt failed with this message.
    GeneralError(String),
    /// A target is set but there is no data to write.
    EmptyInput,
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::NoFileName => ConditionKind::NoFileName,
            Self::GeneralError(_) => ConditionKind::GeneralError,
            Self::EmptyInput => ConditionKind::EmptyInput,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoFileName | Self::GeneralError(_) => Severity::Error,
            Self::EmptyInput => Severity::Information,
        }
    }

    /// Text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::NoFileName => "File name is not set.",
            Self::GeneralError(message) => message,
            Self::EmptyInput => "Empty input; nothing was saved.",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity().label(), self.message())
    }
}

/// The set of conditions active for a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    conditions: Vec<Condition>,
}

impl StatusReport {
    /// Derive the active conditions.
    ///
    /// `general_error` is the message of the last failed save attempt, if
    /// it has not been cleared since.
    pub fn evaluate(config: &SaveConfig, has_data: bool, general_error: Option<&str>) -> Self {
        let mut conditions = Vec::with_capacity(3);
        if config.auto_save && !config.has_target() {
            conditions.push(Condition::NoFileName);
        }
        if let Some(message) = general_error {
            conditions.push(Condition::GeneralError(message.to_string()));
        }
        if config.has_target() && !has_data {
            conditions.push(Condition::EmptyInput);
        }
        Self { conditions }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_active(&self, kind: ConditionKind) -> bool {
        self.conditions.iter().any(|c| c.kind() == kind)
    }

    pub fn has_errors(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.severity() == Severity::Error)
    }

    /// Message of the active general error, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.conditions.iter().find_map(|c| match c {
            Condition::GeneralError(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, condition) in self.conditions.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(filename: &str, auto_save: bool) -> SaveConfig {
        SaveConfig {
            filename: PathBuf::from(filename),
            auto_save,
            ..SaveConfig::default()
        }
    }

    #[test]
    fn test_no_file_name_requires_auto_save() {
        let report = StatusReport::evaluate(&config("", true), true, None);
        assert!(report.is_active(ConditionKind::NoFileName));
        assert!(!report.is_active(ConditionKind::EmptyInput));

        let report = StatusReport::evaluate(&config("", false), true, None);
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_input_requires_target() {
        let report = StatusReport::evaluate(&config("out.tab", false), false, None);
        assert!(report.is_active(ConditionKind::EmptyInput));
        assert!(!report.has_errors());

        let report = StatusReport::evaluate(&config("", true), false, None);
        assert!(!report.is_active(ConditionKind::EmptyInput));
    }

    #[test]
    fn test_conditions_are_independent() {
        let report = StatusReport::evaluate(&config("out.tab", true), false, Some("disk full"));
        assert!(report.is_active(ConditionKind::EmptyInput));
        assert_eq!(report.general_error(), Some("disk full"));
        assert!(report.has_errors());
    }

    #[test]
    fn test_render_report() {
        let report = StatusReport::evaluate(&config("", true), false, Some("Permission denied"));
        insta::assert_snapshot!(report.to_string(), @r"
        error: File name is not set.
        error: Permission denied
        ");
    }
}
