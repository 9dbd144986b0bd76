//! File extension handling for filter labels and target paths.
//!
//! Native file dialogs mangle compound extensions in different ways (for
//! example turning `iris.tab.gz` into `iris.gz`). [`normalize`] therefore
//! strips every trailing extension that any registered filter could have
//! produced before appending the one for the selected filter.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, SaveError};

/// Extract the extension from a filter label such as `"Tab-separated values (*.tab)"`.
///
/// The result runs from the first `.` inside the trailing parenthesized
/// group up to the closing parenthesis, so `"Compressed (*.tab.gz)"` yields
/// `".tab.gz"`. The leading `*` is optional, which also accepts labels that
/// had it removed for display (`"Tab (.tab)"`).
pub fn extension_of(label: &str) -> Result<&str> {
    let invalid = || SaveError::FilterFormat {
        label: label.to_string(),
    };
    let body = label.strip_suffix(')').ok_or_else(invalid)?;
    // Prefer the last group that names an extension, but fall back to an
    // earlier one when the last parenthesis belongs to the extension itself.
    body.match_indices('(')
        .rev()
        .find_map(|(open, _)| {
            let inner = &body[open + 1..];
            let inner = inner.strip_prefix('*').unwrap_or(inner);
            inner.starts_with('.').then_some(inner)
        })
        .ok_or_else(invalid)
}

/// The set of extension tokens any registered filter can produce.
///
/// Tokens are stored without dots; `.tab.gz` contributes `tab` and `gz`.
/// The empty token is never a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownExtensions {
    tokens: BTreeSet<String>,
}

impl KnownExtensions {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from full extensions such as `".tab.gz"`.
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = Self::new();
        for extension in extensions {
            known.insert_extension(extension.as_ref());
        }
        known
    }

    /// Add every non-empty token of `extension`.
    pub fn insert_extension(&mut self, extension: &str) {
        self.tokens.extend(
            extension
                .split('.')
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        );
    }

    /// Whether `token` (without a leading dot) is a known extension.
    pub fn contains(&self, token: &str) -> bool {
        !token.is_empty() && self.tokens.contains(token)
    }

    /// Iterate the tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Shorthand for [`normalize`] against this set.
    pub fn normalize(&self, path: &Path, extension: &str) -> PathBuf {
        normalize(path, extension, self)
    }
}

/// Rewrite `path` so that it ends with exactly `extension`.
///
/// Trailing extensions are removed for as long as they are in `known`;
/// the first unknown one stops the stripping, so `report.v2` keeps its
/// `.v2` suffix. The result is stable under repeated application whenever
/// the tokens of `extension` are themselves in `known`, which holds for any
/// extension taken from the same registry.
pub fn normalize(path: &Path, extension: &str, known: &KnownExtensions) -> PathBuf {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        let mut raw = OsString::from(path.as_os_str());
        raw.push(extension);
        return PathBuf::from(raw);
    };

    let mut base = name;
    loop {
        let (stem, ext) = split_extension(base);
        if !known.contains(ext.strip_prefix('.').unwrap_or(ext)) {
            break;
        }
        base = stem;
    }
    path.with_file_name(format!("{base}{extension}"))
}

/// Split a file name into stem and extension (including its dot).
///
/// Leading dots belong to the stem, so `.profile` has no extension, and a
/// trailing dot yields the extension `"."`.
fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(dot) => name.split_at(leading + dot),
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(tokens: &[&str]) -> KnownExtensions {
        KnownExtensions::from_extensions(tokens.iter().map(|t| format!(".{t}")))
    }

    #[test]
    fn test_extension_of_simple_label() {
        assert_eq!(extension_of("Tab-separated values (*.tab)").unwrap(), ".tab");
    }

    #[test]
    fn test_extension_of_compound_label() {
        assert_eq!(
            extension_of("Compressed tab-separated values (*.tab.gz)").unwrap(),
            ".tab.gz"
        );
    }

    #[test]
    fn test_extension_of_starless_label() {
        assert_eq!(extension_of("Tab-separated values (.tab)").unwrap(), ".tab");
    }

    #[test]
    fn test_extension_of_uses_last_group() {
        assert_eq!(extension_of("Data (v2) (*.dat)").unwrap(), ".dat");
    }

    #[test]
    fn test_extension_of_rejects_malformed_labels() {
        for label in ["Tab-separated values", "Tab (*.tab", "Tab (tab)", "(*)"] {
            let err = extension_of(label).unwrap_err();
            assert!(matches!(err, SaveError::FilterFormat { .. }), "{label}");
        }
    }

    #[test]
    fn test_known_extensions_skip_empty_token() {
        let set = KnownExtensions::from_extensions([".tab.gz", ".csv", "."]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["csv", "gz", "tab"]);
        assert!(!set.contains(""));
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("report.tab.gz"), ("report.tab", ".gz"));
        assert_eq!(split_extension("report"), ("report", ""));
        assert_eq!(split_extension(".profile"), (".profile", ""));
        assert_eq!(split_extension("report."), ("report", "."));
    }

    #[test]
    fn test_normalize_strips_compound_extension() {
        let set = known(&["tab", "gz"]);
        assert_eq!(
            normalize(Path::new("report.tab.gz"), ".csv", &set),
            PathBuf::from("report.csv")
        );
    }

    #[test]
    fn test_normalize_keeps_unknown_suffix() {
        let set = known(&["tab", "gz"]);
        assert_eq!(
            normalize(Path::new("report.v2"), ".csv", &set),
            PathBuf::from("report.v2.csv")
        );
    }

    #[test]
    fn test_normalize_stops_at_first_unknown() {
        let set = known(&["tab", "gz"]);
        assert_eq!(
            normalize(Path::new("/data/report.v2.tab.gz"), ".tab", &set),
            PathBuf::from("/data/report.v2.tab")
        );
    }

    #[test]
    fn test_normalize_trailing_dot_terminates() {
        let set = known(&["tab"]);
        assert_eq!(
            normalize(Path::new("report."), ".tab", &set),
            PathBuf::from("report..tab")
        );
    }

    #[test]
    fn test_normalize_keeps_directory() {
        let set = known(&["tab", "csv"]);
        assert_eq!(
            normalize(Path::new("/tmp/out.dir/x.tab"), ".csv", &set),
            PathBuf::from("/tmp/out.dir/x.csv")
        );
    }

    #[test]
    fn test_normalize_hidden_file_keeps_name() {
        let set = known(&["tab"]);
        assert_eq!(
            normalize(Path::new(".tab"), ".tab", &set),
            PathBuf::from(".tab.tab")
        );
    }
}
