//! Output format registry.
//!
//! A registry maps human-readable filter labels to the writers that produce
//! the corresponding files. Registration order is preserved; the first
//! label is the default selection.

use std::fmt;
use std::io;
use std::path::Path;

use crate::error::{Result, SaveError};
use crate::extension::{KnownExtensions, extension_of};

/// Serializes a data payload to a file.
pub trait Writer<D> {
    /// Write `data` to `path`.
    fn write(&self, path: &Path, data: &D) -> io::Result<()>;
}

impl<D, F> Writer<D> for F
where
    F: Fn(&Path, &D) -> io::Result<()>,
{
    fn write(&self, path: &Path, data: &D) -> io::Result<()> {
        self(path, data)
    }
}

/// A registered output format.
pub struct FilterEntry<D> {
    label: String,
    extension: String,
    writer: Option<Box<dyn Writer<D>>>,
}

impl<D> FilterEntry<D> {
    fn new(label: String, writer: Option<Box<dyn Writer<D>>>) -> Result<Self> {
        let extension = extension_of(&label)?.to_string();
        Ok(Self {
            label,
            extension,
            writer,
        })
    }

    /// The label shown in the file picker.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The extension the label names, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether a writer was registered with this filter.
    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }
}

impl<D> fmt::Debug for FilterEntry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEntry")
            .field("label", &self.label)
            .field("extension", &self.extension)
            .field("has_writer", &self.has_writer())
            .finish()
    }
}

/// Ordered collection of output formats.
///
/// Built either from plain labels, for components that override
/// [`crate::SaveBehavior::do_save`], or from label and writer pairs.
pub struct FilterRegistry<D> {
    entries: Vec<FilterEntry<D>>,
    known: KnownExtensions,
}

impl<D> FilterRegistry<D> {
    /// Build a registry of labels without writers.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(labels.into_iter().map(|label| (label.into(), None)))
    }

    /// Build a registry whose entries each carry a writer.
    pub fn from_writers<I, S>(writers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Box<dyn Writer<D>>)>,
        S: Into<String>,
    {
        Self::build(
            writers
                .into_iter()
                .map(|(label, writer)| (label.into(), Some(writer))),
        )
    }

    fn build(items: impl Iterator<Item = (String, Option<Box<dyn Writer<D>>>)>) -> Result<Self> {
        let mut entries: Vec<FilterEntry<D>> = Vec::new();
        let mut known = KnownExtensions::new();
        for (label, writer) in items {
            if entries.iter().any(|entry| entry.label == label) {
                return Err(SaveError::DuplicateFilter { label });
            }
            let entry = FilterEntry::new(label, writer)?;
            known.insert_extension(&entry.extension);
            entries.push(entry);
        }
        if entries.is_empty() {
            return Err(SaveError::EmptyRegistry);
        }
        Ok(Self { entries, known })
    }

    /// The first registered label.
    pub fn default_filter(&self) -> &str {
        // `build` rejects empty registries.
        &self.entries[0].label
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    pub fn entries(&self) -> &[FilterEntry<D>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entry(label).is_some()
    }

    pub fn entry(&self, label: &str) -> Option<&FilterEntry<D>> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// The extension for a registered label.
    pub fn extension_for(&self, label: &str) -> Result<&str> {
        self.entry(label)
            .map(FilterEntry::extension)
            .ok_or_else(|| SaveError::UnknownFilter {
                label: label.to_string(),
            })
    }

    /// The writer registered for `label`.
    pub fn writer_for(&self, label: &str) -> Result<&dyn Writer<D>> {
        let entry = self.entry(label).ok_or_else(|| SaveError::UnknownFilter {
            label: label.to_string(),
        })?;
        entry
            .writer
            .as_deref()
            .ok_or_else(|| SaveError::MissingWriter {
                label: label.to_string(),
            })
    }

    /// Every extension token appearing in any registered label.
    pub fn all_extensions(&self) -> &KnownExtensions {
        &self.known
    }
}

impl<D> fmt::Debug for FilterRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("entries", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_nothing(_path: &Path, _data: &String) -> io::Result<()> {
        Ok(())
    }

    #[test]
    fn test_default_filter_is_first() {
        let registry =
            FilterRegistry::<String>::from_labels(["Tab (*.tab)", "CSV (*.csv)"]).unwrap();
        assert_eq!(registry.default_filter(), "Tab (*.tab)");
        assert_eq!(
            registry.labels().collect::<Vec<_>>(),
            vec!["Tab (*.tab)", "CSV (*.csv)"]
        );
    }

    #[test]
    fn test_all_extensions_splits_tokens() {
        let registry =
            FilterRegistry::<String>::from_labels(["Tab (*.tab)", "Compressed (*.tab.gz)"])
                .unwrap();
        let tokens: Vec<_> = registry.all_extensions().iter().collect();
        assert_eq!(tokens, vec!["gz", "tab"]);
    }

    #[test]
    fn test_malformed_label_fails_construction() {
        let err = FilterRegistry::<String>::from_labels(["Tab (*.tab)", "Anything"]).unwrap_err();
        assert!(matches!(err, SaveError::FilterFormat { label } if label == "Anything"));
    }

    #[test]
    fn test_empty_and_duplicate_registries_fail() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            FilterRegistry::<String>::from_labels(empty),
            Err(SaveError::EmptyRegistry)
        ));
        assert!(matches!(
            FilterRegistry::<String>::from_labels(["Tab (*.tab)", "Tab (*.tab)"]),
            Err(SaveError::DuplicateFilter { .. })
        ));
    }

    #[test]
    fn test_writer_for_lookup() {
        let registry = FilterRegistry::<String>::from_writers([(
            "Tab (*.tab)",
            Box::new(write_nothing) as Box<dyn Writer<String>>,
        )])
        .unwrap();
        let writer = registry.writer_for("Tab (*.tab)").unwrap();
        assert!(writer.write(Path::new("x.tab"), &"data".to_string()).is_ok());
        assert!(matches!(
            registry.writer_for("CSV (*.csv)"),
            Err(SaveError::UnknownFilter { .. })
        ));
    }

    #[test]
    fn test_label_only_registry_has_no_writer() {
        let registry = FilterRegistry::<String>::from_labels(["Tab (*.tab)"]).unwrap();
        assert!(!registry.entries()[0].has_writer());
        assert!(matches!(
            registry.writer_for("Tab (*.tab)"),
            Err(SaveError::MissingWriter { .. })
        ));
        assert_eq!(registry.extension_for("Tab (*.tab)").unwrap(), ".tab");
    }
}
