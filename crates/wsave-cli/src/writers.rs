//! Output formats offered by the terminal host.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use wsave_core::{FilterRegistry, Writer};

use crate::table::Table;

pub const TAB_FILTER: &str = "Tab-separated values (*.tab)";
pub const CSV_FILTER: &str = "Comma-separated values (*.csv)";
pub const JSON_FILTER: &str = "JSON (*.json)";
pub const TAB_TEXT_FILTER: &str = "Tab-separated text (*.tab.txt)";

/// Writes the header and rows separated by a single-byte delimiter.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedWriter {
    delimiter: u8,
}

impl DelimitedWriter {
    pub fn tab() -> Self {
        Self { delimiter: b'\t' }
    }

    pub fn comma() -> Self {
        Self { delimiter: b',' }
    }
}

impl Writer<Table> for DelimitedWriter {
    fn write(&self, path: &Path, data: &Table) -> io::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)?;
        writer.write_record(&data.headers)?;
        for row in &data.rows {
            writer.write_record(row)?;
        }
        writer.flush()
    }
}

/// Writes the table as a JSON object with `headers` and `rows`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl Writer<Table> for JsonWriter {
    fn write(&self, path: &Path, data: &Table) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, data)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// All formats, tab-separated first.
pub fn build_registry() -> wsave_core::Result<FilterRegistry<Table>> {
    FilterRegistry::from_writers([
        (
            TAB_FILTER,
            Box::new(DelimitedWriter::tab()) as Box<dyn Writer<Table>>,
        ),
        (
            CSV_FILTER,
            Box::new(DelimitedWriter::comma()) as Box<dyn Writer<Table>>,
        ),
        (JSON_FILTER, Box::new(JsonWriter) as Box<dyn Writer<Table>>),
        (
            TAB_TEXT_FILTER,
            Box::new(DelimitedWriter::tab()) as Box<dyn Writer<Table>>,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn table() -> Table {
        Table::new(
            vec!["sepal".into(), "species".into()],
            vec![vec!["5.1".into(), "setosa".into()]],
        )
    }

    #[test]
    fn test_tab_writer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iris.tab");
        DelimitedWriter::tab().write(&path, &table()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "sepal\tspecies\n5.1\tsetosa\n"
        );
    }

    #[test]
    fn test_json_writer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iris.json");
        JsonWriter.write(&path, &table()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["headers"][1], "species");
        assert_eq!(value["rows"][0][0], "5.1");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("iris.csv");
        let err = DelimitedWriter::comma().write(&path, &table()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_registry_order_and_extensions() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.default_filter(), TAB_FILTER);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.extension_for(TAB_TEXT_FILTER).unwrap(), ".tab.txt");
        assert!(registry.all_extensions().contains("txt"));
    }
}
