//! Writers that serialize an [`ExtractionResult`] to files.

pub mod csv_dir;
pub mod json;
pub mod zip_bundle;

use std::path::{Path, PathBuf};

use crate::assemble::sanitize_name;
use crate::error::TableError;
use crate::model::{ExtractionResult, TableCandidate};

pub use csv_dir::CsvDirWriter;
pub use json::JsonWriter;
pub use zip_bundle::ZipBundleWriter;

/// Serializes extracted tables into `out_dir`.
pub trait TableWriter: Send + Sync {
    fn format_name(&self) -> &str;

    /// Write `result` using `base_name` (usually the PDF's file stem) as a
    /// file name prefix. Returns the paths written; nothing is written for
    /// an empty result.
    fn write(
        &self,
        result: &ExtractionResult,
        base_name: &str,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, TableError>;
}

/// `{base}_{table}.csv`, with the table name made file-name safe.
pub fn csv_file_name(base_name: &str, table: &TableCandidate) -> String {
    format!("{base_name}_{}.csv", sanitize_name(&table.name))
}

/// Render one table as CSV, header row first.
pub fn table_to_csv(table: &TableCandidate) -> Result<Vec<u8>, TableError> {
    let mut wtr = ::csv::Writer::from_writer(Vec::new());
    if !table.headers.is_empty() {
        wtr.write_record(&table.headers)?;
    }
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.into_inner().map_err(|e| TableError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_to_csv_quotes_cells() {
        let table = TableCandidate::new(
            "Page:1/Table*2",
            vec!["Description".into(), "Amount".into()],
            vec![vec!["Rent, May".into(), "1,200.00".into()]],
        );
        let csv = String::from_utf8(table_to_csv(&table).unwrap()).unwrap();
        assert_eq!(csv, "Description,Amount\n\"Rent, May\",\"1,200.00\"\n");
        assert_eq!(csv_file_name("march", &table), "march_Page_1_Table_2.csv");
    }
}
