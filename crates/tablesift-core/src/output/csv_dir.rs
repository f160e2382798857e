use std::path::{Path, PathBuf};

use super::{csv_file_name, table_to_csv, TableWriter};
use crate::error::TableError;
use crate::model::ExtractionResult;

/// One CSV file per table.
pub struct CsvDirWriter;

impl TableWriter for CsvDirWriter {
    fn format_name(&self) -> &str {
        "csv"
    }

    fn write(
        &self,
        result: &ExtractionResult,
        base_name: &str,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, TableError> {
        if result.is_empty() {
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(out_dir)?;

        let mut paths = Vec::with_capacity(result.tables.len());
        for table in &result.tables {
            let path = out_dir.join(csv_file_name(base_name, table));
            std::fs::write(&path, table_to_csv(table)?)?;
            log::info!("Saved table to {}", path.display());
            paths.push(path);
        }
        Ok(paths)
    }
}
