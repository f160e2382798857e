use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::TableWriter;
use crate::error::TableError;
use crate::model::ExtractionResult;

/// The whole result as pretty-printed `{base}_tables.json`.
pub struct JsonWriter;

impl TableWriter for JsonWriter {
    fn format_name(&self) -> &str {
        "json"
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

        let path = out_dir.join(format!("{base_name}_tables.json"));
        let file = std::fs::File::create(&path)?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, result)?;
        out.flush()?;
        log::info!("Saved tables to {}", path.display());
        Ok(vec![path])
    }
}
