use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{csv_file_name, table_to_csv, TableWriter};
use crate::error::TableError;
use crate::model::ExtractionResult;

/// Every table as a CSV entry of a single `{base}_tables.zip`.
pub struct ZipBundleWriter;

impl TableWriter for ZipBundleWriter {
    fn format_name(&self) -> &str {
        "zip"
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

        let path = out_dir.join(format!("{base_name}_tables.zip"));
        let file = std::fs::File::create(&path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for table in &result.tables {
            zip.start_file(csv_file_name(base_name, table), options)?;
            zip.write_all(&table_to_csv(table)?)?;
        }
        zip.finish()?;

        log::info!("Created ZIP archive at {}", path.display());
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableCandidate;
    use std::io::Read;

    #[test]
    fn test_bundle_holds_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult {
            strategy: Some("bank_statement".into()),
            tables: vec![
                TableCandidate::new("Account_Information", vec!["bank_name".into()], vec![vec!["Acme".into()]]),
                TableCandidate::new("Transactions", vec!["date".into()], vec![vec!["01-Jan-2023".into()]]),
            ],
        };

        let paths = ZipBundleWriter.write(&result, "stmt", dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("stmt_tables.zip")]);

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&paths[0]).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut entry = archive.by_name("stmt_Transactions.csv").unwrap();
        let mut body = String::new();
        entry.read_to_string(&mut body).unwrap();
        assert_eq!(body, "date\n01-Jan-2023\n");
    }
}
