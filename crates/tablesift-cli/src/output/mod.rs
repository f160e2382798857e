pub mod json;
pub mod table;

use tablesift_core::output::{CsvDirWriter, JsonWriter, TableWriter, ZipBundleWriter};

/// The file writer for a `--format` value; `None` for the preview format.
pub fn writer_for(format: &str) -> Option<Box<dyn TableWriter>> {
    match format {
        "csv" => Some(Box::new(CsvDirWriter)),
        "json" => Some(Box::new(JsonWriter)),
        "zip" => Some(Box::new(ZipBundleWriter)),
        _ => None,
    }
}
