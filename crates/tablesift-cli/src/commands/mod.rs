pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};
use tablesift_core::config::{load_config, ExtractConfig};
use tablesift_core::error::TableError;

/// Settings from `path`, or the defaults.
fn settings(path: Option<&Path>) -> Result<ExtractConfig, TableError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(ExtractConfig::default()),
    }
}

/// File name prefix for a PDF's outputs.
fn base_name(pdf: &Path) -> String {
    pdf.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
