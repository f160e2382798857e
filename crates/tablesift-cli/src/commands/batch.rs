use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};
use tablesift_core::config::ExtractConfig;
use tablesift_core::error::TableError;
use tablesift_core::extraction::pdftotext::PdftotextExtractor;
use tablesift_core::output::TableWriter;
use walkdir::WalkDir;

use crate::output;

pub fn run(
    input_dir: PathBuf,
    out_dir: Option<PathBuf>,
    recursive: bool,
    jobs: Option<usize>,
    format: &str,
    config_file: Option<PathBuf>,
) -> Result<(), TableError> {
    let config = super::settings(config_file.as_deref())?;
    let writer = output::writer_for(format)
        .ok_or_else(|| TableError::ConfigInvalid(format!("unknown output format '{format}'")))?;

    let pdfs = find_pdfs(&input_dir, recursive);
    if pdfs.is_empty() {
        eprintln!("No PDF files found in {}", input_dir.display());
        return Ok(());
    }
    eprintln!("Found {} PDF file(s) to process", pdfs.len());

    let out_dir = out_dir.unwrap_or_else(|| input_dir.clone());
    let extractor = PdftotextExtractor::new();
    let process = |pdf: &PathBuf| {
        let prefix = output_prefix(pdf, &input_dir);
        let outcome = process_file(pdf, &prefix, &extractor, &config, &*writer, &out_dir);
        (pdf.clone(), outcome)
    };

    let threads = jobs
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|v| v.get())
                .unwrap_or(4)
        })
        .clamp(1, pdfs.len());
    let outcomes: Vec<(PathBuf, Result<usize, TableError>)> = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map(|pool| pool.install(|| pdfs.par_iter().map(process).collect()))
        .unwrap_or_else(|_| pdfs.iter().map(process).collect());

    let mut failed = 0usize;
    for (pdf, outcome) in &outcomes {
        match outcome {
            Ok(0) => eprintln!("  {}: no tables", pdf.display()),
            Ok(n) => eprintln!("  {}: {n} table(s)", pdf.display()),
            Err(e) => {
                failed += 1;
                eprintln!("  {}: failed: {e}", pdf.display());
            }
        }
    }

    eprintln!(
        "Batch complete: {} processed, {} failed",
        outcomes.len() - failed,
        failed
    );
    if failed > 0 {
        return Err(TableError::Extraction(format!(
            "{failed} of {} file(s) failed",
            outcomes.len()
        )));
    }
    Ok(())
}

/// PDFs under `dir`, sorted. Only the top level unless `recursive`.
fn find_pdfs(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut pdfs: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();
    pdfs
}

/// File name prefix for a PDF's outputs: its path under `root` without
/// the extension, directories joined with `_`, so same-named files in
/// different subdirectories do not collide.
fn output_prefix(pdf: &Path, root: &Path) -> String {
    let Ok(relative) = pdf.strip_prefix(root) else {
        return super::base_name(pdf);
    };
    let mut parts: Vec<String> = relative
        .parent()
        .map(|dir| dir.iter().map(|c| c.to_string_lossy().into_owned()).collect())
        .unwrap_or_default();
    parts.push(super::base_name(relative));
    parts.join("_")
}

fn process_file(
    pdf: &Path,
    prefix: &str,
    extractor: &PdftotextExtractor,
    config: &ExtractConfig,
    writer: &dyn TableWriter,
    out_dir: &Path,
) -> Result<usize, TableError> {
    log::info!("Processing {}", pdf.display());
    let pdf_bytes = std::fs::read(pdf)?;
    let result = tablesift_core::extract_pdf(&pdf_bytes, extractor, config)?;
    writer.write(&result, prefix, out_dir)?;
    Ok(result.tables.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pdfs_depth() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        for path in [
            dir.path().join("b.pdf"),
            dir.path().join("a.PDF"),
            dir.path().join("notes.txt"),
            nested.join("c.pdf"),
        ] {
            std::fs::write(path, b"%PDF-1.4").unwrap();
        }

        let top = find_pdfs(dir.path(), false);
        assert_eq!(top, vec![dir.path().join("a.PDF"), dir.path().join("b.pdf")]);

        let all = find_pdfs(dir.path(), true);
        assert_eq!(all.len(), 3);
        assert!(all.contains(&nested.join("c.pdf")));
    }

    #[test]
    fn test_nested_pdfs_get_distinct_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        for month in ["jan", "feb"] {
            let sub = dir.path().join(month);
            std::fs::create_dir(&sub).unwrap();
            std::fs::write(sub.join("statement.pdf"), b"%PDF-1.4").unwrap();
        }
        std::fs::write(dir.path().join("summary.pdf"), b"%PDF-1.4").unwrap();

        let prefixes: Vec<String> = find_pdfs(dir.path(), true)
            .iter()
            .map(|pdf| output_prefix(pdf, dir.path()))
            .collect();
        assert_eq!(prefixes, vec!["feb_statement", "jan_statement", "summary"]);
    }
}
