use std::path::PathBuf;
use tablesift_core::error::TableError;
use tablesift_core::extraction::pdftotext::PdftotextExtractor;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    out_dir: Option<PathBuf>,
    format: &str,
    config_file: Option<PathBuf>,
    no_aggressive: bool,
) -> Result<(), TableError> {
    let mut config = super::settings(config_file.as_deref())?;
    if no_aggressive {
        config.run_aggressive = false;
    }

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let result = tablesift_core::extract_pdf(&pdf_bytes, &extractor, &config)?;

    if result.is_empty() {
        eprintln!("No tables were detected in {}", pdf_file.display());
        if !config.run_aggressive {
            eprintln!("  hint: drop --no-aggressive to try the fallback strategies");
        }
        return Ok(());
    }

    if format == "json" && out_dir.is_none() {
        return output::json::print(&result);
    }
    let Some(writer) = output::writer_for(format) else {
        output::table::print(&result);
        return Ok(());
    };

    let dir = out_dir.unwrap_or_else(|| super::parent_dir(&pdf_file));
    let paths = writer.write(&result, &super::base_name(&pdf_file), &dir)?;
    eprintln!(
        "Extracted {} table(s) with the {} strategy, written as {}:",
        result.tables.len(),
        result.strategy.as_deref().unwrap_or("unknown"),
        writer.format_name()
    );
    for path in &paths {
        eprintln!("  {}", path.display());
    }
    Ok(())
}
