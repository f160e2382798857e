pub mod assemble;
pub mod bank;
pub mod config;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod orchestrator;
pub mod output;
pub mod strategy;

use config::ExtractConfig;
use error::TableError;
use extraction::PdfExtractor;
use model::ExtractionResult;
use orchestrator::Extractor;

/// Main API entry point: find the tables in a PDF.
///
/// Failing to open the document is fatal. Finding no tables is not an
/// error; the result is simply empty.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ExtractConfig,
) -> Result<ExtractionResult, TableError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    log::info!(
        "PDF has {} pages (backend: {})",
        pages.len(),
        extractor.backend_name()
    );

    let result = Extractor::new(config).extract(&pages)?;
    for table in &result.tables {
        log::debug!(
            "{}: {} columns, {} rows",
            table.name,
            table.column_count(),
            table.rows.len()
        );
    }
    Ok(result)
}
