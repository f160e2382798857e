//! Table candidate builders.
//!
//! Each strategy looks at every page of a document and proposes zero or more
//! tables. The orchestrator runs them as a cascade and stops at the first
//! strategy that finds something.

pub mod glyph_layout;
pub mod native;
pub mod structured;
pub mod text_lines;

use crate::bank::BankStatementStrategy;
use crate::config::ExtractConfig;
use crate::error::TableError;
use crate::extraction::PageSource;
use crate::model::TableCandidate;
use crate::orchestrator::Deadline;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use glyph_layout::GlyphLayoutStrategy;
pub use native::NativeStrategy;
pub use structured::StructuredStrategy;
pub use text_lines::TextLinesStrategy;

/// A table-finding strategy.
pub trait Strategy: Send + Sync {
    /// Short name used in logs and in [`crate::model::ExtractionResult`].
    fn name(&self) -> &str;

    /// Propose tables for the whole document.
    ///
    /// Failures on a single page are logged and skipped; only fatal errors
    /// (such as an exceeded deadline) are returned.
    fn extract(
        &self,
        pages: &[&dyn PageSource],
        deadline: &Deadline,
    ) -> Result<Vec<TableCandidate>, TableError>;
}

/// The built-in strategies, as named in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Native,
    BankStatement,
    GlyphLayout,
    TextLines,
    Structured,
}

impl StrategyKind {
    pub fn build(self, config: &ExtractConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Native => Box::new(NativeStrategy),
            StrategyKind::BankStatement => Box::new(BankStatementStrategy::new(config)),
            StrategyKind::GlyphLayout => Box::new(GlyphLayoutStrategy::new(config)),
            StrategyKind::TextLines => Box::new(TextLinesStrategy::new(config)),
            StrategyKind::Structured => Box::new(StructuredStrategy::new(config)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Native => "native",
            StrategyKind::BankStatement => "bank_statement",
            StrategyKind::GlyphLayout => "glyph_layout",
            StrategyKind::TextLines => "text_lines",
            StrategyKind::Structured => "structured",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run `find` on every page, checking the deadline before each one.
///
/// A page whose `find` fails contributes nothing; the error is logged with
/// the strategy name and page number.
pub(crate) fn per_page<F>(
    strategy: &str,
    pages: &[&dyn PageSource],
    deadline: &Deadline,
    mut find: F,
) -> Result<Vec<TableCandidate>, TableError>
where
    F: FnMut(&dyn PageSource) -> Result<Vec<TableCandidate>, TableError>,
{
    let mut tables = Vec::new();
    for &page in pages {
        deadline.check()?;
        match find(page) {
            Ok(found) => {
                for table in &found {
                    log::debug!(
                        "[{strategy}] page {}: {} ({} columns, {} rows)",
                        page.page_number(),
                        table.name,
                        table.column_count(),
                        table.rows.len()
                    );
                }
                tables.extend(found);
            }
            Err(e) => log::warn!("[{strategy}] page {}: {e}", page.page_number()),
        }
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_serde() {
        for kind in [
            StrategyKind::Native,
            StrategyKind::BankStatement,
            StrategyKind::GlyphLayout,
            StrategyKind::TextLines,
            StrategyKind::Structured,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
            assert_eq!(kind.build(&ExtractConfig::default()).name(), kind.as_str());
        }
    }
}
