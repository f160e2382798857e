use regex::Regex;
use std::sync::LazyLock;

use super::{per_page, Strategy};
use crate::config::ExtractConfig;
use crate::error::TableError;
use crate::extraction::PageSource;
use crate::layout::patterns::{has_number_or_date, WIDE_GAP};
use crate::model::{generic_headers, TableCandidate};
use crate::orchestrator::Deadline;

/// Page numbers and bare numeric lines.
static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Page \d+|^\s*\d+\s*$").expect("page marker pattern is valid")
});

/// Last resort: every line carrying a number or a date, split on wide gaps.
pub struct StructuredStrategy {
    min_line_len: usize,
}

impl StructuredStrategy {
    pub fn new(config: &ExtractConfig) -> Self {
        StructuredStrategy {
            min_line_len: config.structured_min_line_len,
        }
    }

    fn find(&self, page: &dyn PageSource) -> Result<Vec<TableCandidate>, TableError> {
        let text = page.text()?;
        let lines: Vec<&str> = text
            .split('\n')
            .filter(|l| l.chars().count() > self.min_line_len && !PAGE_MARKER.is_match(l))
            .collect();
        if lines.len() < 3 {
            return Ok(Vec::new());
        }

        let rows: Vec<Vec<String>> = lines
            .iter()
            .filter(|l| has_number_or_date(l))
            .map(|l| WIDE_GAP.split(l.trim()).map(String::from).collect::<Vec<_>>())
            .filter(|chunks| chunks.len() >= 2)
            .collect();
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let name = format!("Page_{}_Structured_Data", page.page_number());
        Ok(vec![TableCandidate::new(name, generic_headers(width), rows)])
    }
}

impl Strategy for StructuredStrategy {
    fn name(&self) -> &str {
        "structured"
    }

    fn extract(
        &self,
        pages: &[&dyn PageSource],
        deadline: &Deadline,
    ) -> Result<Vec<TableCandidate>, TableError> {
        per_page(self.name(), pages, deadline, |page| self.find(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PageContent;

    fn strategy() -> StructuredStrategy {
        StructuredStrategy::new(&ExtractConfig::default())
    }

    #[test]
    fn test_numeric_lines_split_on_gaps() {
        let page = PageContent::from_lines(
            3,
            &[
                "Quarterly summary for the region",
                "   North office  1,200  up 4%",
                "South office    980",
                "Page 3 of 9 generated automatically",
                "            42",
                "No figures in this sentence at all",
            ],
        );
        let tables = strategy().find(&page).unwrap();
        assert_eq!(tables.len(), 1);
        let t = &tables[0];
        assert_eq!(t.name, "Page_3_Structured_Data");
        assert_eq!(t.headers, vec!["Column_1", "Column_2", "Column_3"]);
        assert_eq!(t.rows[0], vec!["North office", "1,200", "up 4%"]);
        assert_eq!(t.rows[1], vec!["South office", "980"]);
    }

    #[test]
    fn test_needs_three_long_lines() {
        let page = PageContent::from_lines(1, &["Total due  12.00", "short 1", "Paid on  01/02/2023"]);
        assert!(strategy().find(&page).unwrap().is_empty());
    }
}
