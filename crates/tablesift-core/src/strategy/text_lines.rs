use super::{per_page, Strategy};
use crate::config::ExtractConfig;
use crate::error::TableError;
use crate::extraction::PageSource;
use crate::layout::patterns::{DATE, DELIMITERS, NUMBER, WIDE_GAP};
use crate::layout::ColumnDetector;
use crate::model::TableCandidate;
use crate::orchestrator::Deadline;

/// Finds tables in plain text lines, without glyph geometry.
///
/// Pages are segmented into sections of table-like lines, and each section
/// is split into columns on its own.
pub struct TextLinesStrategy {
    detector: ColumnDetector,
    min_section_lines: usize,
    similarity_anchor: f64,
    similarity_extend: f64,
}

impl TextLinesStrategy {
    pub fn new(config: &ExtractConfig) -> Self {
        TextLinesStrategy {
            detector: ColumnDetector::new(config.space_threshold, config.cluster_tolerance),
            min_section_lines: config.min_section_lines,
            similarity_anchor: config.similarity_anchor,
            similarity_extend: config.similarity_extend,
        }
    }

    fn find(&self, page: &dyn PageSource) -> Result<Vec<TableCandidate>, TableError> {
        let text = page.text()?;
        let lines: Vec<&str> = text.split('\n').collect();

        let mut tables = Vec::new();
        for (j, section) in self.find_sections(&lines).iter().enumerate() {
            if section.len() < self.min_section_lines {
                continue;
            }
            let Some(bounds) = self.detector.detect(section) else {
                continue;
            };

            let headers = bounds.slice(section[0]);
            let rows: Vec<Vec<String>> = section[1..].iter().map(|l| bounds.slice(l)).collect();
            if rows.is_empty() {
                continue;
            }
            let name = format!("Page_{}_Section_{}", page.page_number(), j + 1);
            tables.push(TableCandidate::new(name, headers, rows));
        }
        Ok(tables)
    }

    /// Split lines into runs of table-like lines.
    ///
    /// A run ends at a blank line, or at a non-qualifying line once it has
    /// two or more lines (shorter runs are dropped). When no run is found
    /// the structural similarity fallback is used instead.
    fn find_sections<'a>(&self, lines: &[&'a str]) -> Vec<Vec<&'a str>> {
        let mut sections = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut in_table = false;

        for &line in lines {
            if line.trim().is_empty() {
                if in_table && !current.is_empty() {
                    sections.push(std::mem::take(&mut current));
                    in_table = false;
                }
                continue;
            }

            if is_potential_table_row(line) {
                if !in_table {
                    in_table = true;
                    current.clear();
                }
                current.push(line);
            } else {
                if in_table && current.len() >= 2 {
                    sections.push(std::mem::take(&mut current));
                }
                in_table = false;
            }
        }
        if in_table && current.len() >= 2 {
            sections.push(current);
        }

        if sections.is_empty() {
            sections = self.similar_runs(lines);
        }
        sections
    }

    /// Runs of at least three structurally similar lines.
    ///
    /// Three neighbours pairwise at or above the anchor similarity open a
    /// run, which grows while each next line stays at or above the extend
    /// similarity to the run's first line. Lines in a run are not rescanned.
    fn similar_runs<'a>(&self, lines: &[&'a str]) -> Vec<Vec<&'a str>> {
        let mut sections = Vec::new();
        let mut i = 0;
        while i + 2 < lines.len() {
            if line_similarity(lines[i], lines[i + 1]) >= self.similarity_anchor
                && line_similarity(lines[i + 1], lines[i + 2]) >= self.similarity_anchor
            {
                let mut end = i + 3;
                while end < lines.len()
                    && line_similarity(lines[i], lines[end]) >= self.similarity_extend
                {
                    end += 1;
                }
                sections.push(lines[i..end].to_vec());
                i = end;
            } else {
                i += 1;
            }
        }
        sections
    }
}

impl Strategy for TextLinesStrategy {
    fn name(&self) -> &str {
        "text_lines"
    }

    fn extract(
        &self,
        pages: &[&dyn PageSource],
        deadline: &Deadline,
    ) -> Result<Vec<TableCandidate>, TableError> {
        per_page(self.name(), pages, deadline, |page| self.find(page))
    }
}

/// Whether a line could be a table row: wide gaps, a repeated delimiter,
/// several numbers, or a date.
pub fn is_potential_table_row(line: &str) -> bool {
    WIDE_GAP.find_iter(line).count() >= 2
        || DELIMITERS
            .iter()
            .any(|&d| line.matches(d).count() >= 2)
        || NUMBER.find_iter(line).count() >= 2
        || DATE.is_match(line)
}

/// Share of positions where two lines have the same character class
/// (space, digit, other), over the shorter line.
pub fn line_similarity(a: &str, b: &str) -> f64 {
    let len = a.chars().count().min(b.chars().count());
    if len == 0 {
        return 0.0;
    }
    let matches = a
        .chars()
        .zip(b.chars())
        .filter(|&(x, y)| char_class(x) == char_class(y))
        .count();
    matches as f64 / len as f64
}

fn char_class(c: char) -> char {
    if c.is_whitespace() {
        'S'
    } else if c.is_numeric() {
        'D'
    } else {
        'L'
    }
}
