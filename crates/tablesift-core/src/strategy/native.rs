use super::{per_page, Strategy};
use crate::error::TableError;
use crate::extraction::{PageSource, RawTable, TableSettings};
use crate::layout::patterns::looks_like_header;
use crate::model::{generic_headers, TableCandidate};
use crate::orchestrator::Deadline;

/// Delegates to the page source's own geometry-aware table detection.
///
/// A strict pass runs first; pages where it finds nothing get a lenient pass.
pub struct NativeStrategy;

impl Strategy for NativeStrategy {
    fn name(&self) -> &str {
        "native"
    }

    fn extract(
        &self,
        pages: &[&dyn PageSource],
        deadline: &Deadline,
    ) -> Result<Vec<TableCandidate>, TableError> {
        per_page(self.name(), pages, deadline, |page| {
            let Some(strict) = page.extract_tables(&TableSettings::STRICT) else {
                return Ok(Vec::new());
            };
            let mut raw = strict?;
            if raw.is_empty() {
                if let Some(lenient) = page.extract_tables(&TableSettings::LENIENT) {
                    raw = lenient?;
                }
            }

            Ok(raw
                .into_iter()
                .enumerate()
                .filter_map(|(j, table)| {
                    let name = format!("Page_{}_Table_{}", page.page_number(), j + 1);
                    candidate_from_raw(name, table)
                })
                .collect())
        })
    }
}

fn candidate_from_raw(name: String, raw: RawTable) -> Option<TableCandidate> {
    let mut rows: Vec<Vec<String>> = raw
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(|c| c.trim().to_string()).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();
    if rows.is_empty() {
        return None;
    }

    let headers = if looks_like_header(&rows[0]) {
        rows.remove(0)
    } else {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        generic_headers(width)
    };
    Some(TableCandidate::new(name, headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{BBox, PageContent, Word};

    fn word(text: &str, x: f32, y: f32) -> Word {
        Word {
            text: text.into(),
            bbox: BBox {
                x_min: x,
                y_min: y,
                x_max: x + 6.0 * text.len() as f32,
                y_max: y + 10.0,
            },
        }
    }

    fn raw(rows: &[&[Option<&str>]]) -> RawTable {
        rows.iter()
            .map(|r| r.iter().map(|c| c.map(String::from)).collect())
            .collect()
    }

    #[test]
    fn test_header_row_promoted() {
        let t = candidate_from_raw(
            "t".into(),
            raw(&[
                &[Some("Date"), Some("Amount")],
                &[None, None],
                &[Some("01/01/2023"), Some(" 5.00 ")],
            ]),
        )
        .unwrap();
        assert_eq!(t.headers, vec!["Date", "Amount"]);
        assert_eq!(t.rows, vec![vec!["01/01/2023".to_string(), "5.00".into()]]);
    }

    #[test]
    fn test_data_first_row_gets_generic_headers() {
        let t = candidate_from_raw(
            "t".into(),
            raw(&[&[Some("01/01/2023"), Some("5.00")], &[Some("02/01/2023"), Some("7.00")]]),
        )
        .unwrap();
        assert_eq!(t.headers, vec!["Column_1", "Column_2"]);
        assert_eq!(t.rows.len(), 2);
    }

    #[test]
    fn test_blank_table_dropped() {
        assert!(candidate_from_raw("t".into(), raw(&[&[None, Some("  ")]])).is_none());
    }

    #[test]
    fn test_lenient_pass_after_empty_strict() {
        let word_lines = vec![
            vec![word("Name", 10.0, 10.0), word("Qty", 120.0, 10.0)],
            vec![word("Bolt", 12.0, 30.0), word("4", 123.0, 30.0)],
        ];
        let lines = vec!["Name      Qty".to_string(), "Bolt      4".to_string()];
        let page = PageContent::from_word_lines(4, lines, &word_lines);
        assert!(matches!(
            page.extract_tables(&TableSettings::STRICT),
            Some(Ok(ref t)) if t.is_empty()
        ));

        let pages: Vec<&dyn PageSource> = vec![&page];
        let tables = NativeStrategy
            .extract(&pages, &Deadline::unbounded())
            .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "Page_4_Table_1");
        assert_eq!(tables[0].headers, vec!["Name", "Qty"]);
        assert_eq!(tables[0].rows, vec![vec!["Bolt".to_string(), "4".into()]]);
    }
}
