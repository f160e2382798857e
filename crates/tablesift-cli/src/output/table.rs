use tablesift_core::model::{ExtractionResult, TableCandidate};

/// Rows shown per table before the preview is cut short.
const PREVIEW_ROWS: usize = 20;

pub fn print(result: &ExtractionResult) {
    print!("{}", format_result(result));
}

pub fn format_result(result: &ExtractionResult) -> String {
    let mut out = String::new();
    if let Some(ref strategy) = result.strategy {
        out.push_str(&format!(
            "{} table(s) found with the {} strategy\n",
            result.tables.len(),
            strategy
        ));
    }
    for table in &result.tables {
        out.push('\n');
        out.push_str(&format_table(table));
    }
    out
}

fn format_table(table: &TableCandidate) -> String {
    let shown = table.rows.len().min(PREVIEW_ROWS);
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows[..shown] {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = format!(
        "=== {} ({} columns, {} rows) ===\n\n",
        table.name,
        table.column_count(),
        table.rows.len()
    );
    out.push_str(&format_row(&table.headers, &widths));
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&format!("  {}\n", "-".repeat(rule_len)));
    for row in &table.rows[..shown] {
        out.push_str(&format_row(row, &widths));
    }
    if table.rows.len() > shown {
        out.push_str(&format!("  ... {} more row(s)\n", table.rows.len() - shown));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("  {}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_aligned() {
        let result = ExtractionResult {
            strategy: Some("text_lines".into()),
            tables: vec![TableCandidate::new(
                "Page_1_Section_1",
                vec!["Name".into(), "Age".into()],
                vec![
                    vec!["Alice".into(), "30".into()],
                    vec!["Bo".into(), "5".into()],
                ],
            )],
        };
        let text = format_result(&result);
        assert!(text.starts_with("1 table(s) found with the text_lines strategy\n"));
        assert!(text.contains("=== Page_1_Section_1 (2 columns, 2 rows) ===\n"));
        assert!(text.contains("  Name   Age\n  ----------\n  Alice  30\n  Bo     5\n"));
    }

    #[test]
    fn test_long_tables_are_cut() {
        let rows = (0..25).map(|i| vec![i.to_string()]).collect();
        let table = TableCandidate::new("T", vec!["n".into()], rows);
        let text = format_table(&table);
        assert!(text.contains("  19\n"));
        assert!(!text.contains("  20\n"));
        assert!(text.ends_with("  ... 5 more row(s)\n"));
    }
}
