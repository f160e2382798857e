use regex::Regex;
use std::sync::LazyLock;

/// Integer or decimal number token.
pub static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Dates commonly printed in statement rows: `01-Jan-2023`, `01/01/2023`, `01-01-2023`.
pub static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}[-/.][A-Za-z]{3}[-/.]\d{4}|\d{2}/\d{2}/\d{4}|\d{2}-\d{2}-\d{4}")
        .expect("date pattern is valid")
});

/// Tokens whose start offsets mark column alignment.
pub static ALIGNED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?|\d{2}[-/.][A-Za-z]{3}[-/.]\d{4}|\d{2}/\d{2}/\d{4}")
        .expect("aligned token pattern is valid")
});

/// A run of two or more whitespace characters.
pub static WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("wide gap pattern is valid"));

/// A cell that holds a value rather than a label.
static DATA_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+(]?[$€£]?\d[\d,]*(?:\.\d+)?\)?%?(?:\s*(?:Dr|Cr))?|\d{2}[-/.](?:\d{2}|[A-Za-z]{3})[-/.]\d{2,4})$",
    )
    .expect("data cell pattern is valid")
});

/// Delimiters recognised in plain-text tables, in priority order.
pub const DELIMITERS: [char; 4] = ['|', '\t', ';', ','];

pub fn has_number_or_date(line: &str) -> bool {
    NUMBER.is_match(line) || DATE.is_match(line)
}

pub fn is_data_cell(cell: &str) -> bool {
    DATA_CELL.is_match(cell.trim())
}

/// Whether a row reads as column labels rather than data.
///
/// It needs at least one non-empty cell, and fewer than half of its
/// non-empty cells may look like numbers or dates.
pub fn looks_like_header(row: &[String]) -> bool {
    let filled: Vec<&String> = row.iter().filter(|c| !c.trim().is_empty()).collect();
    if filled.is_empty() {
        return false;
    }
    let data = filled.iter().filter(|c| is_data_cell(c)).count();
    data * 2 < filled.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_data_cells() {
        assert!(is_data_cell("5,000.00"));
        assert!(is_data_cell(" 42 "));
        assert!(is_data_cell("(1,200.50)"));
        assert!(is_data_cell("48,000.00 Cr"));
        assert!(is_data_cell("01-Jan-2023"));
        assert!(is_data_cell("01/01/23"));
        assert!(!is_data_cell("Balance"));
        assert!(!is_data_cell("Ref 123"));
    }

    #[test]
    fn test_looks_like_header() {
        assert!(looks_like_header(&row(&["Date", "Description", "Amount"])));
        // Half of the filled cells are values: treated as data.
        assert!(!looks_like_header(&row(&["Name", "", "2023"])));
        assert!(!looks_like_header(&row(&["01/01/2023", "Coffee", "3.50"])));
        assert!(!looks_like_header(&row(&["", " "])));
    }

    #[test]
    fn test_has_number_or_date() {
        assert!(has_number_or_date("Total 12"));
        assert!(has_number_or_date("on 01-Jan-2023"));
        assert!(!has_number_or_date("no digits here"));
    }
}
