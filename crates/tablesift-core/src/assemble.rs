use crate::model::{generic_headers, TableCandidate};

/// Normalize a candidate into a rectangular table.
///
/// Headers and rows are padded with empty cells to the widest of them. Blank
/// headers are replaced by the first row; if that is blank too, generic
/// `Column_N` labels are used. Assembling an assembled table changes nothing.
pub fn assemble(candidate: TableCandidate) -> TableCandidate {
    let TableCandidate {
        name,
        mut headers,
        mut rows,
    } = candidate;

    let max_cols = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    // Zero-width rows carry nothing.
    if max_cols == 0 {
        rows.clear();
    }
    headers.resize(max_cols, String::new());
    for row in &mut rows {
        row.resize(max_cols, String::new());
    }

    if all_blank(&headers) && !rows.is_empty() {
        headers = rows.remove(0);
    }
    if all_blank(&headers) {
        headers = generic_headers(max_cols);
    }

    TableCandidate {
        name,
        headers,
        rows,
    }
}

/// Make a table name safe for file names and sheet names.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '[' | ']' | ':' | '?' => '_',
            c => c,
        })
        .collect()
}

fn all_blank(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pads_ragged_rows() {
        let t = assemble(TableCandidate::new(
            "t",
            cells(&["A", "B"]),
            vec![cells(&["1"]), cells(&["1", "2", "3"])],
        ));
        assert_eq!(t.headers, cells(&["A", "B", ""]));
        assert!(t.rows.iter().all(|r| r.len() == 3));
        assert_eq!(t.rows[0], cells(&["1", "", ""]));
    }

    #[test]
    fn test_promotes_first_row_when_headers_blank() {
        let t = assemble(TableCandidate::new(
            "t",
            cells(&["", " "]),
            vec![cells(&["Date", "Amount"]), cells(&["01/01/2023", "5.00"])],
        ));
        assert_eq!(t.headers, cells(&["Date", "Amount"]));
        assert_eq!(t.rows.len(), 1);
    }

    #[test]
    fn test_generic_headers_when_nothing_usable() {
        let t = assemble(TableCandidate::new("t", vec![], vec![cells(&["", ""])]));
        assert_eq!(t.headers, cells(&["Column_1", "Column_2"]));
        assert!(t.rows.is_empty());

        let empty = assemble(TableCandidate::new("t", vec![], vec![]));
        assert!(empty.headers.is_empty());
        assert!(empty.rows.is_empty());

        let hollow = assemble(TableCandidate::new("t", vec![], vec![vec![], vec![]]));
        assert!(hollow.headers.is_empty());
        assert!(hollow.rows.is_empty());
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let inputs = vec![
            TableCandidate::new("a", cells(&["x"]), vec![cells(&["1", "2"]), cells(&[])]),
            TableCandidate::new("b", vec![], vec![cells(&["h1", "h2"]), cells(&["v"])]),
            TableCandidate::new("c", cells(&["", ""]), vec![cells(&["", ""]), cells(&["q"])]),
            TableCandidate::new("d", vec![], vec![vec![], vec![]]),
        ];
        for input in inputs {
            let once = assemble(input);
            let twice = assemble(once.clone());
            assert_eq!(once, twice);
            assert!(once.rows.iter().all(|r| r.len() == once.headers.len()));
        }
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Page:1/Table*2"), "Page_1_Table_2");
        assert_eq!(sanitize_name(r"a\b[c]?"), "a_b_c__");
        assert_eq!(sanitize_name("Transactions"), "Transactions");
    }
}
