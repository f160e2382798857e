use serde::{Deserialize, Serialize};

/// A named table found in a document.
///
/// After assembly every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCandidate {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableCandidate {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        TableCandidate {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Outcome of one extraction run. No tables is a normal outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Strategy that produced the tables, `None` when nothing was found.
    pub strategy: Option<String>,
    pub tables: Vec<TableCandidate>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// `Column_1`, `Column_2`, ... for tables without usable labels.
pub fn generic_headers(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Column_{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_headers() {
        assert_eq!(generic_headers(3), vec!["Column_1", "Column_2", "Column_3"]);
        assert!(generic_headers(0).is_empty());
    }
}
