use super::cluster::{cluster_positions, DEFAULT_TOLERANCE};
use super::patterns::{ALIGNED_TOKEN, DELIMITERS};

/// Strictly increasing column cut points over character offsets.
///
/// Always starts at 0 and ends at the longest line of the block it was
/// computed from. Usable only with at least two cut points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySet {
    cuts: Vec<usize>,
    delimiter: Option<char>,
}

impl BoundarySet {
    /// Build a set from interior cut points, which must be sorted ascending.
    /// Points that would break strict ordering are dropped.
    pub fn from_cuts(
        inner: impl IntoIterator<Item = usize>,
        max_len: usize,
        delimiter: Option<char>,
    ) -> Self {
        let mut cuts = vec![0];
        for cut in inner {
            if cut > cuts[cuts.len() - 1] && cut < max_len {
                cuts.push(cut);
            }
        }
        if max_len > 0 {
            cuts.push(max_len);
        }
        BoundarySet { cuts, delimiter }
    }

    pub fn cuts(&self) -> &[usize] {
        &self.cuts
    }

    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    pub fn is_usable(&self) -> bool {
        self.cuts.len() >= 2
    }

    pub fn column_count(&self) -> usize {
        self.cuts.len().saturating_sub(1)
    }

    /// Cut a line into trimmed cells along the boundaries.
    ///
    /// Short lines are padded; text past the last boundary is dropped.
    pub fn slice(&self, line: &str) -> Vec<String> {
        let mut chars: Vec<char> = line.chars().collect();
        let end = self.cuts.last().copied().unwrap_or(0);
        if chars.len() < end {
            chars.resize(end, ' ');
        }

        self.cuts
            .windows(2)
            .map(|w| {
                let cell: String = chars[w[0]..w[1]].iter().collect();
                let cell = cell.trim();
                match self.delimiter {
                    Some(d) => cell.trim_start_matches(d).trim().to_string(),
                    None => cell.to_string(),
                }
            })
            .collect()
    }

    fn splits(&self) -> bool {
        self.column_count() >= 2
    }
}

/// Proposes column boundaries for a block of text lines.
///
/// Three heuristics are tried in order: whitespace frequency, token
/// alignment, shared delimiter. The first that splits the block into at
/// least two columns wins.
#[derive(Debug, Clone)]
pub struct ColumnDetector {
    space_threshold: f64,
    cluster_tolerance: f64,
}

impl Default for ColumnDetector {
    fn default() -> Self {
        ColumnDetector::new(0.6, DEFAULT_TOLERANCE)
    }
}

impl ColumnDetector {
    pub fn new(space_threshold: f64, cluster_tolerance: f64) -> Self {
        ColumnDetector {
            space_threshold,
            cluster_tolerance,
        }
    }

    pub fn detect(&self, block: &[&str]) -> Option<BoundarySet> {
        if block.is_empty() {
            return None;
        }
        self.by_spaces(block)
            .or_else(|| self.by_alignment(block))
            .or_else(|| self.by_delimiter(block))
            .filter(BoundarySet::is_usable)
    }

    /// Character offsets that are blank in enough lines become cut points.
    pub fn by_spaces(&self, block: &[&str]) -> Option<BoundarySet> {
        let max_len = max_line_len(block);
        let mut freq = vec![0usize; max_len];
        for line in block {
            for (i, c) in line.chars().enumerate() {
                if c.is_whitespace() {
                    freq[i] += 1;
                }
            }
        }

        let threshold = block.len() as f64 * self.space_threshold;
        let candidates: Vec<usize> = freq
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0 && n as f64 >= threshold)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let mut cuts = Vec::new();
        let mut group = vec![candidates[0]];
        for &idx in &candidates[1..] {
            if idx - group[group.len() - 1] <= 1 {
                group.push(idx);
            } else {
                cuts.push(group.iter().sum::<usize>() / group.len());
                group = vec![idx];
            }
        }
        cuts.push(group.iter().sum::<usize>() / group.len());

        Some(BoundarySet::from_cuts(cuts, max_len, None)).filter(BoundarySet::splits)
    }

    /// Start offsets of numbers and dates, clustered, become cut points.
    pub fn by_alignment(&self, block: &[&str]) -> Option<BoundarySet> {
        let mut starts = Vec::new();
        for line in block {
            for m in ALIGNED_TOKEN.find_iter(line) {
                starts.push(line[..m.start()].chars().count() as f64);
            }
        }
        if starts.is_empty() {
            return None;
        }

        let cuts: Vec<usize> = cluster_positions(&starts, self.cluster_tolerance)
            .into_iter()
            .map(|p| p.round() as usize)
            .collect();
        Some(BoundarySet::from_cuts(cuts, max_line_len(block), None)).filter(BoundarySet::splits)
    }

    /// Delimiter positions in the first line, if the first three lines share it.
    pub fn by_delimiter(&self, block: &[&str]) -> Option<BoundarySet> {
        let first = block.first()?;
        let sample = &block[..block.len().min(3)];

        let delimiter = DELIMITERS
            .iter()
            .copied()
            .find(|&d| sample.iter().all(|line| line.contains(d)))?;

        let cuts: Vec<usize> = first
            .chars()
            .enumerate()
            .filter(|&(_, c)| c == delimiter)
            .map(|(i, _)| i)
            .collect();
        Some(BoundarySet::from_cuts(cuts, max_line_len(block), Some(delimiter)))
            .filter(BoundarySet::splits)
    }
}

fn max_line_len(block: &[&str]) -> usize {
    block.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_frequency_boundaries() {
        let block = ["Name    Age    City", "Alice   30     Paris", "Bob     25     Rome"];
        let b = ColumnDetector::default().by_spaces(&block).unwrap();
        assert_eq!(b.cuts(), &[0, 5, 12, 20]);
        assert_eq!(b.slice(block[1]), vec!["Alice", "30", "Paris"]);
    }

    #[test]
    fn test_detect_prefers_spaces() {
        let block = ["Name    Age    City", "Alice   30     Paris", "Bob     25     Rome"];
        let b = ColumnDetector::default().detect(&block).unwrap();
        assert_eq!(b.slice(block[0]), vec!["Name", "Age", "City"]);
        assert_eq!(b.delimiter(), None);
    }

    #[test]
    fn test_alignment_boundaries() {
        let block = ["Item A 10", "Item B 20", "Item C 30"];
        let b = ColumnDetector::default().by_alignment(&block).unwrap();
        assert_eq!(b.cuts(), &[0, 7, 9]);
        assert_eq!(b.slice("Item B 20"), vec!["Item B", "20"]);
    }

    #[test]
    fn test_alignment_none_without_numbers() {
        assert!(ColumnDetector::default()
            .by_alignment(&["alpha beta", "gamma delta"])
            .is_none());
    }

    #[test]
    fn test_delimiter_fires_when_shared() {
        let block = ["a|b|c", "d|e|f", "g|h|i", "j|k|l"];
        let detector = ColumnDetector::default();
        let b = detector.by_delimiter(&block).unwrap();
        assert_eq!(b.column_count(), 3);
        assert_eq!(b.delimiter(), Some('|'));

        // No whitespace and no numbers: only the delimiter heuristic applies.
        let d = detector.detect(&block).unwrap();
        assert_eq!(d, b);
        assert_eq!(d.slice("d|e|f"), vec!["d", "e", "f"]);
    }

    #[test]
    fn test_delimiter_column_count_matches() {
        let block = ["x;y;z;w", "1;2;3;4", "5;6;7;8"];
        let b = ColumnDetector::default().by_delimiter(&block).unwrap();
        assert_eq!(b.column_count(), 4);
    }

    #[test]
    fn test_delimiter_requires_first_three_lines() {
        let block = ["a|b|c", "d e f", "g|h|i"];
        assert!(ColumnDetector::default().by_delimiter(&block).is_none());
    }

    #[test]
    fn test_prose_without_gaps_yields_none() {
        let block = ["the quick brown fox", "jumps over the lazy dog"];
        assert!(ColumnDetector::default().detect(&block).is_none());
    }

    #[test]
    fn test_from_cuts_keeps_strict_order() {
        let b = BoundarySet::from_cuts([0, 4, 4, 2, 9, 12], 10, None);
        assert_eq!(b.cuts(), &[0, 4, 9, 10]);
        assert!(BoundarySet::from_cuts([], 0, None).cuts().len() < 2);
    }

    #[test]
    fn test_slice_pads_short_lines() {
        let b = BoundarySet::from_cuts([3, 6], 9, None);
        assert_eq!(b.slice("ab"), vec!["ab", "", ""]);
    }
}
