//! Table detection from word bounding boxes.
//!
//! Words are grouped into rows by their top edge. Left edges shared by
//! enough rows become column edges, and every run of consecutive rows that
//! populates enough of those edges becomes one table.

use super::{RawTable, TableSettings, Word};
use crate::layout::cluster_positions;

pub fn find_tables(words: &[Word], settings: &TableSettings) -> Vec<RawTable> {
    let rows = group_rows(words, settings.y_tolerance);
    let edges = column_edges(&rows, settings);
    if edges.len() < settings.min_columns {
        return Vec::new();
    }

    let mut tables = Vec::new();
    let mut run: Vec<&[&Word]> = Vec::new();
    for row in &rows {
        if edges_hit(row, &edges, settings.x_tolerance) >= settings.min_columns {
            run.push(row);
            continue;
        }
        if run.len() >= settings.min_rows {
            tables.push(build_table(&run, &edges, settings.x_tolerance));
        }
        run.clear();
    }
    if run.len() >= settings.min_rows {
        tables.push(build_table(&run, &edges, settings.x_tolerance));
    }

    tables
}

fn group_rows(words: &[Word], y_tolerance: f32) -> Vec<Vec<&Word>> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y_min
            .total_cmp(&b.bbox.y_min)
            .then(a.bbox.x_min.total_cmp(&b.bbox.x_min))
    });

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        match rows.last_mut() {
            Some(row) if (word.bbox.y_min - row[0].bbox.y_min).abs() <= y_tolerance => {
                row.push(word)
            }
            _ => rows.push(vec![word]),
        }
    }
    for row in &mut rows {
        row.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
    }
    rows
}

fn column_edges(rows: &[Vec<&Word>], settings: &TableSettings) -> Vec<f32> {
    let starts: Vec<f64> = rows
        .iter()
        .flatten()
        .map(|w| f64::from(w.bbox.x_min))
        .collect();

    let mut candidates = cluster_positions(&starts, f64::from(settings.x_tolerance));
    candidates.dedup();

    candidates
        .into_iter()
        .map(|c| c as f32)
        .filter(|&edge| {
            rows.iter()
                .filter(|row| starts_near(row, edge, settings.x_tolerance))
                .count()
                >= settings.min_edge_rows
        })
        .collect()
}

fn starts_near(row: &[&Word], edge: f32, tolerance: f32) -> bool {
    row.iter().any(|w| (w.bbox.x_min - edge).abs() <= tolerance)
}

fn edges_hit(row: &[&Word], edges: &[f32], tolerance: f32) -> usize {
    edges
        .iter()
        .filter(|&&edge| starts_near(row, edge, tolerance))
        .count()
}

fn build_table(run: &[&[&Word]], edges: &[f32], tolerance: f32) -> RawTable {
    let mut table: RawTable = run
        .iter()
        .map(|row| {
            let mut cells: Vec<Option<String>> = vec![None; edges.len()];
            for word in row.iter() {
                let col = edges
                    .iter()
                    .filter(|&&edge| edge - tolerance <= word.bbox.x_min)
                    .count()
                    .saturating_sub(1);
                match &mut cells[col] {
                    Some(text) => {
                        text.push(' ');
                        text.push_str(&word.text);
                    }
                    slot => *slot = Some(word.text.clone()),
                }
            }
            cells
        })
        .collect();

    // Drop columns no row in this run populated.
    let used: Vec<bool> = (0..edges.len())
        .map(|col| table.iter().any(|row| row[col].is_some()))
        .collect();
    for row in &mut table {
        let mut col = 0;
        row.retain(|_| {
            let keep = used[col];
            col += 1;
            keep
        });
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::BBox;

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

    fn grid() -> Vec<Word> {
        vec![
            word("Date", 10.0, 10.0),
            word("Item", 100.0, 10.0),
            word("Price", 200.0, 10.0),
            word("01/02/2023", 10.0, 30.0),
            word("Coffee", 100.0, 30.5),
            word("beans", 140.0, 30.5),
            word("12.50", 200.0, 30.0),
            word("02/02/2023", 10.0, 50.0),
            word("Tea", 100.0, 50.0),
            word("4.00", 201.0, 50.0),
            word("A", 10.0, 80.0),
            word("closing", 40.0, 80.0),
            word("remark", 90.0, 80.0),
        ]
    }

    #[test]
    fn test_finds_aligned_grid() {
        let tables = find_tables(&grid(), &TableSettings::STRICT);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.len(), 3);
        assert_eq!(
            table[0],
            vec![Some("Date".into()), Some("Item".into()), Some("Price".into())]
        );
        assert_eq!(table[1][1].as_deref(), Some("Coffee beans"));
        assert_eq!(table[2][2].as_deref(), Some("4.00"));
    }

    #[test]
    fn test_prose_finds_nothing() {
        let words = vec![
            word("Lorem", 10.0, 10.0),
            word("ipsum", 50.0, 10.0),
            word("dolor", 10.0, 30.0),
            word("sit", 70.0, 30.0),
        ];
        assert!(find_tables(&words, &TableSettings::STRICT).is_empty());
        assert!(find_tables(&words, &TableSettings::LENIENT).is_empty());
    }

    #[test]
    fn test_lenient_accepts_two_columns() {
        let words = vec![
            word("Name", 10.0, 10.0),
            word("Qty", 120.0, 10.0),
            word("Bolt", 12.0, 30.0),
            word("4", 123.0, 30.0),
        ];
        assert!(find_tables(&words, &TableSettings::STRICT).is_empty());
        let tables = find_tables(&words, &TableSettings::LENIENT);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][1], vec![Some("Bolt".into()), Some("4".into())]);
    }
}
