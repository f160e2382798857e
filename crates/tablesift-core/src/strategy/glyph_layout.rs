use std::collections::BTreeMap;

use super::{per_page, Strategy};
use crate::config::ExtractConfig;
use crate::error::TableError;
use crate::extraction::{Glyph, PageSource};
use crate::layout::cluster_positions;
use crate::model::TableCandidate;
use crate::orchestrator::Deadline;

/// Finds one table per page from raw glyph positions.
///
/// Glyphs sharing a rounded y form a line. The x positions where runs of
/// text start (after a gap wider than two typical advances) are clustered
/// into column boundaries, and every line is cut along them.
pub struct GlyphLayoutStrategy {
    tolerance: f64,
}

impl GlyphLayoutStrategy {
    pub fn new(config: &ExtractConfig) -> Self {
        GlyphLayoutStrategy {
            tolerance: config.cluster_tolerance,
        }
    }

    fn find(&self, page: &dyn PageSource) -> Result<Vec<TableCandidate>, TableError> {
        let lines = group_lines(page.glyphs()?);

        let starts: Vec<f64> = lines
            .iter()
            .filter(|line| line.len() > 3)
            .flat_map(|line| run_starts(line))
            .collect();
        let mut bounds = cluster_positions(&starts, self.tolerance);
        bounds.dedup();
        if bounds.len() < 2 {
            return Ok(Vec::new());
        }

        let mut rows: Vec<Vec<String>> = lines
            .iter()
            .filter(|line| line.len() >= 3)
            .map(|line| slice_line(line, &bounds, self.tolerance))
            .filter(|row| row.iter().filter(|c| !c.is_empty()).count() >= 2)
            .collect();
        if rows.len() < 2 {
            return Ok(Vec::new());
        }

        let headers = rows.remove(0);
        let name = format!("Page_{}_Layout_Table", page.page_number());
        Ok(vec![TableCandidate::new(name, headers, rows)])
    }
}

impl Strategy for GlyphLayoutStrategy {
    fn name(&self) -> &str {
        "glyph_layout"
    }

    fn extract(
        &self,
        pages: &[&dyn PageSource],
        deadline: &Deadline,
    ) -> Result<Vec<TableCandidate>, TableError> {
        per_page(self.name(), pages, deadline, |page| self.find(page))
    }
}

/// Group glyphs into lines by rounded y, top to bottom, each ordered by x.
fn group_lines(glyphs: Vec<Glyph>) -> Vec<Vec<Glyph>> {
    let mut by_y: BTreeMap<i64, Vec<Glyph>> = BTreeMap::new();
    for glyph in glyphs {
        by_y.entry(glyph.y.round() as i64).or_default().push(glyph);
    }
    by_y.into_values()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
            line
        })
        .collect()
}

/// X positions of glyphs that begin a run of text on this line.
fn run_starts(line: &[Glyph]) -> Vec<f64> {
    let xs: Vec<f64> = line.iter().filter(|g| !g.is_blank()).map(|g| g.x).collect();
    let Some(&first) = xs.first() else {
        return Vec::new();
    };

    let mut gaps: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    gaps.sort_by(|a, b| a.total_cmp(b));
    let median = gaps.get(gaps.len() / 2).copied().unwrap_or(0.0);

    let mut starts = vec![first];
    starts.extend(
        xs.windows(2)
            .filter(|w| w[1] - w[0] > 2.0 * median)
            .map(|w| w[1]),
    );
    starts
}

/// Cut a line into cells. A glyph belongs to the last boundary at or left
/// of its x (within tolerance); the first column is open to the left and
/// the last to the right.
fn slice_line(line: &[Glyph], bounds: &[f64], tolerance: f64) -> Vec<String> {
    let mut cells = vec![String::new(); bounds.len()];
    for glyph in line {
        let col = bounds
            .iter()
            .filter(|&&b| b - tolerance <= glyph.x)
            .count()
            .saturating_sub(1);
        cells[col].push_str(&glyph.glyph);
    }
    cells.iter().map(|c| c.trim().to_string()).collect()
}
