pub mod native;
pub mod pdftotext;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

/// A word with its bounding box, as reported by the text backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bbox: BBox,
}

/// A single positioned character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub x: f64,
    pub y: f64,
    pub glyph: String,
}

impl Glyph {
    pub fn new(x: f64, y: f64, glyph: impl Into<String>) -> Self {
        Glyph {
            x,
            y,
            glyph: glyph.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.glyph.trim().is_empty()
    }
}

/// Rows of optional cells, as produced by a geometry-aware table finder.
pub type RawTable = Vec<Vec<Option<String>>>;

/// Tolerances for geometry-aware table detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSettings {
    /// Max horizontal distance between word left edges sharing a column edge.
    pub x_tolerance: f32,
    /// Max vertical distance between words sharing a row.
    pub y_tolerance: f32,
    /// Rows that must start a word at an x position for it to count as a column edge.
    pub min_edge_rows: usize,
    /// Column edges a row must populate to count as tabular.
    pub min_columns: usize,
    /// Consecutive tabular rows needed to form a table.
    pub min_rows: usize,
}

impl TableSettings {
    pub const STRICT: TableSettings = TableSettings {
        x_tolerance: 1.5,
        y_tolerance: 2.0,
        min_edge_rows: 3,
        min_columns: 3,
        min_rows: 3,
    };

    /// Text-alignment pass: intersection tolerance 5, join tolerance 3.
    pub const LENIENT: TableSettings = TableSettings {
        x_tolerance: 5.0,
        y_tolerance: 3.0,
        min_edge_rows: 2,
        min_columns: 2,
        min_rows: 2,
    };
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
    pub glyphs: Vec<Glyph>,
    pub words: Vec<Word>,
}

impl PageContent {
    /// A text-only page (no geometry).
    pub fn from_lines(page_number: usize, lines: &[&str]) -> Self {
        PageContent {
            page_number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            glyphs: Vec::new(),
            words: Vec::new(),
        }
    }

    /// Build a page from layout text plus word boxes grouped by text line.
    ///
    /// Glyph positions are interpolated across each word's box, with a blank
    /// glyph between neighbouring words of the same line.
    pub fn from_word_lines(page_number: usize, lines: Vec<String>, word_lines: &[Vec<Word>]) -> Self {
        let glyphs = word_lines
            .iter()
            .flat_map(|line| glyphs_for_line(line))
            .collect();
        let words = word_lines.iter().flatten().cloned().collect();
        PageContent {
            page_number,
            lines,
            glyphs,
            words,
        }
    }
}

fn glyphs_for_line(words: &[Word]) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let chars: Vec<char> = word.text.chars().collect();
        if chars.is_empty() {
            continue;
        }
        let x_min = f64::from(word.bbox.x_min);
        let y = f64::from(word.bbox.y_min);
        let advance = f64::from(word.bbox.x_max - word.bbox.x_min) / chars.len() as f64;
        for (j, c) in chars.iter().enumerate() {
            glyphs.push(Glyph::new(x_min + advance * j as f64, y, c.to_string()));
        }
        if i + 1 < words.len() {
            glyphs.push(Glyph::new(f64::from(word.bbox.x_max), y, " "));
        }
    }
    glyphs
}

/// Per-page access to text, glyphs and (optionally) native table detection.
///
/// Every method may fail for a single page without the document being
/// unreadable; callers treat such errors as page-local.
pub trait PageSource: Send + Sync {
    fn page_number(&self) -> usize;

    /// Plain text of the page, lines separated by `\n`.
    fn text(&self) -> Result<String, TableError>;

    /// Positioned characters of the page.
    fn glyphs(&self) -> Result<Vec<Glyph>, TableError>;

    /// Geometry-aware table detection. `None` when the backend cannot do it.
    fn extract_tables(&self, _settings: &TableSettings) -> Option<Result<Vec<RawTable>, TableError>> {
        None
    }
}

impl PageSource for PageContent {
    fn page_number(&self) -> usize {
        self.page_number
    }

    fn text(&self) -> Result<String, TableError> {
        Ok(self.lines.join("\n"))
    }

    fn glyphs(&self) -> Result<Vec<Glyph>, TableError> {
        Ok(self.glyphs.clone())
    }

    fn extract_tables(&self, settings: &TableSettings) -> Option<Result<Vec<RawTable>, TableError>> {
        if self.words.is_empty() {
            return None;
        }
        Some(Ok(native::find_tables(&self.words, settings)))
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    ///
    /// A failure here means the document could not be opened and is fatal.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TableError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
