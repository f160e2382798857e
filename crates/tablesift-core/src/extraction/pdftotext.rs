use crate::error::TableError;
use crate::extraction::{BBox, PageContent, PdfExtractor, Word};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment of tables and
/// `pdftotext -bbox-layout` for word boxes, from which glyph positions and
/// native tables are derived.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TableError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| TableError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| TableError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext("-layout", &tmp_path)?;
        let xml = run_pdftotext("-bbox-layout", &tmp_path)?;
        let mut word_pages = parse_bbox_xml(&xml)?;

        log::debug!(
            "pdftotext produced {} bytes of text and {} word pages",
            text.len(),
            word_pages.len()
        );

        // pdftotext uses form feed \x0c as page separator
        let pages: Vec<PageContent> = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| {
                let lines: Vec<String> = page_text.lines().map(|l| l.to_string()).collect();
                let word_lines = word_pages.get_mut(i).map(std::mem::take).unwrap_or_default();
                PageContent::from_word_lines(i + 1, lines, &word_lines)
            })
            .filter(|p| !p.lines.is_empty() || p.page_number == 1)
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(mode: &str, pdf_path: &Path) -> Result<String, TableError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TableError::PdftotextNotFound
            } else {
                TableError::Extraction(format!("pdftotext {} failed: {}", mode, e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(TableError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `-bbox-layout` XHTML into pages of text lines of words.
fn parse_bbox_xml(xml: &str) -> Result<Vec<Vec<Vec<Word>>>, TableError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<Vec<Word>>> = Vec::new();
    let mut current_line: Vec<Word> = Vec::new();
    let mut pending_word: Option<BBox> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| TableError::Extraction(format!("invalid bbox XML: {e}")))?;
        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => pages.push(Vec::new()),
                b"line" => current_line.clear(),
                b"word" => pending_word = parse_bbox(&tag),
                _ => {}
            },
            Event::Text(text) => {
                if let Some(bbox) = pending_word.take() {
                    let word = text
                        .unescape()
                        .map_err(|e| TableError::Extraction(format!("invalid bbox XML: {e}")))?;
                    let word = word.trim();
                    if !word.is_empty() {
                        current_line.push(Word {
                            text: word.to_string(),
                            bbox,
                        });
                    }
                }
            }
            Event::End(tag) => {
                if tag.name().as_ref() == b"line" && !current_line.is_empty() {
                    if let Some(page) = pages.last_mut() {
                        page.push(std::mem::take(&mut current_line));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_bbox(tag: &BytesStart) -> Option<BBox> {
    Some(BBox {
        x_min: parse_attr_f32(tag, "xMin")?,
        y_min: parse_attr_f32(tag, "yMin")?,
        x_max: parse_attr_f32(tag, "xMax")?,
        y_max: parse_attr_f32(tag, "yMax")?,
    })
}

fn parse_attr_f32(tag: &BytesStart, name: &str) -> Option<f32> {
    let attr = tag.try_get_attribute(name).ok()??;
    attr.unescape_value().ok()?.trim().parse().ok()
}
