use crate::error::FlightLogError;
use crate::extraction::{BBox, PageContent, PdfExtractor, Token};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Fraction of the line height above which a gap between two words on the
/// same line starts a new span.
const SPAN_GAP_RATIO: f32 = 0.6;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Word boxes come from `pdftotext -bbox-layout`; the page text comes from
/// `pdftotext -layout`.
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
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FlightLogError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| FlightLogError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| FlightLogError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let layout_text = run_pdftotext(&tmp_path, "-layout")?;
        let xhtml = run_pdftotext(&tmp_path, "-bbox-layout")?;

        let mut pages = parse_bbox_xhtml(&xhtml)?;
        let texts: Vec<&str> = layout_text.split('\x0c').collect();
        for (i, page) in pages.iter_mut().enumerate() {
            page.text = match texts.get(i) {
                Some(t) => t.to_string(),
                None => page
                    .words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            };
        }

        log::debug!(
            "pdftotext extracted {} page(s), {} word(s)",
            pages.len(),
            pages.iter().map(|p| p.words.len()).sum::<usize>()
        );

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(pdf_path: &Path, mode: &str) -> Result<String, FlightLogError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FlightLogError::PdftotextNotFound
            } else {
                FlightLogError::Extraction(format!("pdftotext {} failed: {}", mode, e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(FlightLogError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pdftotext -bbox-layout` XHTML into pages of words and spans.
fn parse_bbox_xhtml(xml: &str) -> Result<Vec<PageContent>, FlightLogError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageContent> = Vec::new();
    let mut line_words: Vec<Token> = Vec::new();
    let mut word_bbox: Option<BBox> = None;
    let mut word_text = String::new();

    loop {
        let event = reader.read_event().map_err(xml_error)?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"page" => {
                    pages.push(PageContent {
                        page_number: pages.len() + 1,
                        width: attr_f32(&e, b"width")?.unwrap_or(0.0),
                        height: attr_f32(&e, b"height")?.unwrap_or(0.0),
                        ..Default::default()
                    });
                }
                b"line" => line_words.clear(),
                b"word" => {
                    word_bbox = parse_bbox(&e)?;
                    word_text.clear();
                }
                _ => {}
            },
            Event::Text(t) if word_bbox.is_some() => {
                let text = t.unescape().map_err(xml_error)?;
                word_text.push_str(&text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"word" => {
                    if let Some(bbox) = word_bbox.take() {
                        let text = word_text.trim();
                        if !text.is_empty() {
                            line_words.push(Token::new(text, bbox));
                        }
                    }
                }
                b"line" => {
                    if let Some(page) = pages.last_mut() {
                        page.spans.extend(group_spans(&line_words));
                        page.words.append(&mut line_words);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

/// Split the words of one line into spans wherever a column-sized gap opens.
pub(crate) fn group_spans(words: &[Token]) -> Vec<Token> {
    let mut spans: Vec<Token> = Vec::new();
    let Some(first) = words.first() else {
        return spans;
    };

    let line_height = words
        .iter()
        .map(|w| w.bbox.height())
        .fold(0.0_f32, f32::max);
    let max_gap = line_height * SPAN_GAP_RATIO;

    let mut current = first.clone();
    for word in &words[1..] {
        let gap = word.bbox.x_min - current.bbox.x_max;
        if gap > max_gap {
            spans.push(std::mem::replace(&mut current, word.clone()));
        } else {
            current.text.push(' ');
            current.text.push_str(&word.text);
            current.bbox = current.bbox.union(&word.bbox);
        }
    }
    spans.push(current);

    spans
}

fn parse_bbox(tag: &BytesStart) -> Result<Option<BBox>, FlightLogError> {
    let (Some(x_min), Some(y_min), Some(x_max), Some(y_max)) = (
        attr_f32(tag, b"xMin")?,
        attr_f32(tag, b"yMin")?,
        attr_f32(tag, b"xMax")?,
        attr_f32(tag, b"yMax")?,
    ) else {
        return Ok(None);
    };
    Ok(Some(BBox::new(x_min, y_min, x_max, y_max)))
}

fn attr_f32(tag: &BytesStart, name: &[u8]) -> Result<Option<f32>, FlightLogError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| FlightLogError::Extraction(format!("bad attribute: {e}")))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| FlightLogError::Extraction(format!("bad attribute value: {e}")))?;
            return Ok(value.trim().parse().ok());
        }
    }
    Ok(None)
}

fn xml_error(err: impl std::fmt::Display) -> FlightLogError {
    FlightLogError::Extraction(format!("malformed pdftotext XHTML: {}", err))
}
