pub mod pdftotext;

use crate::error::FlightLogError;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in page coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        BBox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn center_x(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// A positioned run of text on a page: a single word, or a span of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub bbox: BBox,
}

impl Token {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Token {
            text: text.into(),
            bbox,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.bbox.center_x(), self.bbox.center_y())
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub width: f32,
    pub height: f32,
    /// Plain page text in reading order.
    pub text: String,
    /// Word-granularity tokens.
    pub words: Vec<Token>,
    /// Span-granularity tokens (runs of words without a column gap).
    pub spans: Vec<Token>,
}

impl PageContent {
    /// The first `max_chars` characters of the page text.
    pub fn raw_text(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }

    /// Locate every occurrence of `phrase` as a run of consecutive words.
    ///
    /// Matching is case-sensitive on whitespace-separated words; each hit is
    /// reported as the union of the matched word boxes.
    pub fn search_for(&self, phrase: &str) -> Vec<BBox> {
        let needle: Vec<&str> = phrase.split_whitespace().collect();
        if needle.is_empty() || self.words.len() < needle.len() {
            return Vec::new();
        }

        self.words
            .windows(needle.len())
            .filter(|window| {
                window
                    .iter()
                    .zip(&needle)
                    .all(|(word, expected)| word.text == *expected)
            })
            .map(|window| {
                window[1..]
                    .iter()
                    .fold(window[0].bbox, |acc, w| acc.union(&w.bbox))
            })
            .collect()
    }

    /// Whether any word or span on the page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.words
            .iter()
            .chain(&self.spans)
            .any(|t| t.text.contains(needle))
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FlightLogError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Token {
        Token::new(text, BBox::new(x0, y0, x1, y1))
    }

    #[test]
    fn test_search_for_multi_word_phrase() {
        let page = PageContent {
            words: vec![
                word("All", 10.0, 100.0, 25.0, 110.0),
                word("Engines", 28.0, 100.0, 60.0, 110.0),
                word("Operating", 63.0, 100.0, 110.0, 110.0),
                word("Engines", 10.0, 200.0, 40.0, 210.0),
            ],
            ..Default::default()
        };

        let hits = page.search_for("All Engines Operating");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], BBox::new(10.0, 100.0, 110.0, 110.0));
        assert!(page.search_for("Engines Idle").is_empty());
        assert!(page.search_for("   ").is_empty());
    }

    #[test]
    fn test_raw_text_truncates_on_char_boundary() {
        let page = PageContent {
            text: "Décollage takeoff".into(),
            ..Default::default()
        };
        assert_eq!(page.raw_text(3), "Déc");
        assert_eq!(page.raw_text(1000), "Décollage takeoff");
    }

    #[test]
    fn test_bbox_center() {
        let b = BBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.center_x(), 20.0);
        assert_eq!(b.center_y(), 30.0);
    }
}
