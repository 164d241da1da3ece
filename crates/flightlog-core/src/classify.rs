use crate::error::FlightLogError;
use crate::extraction::PageContent;
use crate::layout::schema::ClassifierLayout;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Role a document plays in a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRole {
    /// Carries the route (navigation log) and airport tables.
    Main,
    /// Carries runway, wind and performance data.
    Takeoff,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRole::Main => write!(f, "main route"),
            DocumentRole::Takeoff => write!(f, "takeoff"),
        }
    }
}

/// Indices of the two documents once their roles are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub main: usize,
    pub takeoff: usize,
}

/// Fold text to lower-case ASCII: diacritics are stripped and any other
/// non-ASCII character is dropped.
pub fn normalize_ascii(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase()
}

/// Whether raw first-page text identifies a Takeoff document.
pub fn is_takeoff_text(raw_page_text: &str, prefix: &str) -> bool {
    normalize_ascii(raw_page_text).trim().starts_with(prefix)
}

/// Classify a document by the first characters of its first page.
pub fn classify_document(pages: &[PageContent], layout: &ClassifierLayout) -> DocumentRole {
    let sample = pages
        .first()
        .map(|p| p.raw_text(layout.sample_chars))
        .unwrap_or_default();

    if is_takeoff_text(&sample, &layout.prefix) {
        DocumentRole::Takeoff
    } else {
        DocumentRole::Main
    }
}

/// Decide which of two documents is the Takeoff one.
///
/// Exactly one document must classify as Takeoff; otherwise the caller
/// cannot tell the files apart and `ClassificationConflict` is returned.
pub fn assign_roles(first: DocumentRole, second: DocumentRole) -> Result<Roles, FlightLogError> {
    match (first, second) {
        (DocumentRole::Takeoff, DocumentRole::Main) => Ok(Roles {
            main: 1,
            takeoff: 0,
        }),
        (DocumentRole::Main, DocumentRole::Takeoff) => Ok(Roles {
            main: 0,
            takeoff: 1,
        }),
        (DocumentRole::Takeoff, DocumentRole::Takeoff) => {
            Err(FlightLogError::ClassificationConflict { takeoff_count: 2 })
        }
        (DocumentRole::Main, DocumentRole::Main) => {
            Err(FlightLogError::ClassificationConflict { takeoff_count: 0 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> PageContent {
        PageContent {
            page_number: 1,
            text: text.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_takeoff_report_classifies_true() {
        assert!(is_takeoff_text("Takeoff Performance Report\nA320", "takeoff"));
        assert!(is_takeoff_text("   \n  TAKEOFF DATA", "takeoff"));
    }

    #[test]
    fn test_flight_plan_classifies_false() {
        assert!(!is_takeoff_text("Flight Plan\nEDDF-LOWW", "takeoff"));
        assert!(!is_takeoff_text("Report: Takeoff", "takeoff"));
        assert!(!is_takeoff_text("", "takeoff"));
    }

    #[test]
    fn test_normalize_ascii_strips_diacritics() {
        assert_eq!(normalize_ascii("Tákéöff Ñ"), "takeoff n");
        assert_eq!(normalize_ascii("Взлёт Takeoff"), " takeoff");
    }

    #[test]
    fn test_classify_document_only_reads_sample() {
        let layout = ClassifierLayout {
            prefix: "takeoff".into(),
            sample_chars: 4,
        };
        // The prefix is cut short by the sample window.
        assert_eq!(
            classify_document(&[page("Takeoff")], &layout),
            DocumentRole::Main
        );
        assert_eq!(
            classify_document(&[page("Takeoff")], &ClassifierLayout::default()),
            DocumentRole::Takeoff
        );
        assert_eq!(
            classify_document(&[], &ClassifierLayout::default()),
            DocumentRole::Main
        );
    }

    #[test]
    fn test_assign_roles() {
        let roles = assign_roles(DocumentRole::Main, DocumentRole::Takeoff).unwrap();
        assert_eq!(roles, Roles { main: 0, takeoff: 1 });
        let roles = assign_roles(DocumentRole::Takeoff, DocumentRole::Main).unwrap();
        assert_eq!(roles, Roles { main: 1, takeoff: 0 });
    }

    #[test]
    fn test_both_takeoff_is_a_conflict() {
        let result = assign_roles(DocumentRole::Takeoff, DocumentRole::Takeoff);
        assert!(matches!(
            result,
            Err(FlightLogError::ClassificationConflict { takeoff_count: 2 })
        ));
        let result = assign_roles(DocumentRole::Main, DocumentRole::Main);
        assert!(matches!(
            result,
            Err(FlightLogError::ClassificationConflict { takeoff_count: 0 })
        ));
    }
}
