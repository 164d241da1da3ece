pub mod classify;
pub mod convert;
pub mod grid;
pub mod profile;

use flightlog_core::error::FlightLogError;
use flightlog_core::extraction::pdftotext::PdftotextExtractor;
use flightlog_core::layout::{self, builtin, schema::LayoutProfile};
use std::path::Path;

/// The layout profile to use: a custom file when given, else the default preset.
pub fn resolve_profile(path: Option<&Path>) -> Result<LayoutProfile, FlightLogError> {
    match path {
        Some(path) => layout::load_profile(path),
        None => builtin::default_profile(),
    }
}

/// File name component used to identify an input document.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The pdftotext backend, or `PdftotextNotFound` when it is not installed.
pub fn pdftotext_extractor() -> Result<PdftotextExtractor, FlightLogError> {
    if !PdftotextExtractor::is_available() {
        return Err(FlightLogError::PdftotextNotFound);
    }
    Ok(PdftotextExtractor::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdftotext_extractor_follows_availability() {
        match pdftotext_extractor() {
            Ok(_) => assert!(PdftotextExtractor::is_available()),
            Err(e) => {
                assert!(!PdftotextExtractor::is_available());
                assert!(matches!(e, FlightLogError::PdftotextNotFound));
            }
        }
    }

    #[test]
    fn test_file_name_strips_directories() {
        assert_eq!(file_name(Path::new("/tmp/plans/ofp.pdf")), "ofp.pdf");
    }
}
