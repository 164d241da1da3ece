use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FlightLogError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("cannot tell the documents apart: {takeoff_count} of 2 files start with 'Takeoff' (exactly one must)")]
    ClassificationConflict { takeoff_count: usize },

    #[error("route table header not found: {0}")]
    HeaderNotFound(String),

    #[error("route table row bounds not found: {0}")]
    RowBoundsNotFound(String),

    #[error("document has no pages: {0}")]
    EmptyDocument(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to load layout profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid layout profile: {0}")]
    ProfileInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
