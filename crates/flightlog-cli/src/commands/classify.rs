use flightlog_core::error::FlightLogError;
use std::path::PathBuf;

use super::{file_name, pdftotext_extractor, resolve_profile};

pub fn run(files: &[PathBuf], profile_file: Option<PathBuf>) -> Result<(), FlightLogError> {
    let profile = resolve_profile(profile_file.as_deref())?;
    let extractor = pdftotext_extractor()?;

    let width = files
        .iter()
        .map(|f| file_name(f).len())
        .max()
        .unwrap_or(0);

    for path in files {
        let pdf_bytes = std::fs::read(path)?;
        let role = flightlog_core::classify_pdf(&pdf_bytes, &extractor, &profile)?;
        println!("{:<width$}  {}", file_name(path), role, width = width);
    }

    Ok(())
}
