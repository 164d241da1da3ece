use flightlog_core::error::FlightLogError;
use flightlog_core::InputDocument;
use std::path::{Path, PathBuf};

use super::{file_name, pdftotext_extractor, resolve_profile};
use crate::output;

pub fn run(
    first: &Path,
    second: &Path,
    output_format: &str,
    csv_dir: Option<PathBuf>,
    profile_file: Option<PathBuf>,
) -> Result<(), FlightLogError> {
    let profile = resolve_profile(profile_file.as_deref())?;

    let first_name = file_name(first);
    let second_name = file_name(second);
    let first_bytes = std::fs::read(first)?;
    let second_bytes = std::fs::read(second)?;

    let extractor = pdftotext_extractor()?;
    let report = flightlog_core::convert_pdfs(
        &InputDocument {
            file_name: &first_name,
            bytes: &first_bytes,
        },
        &InputDocument {
            file_name: &second_name,
            bytes: &second_bytes,
        },
        &extractor,
        &profile,
    )?;

    if let Some(dir) = csv_dir {
        let written = output::csv::write_sheets(&report.sheets(), &dir)?;
        eprintln!("Wrote {} sheet(s) to {}", written.len(), dir.display());
    }

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
