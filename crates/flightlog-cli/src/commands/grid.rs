use flightlog_core::error::FlightLogError;
use std::path::{Path, PathBuf};

use super::{pdftotext_extractor, resolve_profile};
use crate::output;

pub fn run(
    pdf_file: &Path,
    output_format: &str,
    profile_file: Option<PathBuf>,
) -> Result<(), FlightLogError> {
    let profile = resolve_profile(profile_file.as_deref())?;
    let pdf_bytes = std::fs::read(pdf_file)?;
    let extractor = pdftotext_extractor()?;
    let table = flightlog_core::extract_route_pdf(&pdf_bytes, &extractor, &profile)?;

    match output_format {
        "json" => output::json::print(&table)?,
        _ => {
            println!(
                "Route table on page {} (header: {}, end: {})\n",
                table.page_number,
                table.header_strategy.name(),
                table.terminator_strategy.name()
            );
            output::table::print_grid(&table.grid);
        }
    }

    Ok(())
}
