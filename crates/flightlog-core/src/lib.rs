pub mod classify;
pub mod error;
pub mod extraction;
pub mod grid;
pub mod layout;
pub mod report;
pub mod takeoff;

use classify::{assign_roles, classify_document, DocumentRole};
use error::FlightLogError;
use extraction::{PageContent, PdfExtractor};
use grid::airport::extract_airport_table;
use grid::route::{extract_route_table, RouteTable};
use layout::schema::LayoutProfile;
use report::FlightLogReport;
use takeoff::extract_takeoff;

/// An uploaded PDF and the name it was uploaded under.
#[derive(Debug, Clone, Copy)]
pub struct InputDocument<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// A document after text extraction.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub file_name: String,
    pub pages: Vec<PageContent>,
}

/// Main API entry point: convert two flight planning PDFs into a report.
///
/// One document must be the Takeoff document and the other the main route
/// document; which is which is detected from their first page.
pub fn convert_pdfs(
    first: &InputDocument,
    second: &InputDocument,
    extractor: &dyn PdfExtractor,
    profile: &LayoutProfile,
) -> Result<FlightLogReport, FlightLogError> {
    if first.file_name == second.file_name {
        return Err(FlightLogError::InvalidInput(format!(
            "both files are named '{}'; upload two different files",
            first.file_name
        )));
    }

    let first = extract_document(first, extractor)?;
    let second = extract_document(second, extractor)?;

    convert_pages(&first, &second, profile)
}

fn extract_document(
    input: &InputDocument,
    extractor: &dyn PdfExtractor,
) -> Result<ExtractedDocument, FlightLogError> {
    let pages = extractor.extract_pages(input.bytes)?;
    log::debug!(
        "{}: {} page(s) via {}",
        input.file_name,
        pages.len(),
        extractor.backend_name()
    );
    Ok(ExtractedDocument {
        file_name: input.file_name.to_string(),
        pages,
    })
}

/// Convert two already-extracted documents into a report.
pub fn convert_pages(
    first: &ExtractedDocument,
    second: &ExtractedDocument,
    profile: &LayoutProfile,
) -> Result<FlightLogReport, FlightLogError> {
    let roles = assign_roles(
        classify_document(&first.pages, &profile.classifier),
        classify_document(&second.pages, &profile.classifier),
    )?;
    let documents = [first, second];
    let main = documents[roles.main];
    let takeoff_doc = documents[roles.takeoff];

    log::info!(
        "main route document: {}, takeoff document: {}",
        main.file_name,
        takeoff_doc.file_name
    );

    let route = extract_route_table(&main.pages, &profile.route)?;
    let airport = extract_airport_table(&main.pages, &profile.airport);
    let takeoff = extract_takeoff(&takeoff_doc.pages, &profile.takeoff);

    Ok(FlightLogReport {
        main_file: main.file_name.clone(),
        takeoff_file: takeoff_doc.file_name.clone(),
        route,
        airport,
        takeoff,
    })
}

/// Classify a single PDF as main route or Takeoff document.
pub fn classify_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    profile: &LayoutProfile,
) -> Result<DocumentRole, FlightLogError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    Ok(classify_document(&pages, &profile.classifier))
}

/// Extract only the route table from a main route PDF.
pub fn extract_route_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    profile: &LayoutProfile,
) -> Result<RouteTable, FlightLogError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    extract_route_table(&pages, &profile.route)
}
