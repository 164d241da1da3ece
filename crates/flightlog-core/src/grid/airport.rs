use crate::extraction::{PageContent, Token};
use crate::grid::{assign_points, Grid};
use crate::layout::schema::AirportLayout;

/// Column names for the airport table: `COL1`, `COL2`, ...
pub fn airport_columns(layout: &AirportLayout) -> Vec<String> {
    (1..layout.column_bounds.len())
        .map(|i| format!("COL{}", i))
        .collect()
}

/// Span texts grouped by their exact center point, in first-seen order.
pub fn span_centers(spans: &[Token]) -> Vec<((f32, f32), String)> {
    let mut centers: Vec<((f32, f32), String)> = Vec::new();
    for span in spans {
        let center = span.center();
        match centers.iter_mut().find(|(c, _)| *c == center) {
            Some((_, text)) => {
                text.push(' ');
                text.push_str(&span.text);
            }
            None => centers.push((center, span.text.clone())),
        }
    }
    centers
}

/// Row boundaries of the two-row airport table on `page`.
///
/// The first row starts at the anchor word; the second starts at the first
/// destination anchor below it, or failing that at the highest token below
/// the anchor. Each row after the anchor row is `row_height` tall.
pub fn airport_row_bounds(page: &PageContent, layout: &AirportLayout) -> Option<Vec<f32>> {
    let anchor = page.words.iter().find(|w| w.text == layout.anchor)?;
    let below = |t: &&Token| t.bbox.y_min > anchor.bbox.y_max;

    let middle = match page
        .words
        .iter()
        .filter(below)
        .find(|w| w.text == layout.dest_anchor)
    {
        Some(dest) => dest.bbox.y_min,
        None => {
            let fallback = page
                .words
                .iter()
                .filter(below)
                .map(|w| w.bbox.y_min)
                .min_by(f32::total_cmp)?;
            log::debug!(
                "airport table: no '{}' row, using first row below anchor at y={:.1}",
                layout.dest_anchor,
                fallback
            );
            fallback
        }
    };

    Some(vec![anchor.bbox.y_min, middle, middle + layout.row_height])
}

/// Extract the airport summary table from the first page mentioning it.
///
/// A missing table is not an error: an empty grid is returned so the rest
/// of the conversion can continue.
pub fn extract_airport_table(pages: &[PageContent], layout: &AirportLayout) -> Grid {
    let columns = airport_columns(layout);

    let Some(page) = pages.iter().find(|p| p.contains_text(&layout.anchor)) else {
        log::warn!(
            "no page contains '{}'; airport table left empty",
            layout.anchor
        );
        return Grid::empty(columns);
    };

    let Some(yy) = airport_row_bounds(page, layout) else {
        log::warn!(
            "page {}: '{}' anchor position not found; airport table left empty",
            page.page_number,
            layout.anchor
        );
        return Grid::empty(columns);
    };

    let centers = span_centers(&page.spans);
    let rows = assign_points(
        centers.iter().map(|(c, text)| (*c, text.as_str())),
        &layout.column_bounds,
        &yy,
        columns.len(),
    );

    log::debug!(
        "airport table: page {}, rows at {:?}",
        page.page_number,
        yy
    );

    Grid { columns, rows }
}
