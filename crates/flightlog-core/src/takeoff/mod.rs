//! Named-field extraction from the Takeoff performance document.
//!
//! The first page is laid out as two independent columns of label/value
//! lines above an "All Engines Operating" section. Each column is read on
//! its own and its fields are keyed with a suffix: `1` for the left column,
//! `2` for the right.

pub mod runway;
pub mod wind;

use crate::extraction::{BBox, PageContent};
use crate::layout::schema::TakeoffLayout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name (`Runway1`, `Wind2`, ...) to normalized value.
pub type VariableRecord = BTreeMap<String, String>;

pub const LEFT_SUFFIX: &str = "1";
pub const RIGHT_SUFFIX: &str = "2";

const RUNWAY: &str = "Runway";
const USABLE_LENGTH: &str = "Usable Length";
const RUNWAY_SURFACE: &str = "Runway Surface";
const WIND: &str = "Wind";
const TEMPERATURE: &str = "Temperature";
const ALTIMETER: &str = "Altimeter";
const DISTANCE: &str = "Distance";
const SAFETY_DISTANCE_FACTOR: &str = "Safety Distance Factor";

/// Everything read from the Takeoff document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakeoffData {
    /// Page holding the anchor phrase; `None` when it was not found.
    pub page_number: Option<usize>,
    pub variables: VariableRecord,
    pub left_lines: Vec<String>,
    pub right_lines: Vec<String>,
}

/// Lines of the left and right halves of a page above `divider_y`.
///
/// A span belongs to the left half when it ends before the page's
/// horizontal midpoint. Spans whose center is not above `divider_y` are
/// ignored. Each half is ordered top to bottom, then left to right.
pub fn split_columns(page: &PageContent, divider_y: f32) -> (Vec<String>, Vec<String>) {
    let midpoint = page_midpoint(page);

    let mut left: Vec<(BBox, &str)> = Vec::new();
    let mut right: Vec<(BBox, &str)> = Vec::new();
    for span in &page.spans {
        if span.bbox.center_y() >= divider_y {
            continue;
        }
        if span.bbox.x_max < midpoint {
            left.push((span.bbox, span.text.as_str()));
        } else {
            right.push((span.bbox, span.text.as_str()));
        }
    }

    (ordered_lines(left), ordered_lines(right))
}

fn page_midpoint(page: &PageContent) -> f32 {
    if page.width > 0.0 {
        return page.width / 2.0;
    }
    // No page size from the backend: fall back to the text extent.
    let right_edge = page
        .spans
        .iter()
        .chain(&page.words)
        .map(|t| t.bbox.x_max)
        .fold(0.0_f32, f32::max);
    right_edge / 2.0
}

/// Order spans by visual line, then left to right within a line.
///
/// A span joins the current line when its vertical center falls inside the
/// box of the line's first span, so labels and values set in different
/// font sizes stay together.
fn ordered_lines(mut spans: Vec<(BBox, &str)>) -> Vec<String> {
    spans.sort_by(|(a, _), (b, _)| a.center_y().total_cmp(&b.center_y()));

    let mut visual_lines: Vec<(BBox, Vec<(BBox, &str)>)> = Vec::new();
    for (bbox, text) in spans {
        let cy = bbox.center_y();
        match visual_lines.last_mut() {
            Some((band, members)) if cy >= band.y_min && cy <= band.y_max => {
                members.push((bbox, text));
            }
            _ => visual_lines.push((bbox, vec![(bbox, text)])),
        }
    }

    visual_lines
        .into_iter()
        .flat_map(|(_, mut members)| {
            members.sort_by(|(a, _), (b, _)| a.x_min.total_cmp(&b.x_min));
            members
        })
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Value belonging to the label found on `lines[index]`.
///
/// `"Label: value"` on one line yields the text after the colon; otherwise
/// the value is the next line.
fn value_following(lines: &[String], index: usize, label: &str) -> Option<String> {
    let line = &lines[index];
    if let Some((_, rest)) = line.split_once(label) {
        if let Some(inline) = rest.trim_start().strip_prefix(':') {
            let inline = inline.trim();
            if !inline.is_empty() {
                return Some(inline.to_string());
            }
        }
    }

    lines
        .get(index + 1)
        .map(|next| next.trim())
        .filter(|next| !next.is_empty())
        .map(str::to_string)
}

fn first_value(lines: &[String], label: &str) -> Option<String> {
    let index = lines.iter().position(|l| l.contains(label))?;
    value_following(lines, index, label)
}

/// Keep the part after the first `/`, if any.
fn after_slash(value: String) -> String {
    match value.split_once('/') {
        Some((_, rest)) => rest.trim().to_string(),
        None => value,
    }
}

/// Raw field values from one column, without normalization.
pub fn extract_raw_variables(lines: &[String], suffix: &str) -> VariableRecord {
    let mut record = VariableRecord::new();

    // Runway value follows the second line mentioning "Runway", not the first.
    if let Some(index) = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains(RUNWAY))
        .map(|(i, _)| i)
        .nth(1)
    {
        if let Some(v) = value_following(lines, index, RUNWAY) {
            record.insert(format!("Runway{suffix}"), v);
        }
    }

    if let Some(v) = first_value(lines, USABLE_LENGTH) {
        record.insert(format!("Length{suffix}"), v);
    }

    if let Some(v) = first_value(lines, RUNWAY_SURFACE) {
        record.insert(format!("Surface{suffix}"), v);
    }

    let wind_at = lines.iter().position(|l| l.contains(WIND));
    let temperature_at = lines.iter().position(|l| l.contains(TEMPERATURE));
    if let (Some(w), Some(t)) = (wind_at, temperature_at) {
        if w < t {
            let wind = lines[w + 1..t]
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !wind.is_empty() {
                record.insert(format!("Wind{suffix}"), wind);
            }
        }
    }

    if let Some(v) = first_value(lines, ALTIMETER) {
        record.insert(format!("Altimeter{suffix}"), after_slash(v));
    }

    if let Some(index) = lines
        .iter()
        .position(|l| l.contains(DISTANCE) && !l.contains(SAFETY_DISTANCE_FACTOR))
    {
        if let Some(v) = value_following(lines, index, DISTANCE) {
            record.insert(format!("Distance{suffix}"), after_slash(v));
        }
    }

    record
}

/// Rewrite the runway to both of its ends and the wind relative to it.
pub fn normalize_variables(record: &mut VariableRecord, suffix: &str) {
    let runway_key = format!("Runway{suffix}");
    let Some(raw_runway) = record.get(&runway_key).cloned() else {
        return;
    };

    let pair = runway::runway_pair(&raw_runway);
    record.insert(runway_key, pair.designator.clone());

    let Some(heading) = pair.heading else {
        return;
    };
    if let Some(raw_wind) = record.get_mut(&format!("Wind{suffix}")) {
        *raw_wind = wind::decompose_wind(raw_wind, heading);
    }
}

/// Extract and normalize the fields of one column.
///
/// Missing fields are simply absent from the record.
pub fn extract_variables(lines: &[String], suffix: &str) -> VariableRecord {
    let mut record = extract_raw_variables(lines, suffix);
    normalize_variables(&mut record, suffix);
    log::debug!(
        "takeoff column {}: {} field(s) extracted",
        suffix,
        record.len()
    );
    record
}

/// Read both columns of the first page carrying the anchor phrase.
///
/// When no page carries it, empty data is returned.
pub fn extract_takeoff(pages: &[PageContent], layout: &TakeoffLayout) -> TakeoffData {
    let found = pages.iter().find_map(|page| {
        page.search_for(&layout.anchor_phrase)
            .first()
            .map(|bbox| (page, bbox.y_min))
    });

    let Some((page, divider_y)) = found else {
        log::warn!(
            "'{}' not found in takeoff document; no takeoff fields extracted",
            layout.anchor_phrase
        );
        return TakeoffData::default();
    };

    let (left_lines, right_lines) = split_columns(page, divider_y);
    let mut variables = extract_variables(&left_lines, LEFT_SUFFIX);
    variables.extend(extract_variables(&right_lines, RIGHT_SUFFIX));

    TakeoffData {
        page_number: Some(page.page_number),
        variables,
        left_lines,
        right_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Token;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn column() -> Vec<String> {
        lines(&[
            "Runway Analysis",
            "Airport",
            "EDDF",
            "Runway",
            "25C",
            "Usable Length",
            "4000 m",
            "Runway Surface",
            "DRY",
            "Wind",
            "Headwind 10 kts Crosswind 15 kts",
            "Wind 20 kts 270°T",
            "Temperature",
            "15 °C",
            "Altimeter",
            "29.92 inHg / 1013 hPa",
            "Safety Distance Factor",
            "1.15",
            "Distance",
            "2000 m / 1900 m",
        ])
    }

    #[test]
    fn test_extract_raw_variables() {
        let v = extract_raw_variables(&column(), "1");
        assert_eq!(v["Runway1"], "25C");
        assert_eq!(v["Length1"], "4000 m");
        assert_eq!(v["Surface1"], "DRY");
        assert_eq!(
            v["Wind1"],
            "Headwind 10 kts Crosswind 15 kts Wind 20 kts 270°T"
        );
        assert_eq!(v["Altimeter1"], "1013 hPa");
        assert_eq!(v["Distance1"], "1900 m");
    }

    #[test]
    fn test_extract_variables_normalizes() {
        let v = extract_variables(&column(), "2");
        assert_eq!(v["Runway2"], "07C/25C");
        // runway 250 vs wind 270: |−20| outside the band, negative sign
        assert_eq!(v["Wind2"], "T10/R15 (270°/20)");
        assert!(!v.contains_key("Runway1"));
    }

    #[test]
    fn test_inline_label_values() {
        let v = extract_raw_variables(
            &lines(&["Runway Analysis", "Runway: 09L", "Altimeter: 1013", "Usable Length"]),
            "1",
        );
        assert_eq!(v["Runway1"], "09L");
        assert_eq!(v["Altimeter1"], "1013");
        // label on the last line has no value
        assert!(!v.contains_key("Length1"));
    }

    #[test]
    fn test_single_runway_mention_yields_no_runway() {
        let v = extract_raw_variables(&lines(&["Runway", "09"]), "1");
        assert!(!v.contains_key("Runway1"));
    }

    #[test]
    fn test_wind_after_temperature_is_skipped() {
        let v = extract_raw_variables(
            &lines(&["Temperature", "15", "Wind", "10 kts", "Temperature"]),
            "1",
        );
        assert!(!v.contains_key("Wind1"));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        assert!(extract_variables(&[], "1").is_empty());
    }

    fn span(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Token {
        Token::new(text, BBox::new(x0, y0, x1, y1))
    }

    fn takeoff_page() -> PageContent {
        let spans = vec![
            span("Runway", 300.0, 40.0, 340.0, 50.0),
            span("Runway", 20.0, 40.0, 60.0, 50.0),
            span("Runway Analysis", 20.0, 20.0, 120.0, 30.0),
            span("09", 100.0, 40.0, 115.0, 50.0),
            span("Runway Analysis", 300.0, 20.0, 400.0, 30.0),
            span("27", 380.0, 40.0, 395.0, 50.0),
            span("Below the line", 20.0, 120.0, 120.0, 130.0),
        ];
        let words = vec![
            span("All", 20.0, 100.0, 35.0, 110.0),
            span("Engines", 38.0, 100.0, 80.0, 110.0),
            span("Operating", 83.0, 100.0, 140.0, 110.0),
        ];
        PageContent {
            page_number: 1,
            width: 600.0,
            height: 800.0,
            words,
            spans,
            ..Default::default()
        }
    }

    #[test]
    fn test_split_columns_orders_and_cuts_at_divider() {
        let (left, right) = split_columns(&takeoff_page(), 100.0);
        assert_eq!(left, lines(&["Runway Analysis", "Runway", "09"]));
        assert_eq!(right, lines(&["Runway Analysis", "Runway", "27"]));
    }

    #[test]
    fn test_value_set_taller_than_label_stays_after_it() {
        let page = PageContent {
            page_number: 1,
            width: 600.0,
            height: 800.0,
            spans: vec![
                span("Runway Analysis", 20.0, 20.0, 120.0, 30.0),
                span("Runway", 20.0, 40.5, 60.0, 50.5),
                span("09", 100.0, 40.0, 115.0, 50.0),
                span("Usable Length", 20.0, 60.5, 100.0, 70.5),
                span("3200 m", 150.0, 60.0, 190.0, 70.0),
                span("Runway Surface", 20.0, 80.0, 110.0, 90.0),
                span("DRY", 150.0, 79.6, 175.0, 90.4),
            ],
            ..Default::default()
        };

        let (left, right) = split_columns(&page, 100.0);
        assert_eq!(
            left,
            lines(&[
                "Runway Analysis",
                "Runway",
                "09",
                "Usable Length",
                "3200 m",
                "Runway Surface",
                "DRY",
            ])
        );
        assert!(right.is_empty());

        let v = extract_variables(&left, LEFT_SUFFIX);
        assert_eq!(v["Runway1"], "09/27");
        assert_eq!(v["Length1"], "3200 m");
        assert_eq!(v["Surface1"], "DRY");
    }

    #[test]
    fn test_span_reaching_the_midpoint_goes_right() {
        let page = PageContent {
            page_number: 1,
            width: 600.0,
            height: 800.0,
            spans: vec![
                span("left only", 20.0, 20.0, 299.5, 30.0),
                span("straddles", 250.0, 40.0, 350.0, 50.0),
                span("ends on midpoint", 200.0, 60.0, 300.0, 70.0),
                span("right only", 320.0, 80.0, 400.0, 90.0),
            ],
            ..Default::default()
        };

        let (left, right) = split_columns(&page, 100.0);
        assert_eq!(left, lines(&["left only"]));
        assert_eq!(
            right,
            lines(&["straddles", "ends on midpoint", "right only"])
        );
    }

    #[test]
    fn test_extract_takeoff_both_columns() {
        let data = extract_takeoff(&[takeoff_page()], &TakeoffLayout::default());
        assert_eq!(data.page_number, Some(1));
        assert_eq!(data.variables["Runway1"], "09/27");
        assert_eq!(data.variables["Runway2"], "09/27");
        assert!(!data.left_lines.iter().any(|l| l == "Below the line"));
    }

    #[test]
    fn test_extract_takeoff_without_anchor_is_empty() {
        let mut page = takeoff_page();
        page.words.clear();
        let data = extract_takeoff(&[page], &TakeoffLayout::default());
        assert_eq!(data, TakeoffData::default());
    }
}
