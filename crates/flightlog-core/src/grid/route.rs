//! Route table (navigation log) reconstruction.
//!
//! The table has no ruling lines, so its structure is inferred from text
//! geometry alone:
//!
//! 1. A header baseline is located with an ordered list of strategies.
//! 2. Header keywords on that baseline give the column boundaries.
//! 3. Tokens under the `ALT` header, down to a terminator token, give the
//!    row boundaries.
//! 4. Every word is assigned to the cell that contains its center.

use crate::error::FlightLogError;
use crate::extraction::{PageContent, Token};
use crate::grid::{assign_cells, strictly_increasing, Grid};
use crate::layout::schema::RouteLayout;
use serde::{Deserialize, Serialize};

const WAYPOINT: &str = "WAYPOINT";
const ACT: &str = "ACT";
const MAG: &str = "MAG";
const AIRWAY: &str = "AIRWAY";
const ALT: &str = "ALT";

/// Row tops closer than this are treated as the same row.
const ROW_MERGE_EPSILON: f32 = 0.5;

/// Ways of locating the header baseline, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStrategy {
    /// A `WAYPOINT` token with an `ACT` token to its right on the same line.
    WaypointActPair,
    /// A fixed offset below a `MAG` token (alternative header layout).
    MagOffset,
}

pub const HEADER_STRATEGIES: &[HeaderStrategy] =
    &[HeaderStrategy::WaypointActPair, HeaderStrategy::MagOffset];

impl HeaderStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            HeaderStrategy::WaypointActPair => "waypoint_act_pair",
            HeaderStrategy::MagOffset => "mag_offset",
        }
    }

    /// Baseline Y found by this strategy, if it applies.
    fn locate(&self, words: &[Token], layout: &RouteLayout) -> Option<f32> {
        match self {
            HeaderStrategy::WaypointActPair => words
                .iter()
                .filter(|w| w.text == WAYPOINT)
                .find(|wp| {
                    let (wx, wy) = wp.center();
                    words.iter().any(|t| {
                        t.text == ACT
                            && t.bbox.center_x() > wx
                            && (t.bbox.center_y() - wy).abs() <= layout.baseline_tolerance
                    })
                })
                .map(|wp| wp.bbox.center_y()),
            HeaderStrategy::MagOffset => words
                .iter()
                .find(|w| w.text == MAG)
                .map(|m| m.bbox.center_y() + layout.mag_offset),
        }
    }
}

/// Ways of locating the token that closes the table, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminatorStrategy {
    /// A token containing the alternate-section word (`ALTERNATE`).
    AlternateWord,
    /// A token containing every fallback fragment (`2000 FT` and `ISA:`).
    FooterFragments,
}

pub const TERMINATOR_STRATEGIES: &[TerminatorStrategy] = &[
    TerminatorStrategy::AlternateWord,
    TerminatorStrategy::FooterFragments,
];

impl TerminatorStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            TerminatorStrategy::AlternateWord => "alternate_word",
            TerminatorStrategy::FooterFragments => "footer_fragments",
        }
    }

    fn matches(&self, token: &Token, layout: &RouteLayout) -> bool {
        match self {
            TerminatorStrategy::AlternateWord => token.text.contains(&layout.terminator_word),
            TerminatorStrategy::FooterFragments => {
                !layout.terminator_fallback.is_empty()
                    && layout
                        .terminator_fallback
                        .iter()
                        .all(|frag| token.text.contains(frag.as_str()))
            }
        }
    }

    /// Topmost matching token strictly below `below_y`.
    fn locate<'a>(
        &self,
        candidates: &[&'a Token],
        below_y: f32,
        layout: &RouteLayout,
    ) -> Option<&'a Token> {
        candidates
            .iter()
            .copied()
            .filter(|t| t.bbox.y_min > below_y && self.matches(t, layout))
            .min_by(|a, b| a.bbox.y_min.total_cmp(&b.bbox.y_min))
    }
}

/// Result of the baseline search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderAnchor {
    pub strategy: HeaderStrategy,
    pub baseline_y: f32,
}

/// A reconstructed route table plus the geometry it was cut with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    pub page_number: usize,
    pub grid: Grid,
    pub header_strategy: HeaderStrategy,
    pub terminator_strategy: TerminatorStrategy,
    /// Texts of the detected header words, left to right.
    pub header_words: Vec<String>,
    pub column_bounds: Vec<f32>,
    pub row_bounds: Vec<f32>,
}

/// Locate the header baseline with the first strategy that applies.
pub fn find_header_baseline(
    words: &[Token],
    layout: &RouteLayout,
) -> Result<HeaderAnchor, FlightLogError> {
    HEADER_STRATEGIES
        .iter()
        .find_map(|strategy| {
            strategy.locate(words, layout).map(|baseline_y| HeaderAnchor {
                strategy: *strategy,
                baseline_y,
            })
        })
        .ok_or_else(|| {
            FlightLogError::HeaderNotFound(format!(
                "no '{}' token with an '{}' token beside it, and no '{}' token",
                WAYPOINT, ACT, MAG
            ))
        })
}

/// Header keyword tokens lying on the baseline, sorted left to right.
pub fn collect_header_words<'a>(
    words: &'a [Token],
    baseline_y: f32,
    layout: &RouteLayout,
) -> Vec<&'a Token> {
    let mut header: Vec<&Token> = words
        .iter()
        .filter(|w| layout.header_keywords.iter().any(|k| *k == w.text))
        .filter(|w| (w.bbox.center_y() - baseline_y).abs() <= layout.baseline_tolerance)
        .collect();
    header.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
    header
}

/// Column boundaries (XX) from the header words.
///
/// Inner boundaries sit midway between neighbouring header words; the first
/// one is pulled to just left of `AIRWAY` when that header is present. A
/// left margin and a right pad past the last header close the outer columns,
/// so the result always has `header.len() + 1` entries.
pub fn column_bounds(header: &[&Token], layout: &RouteLayout) -> Result<Vec<f32>, FlightLogError> {
    let Some(last) = header.last() else {
        return Err(FlightLogError::HeaderNotFound(
            "no header keywords on the baseline".into(),
        ));
    };

    let mut inner: Vec<f32> = header
        .windows(2)
        .map(|pair| (pair[0].bbox.x_max + pair[1].bbox.x_min) / 2.0)
        .collect();
    if let Some(airway) = header.iter().find(|t| t.text == AIRWAY) {
        if let Some(first) = inner.first_mut() {
            *first = airway.bbox.x_min - layout.airway_inset;
        }
    }

    let mut bounds = Vec::with_capacity(header.len() + 1);
    bounds.push(layout.left_margin);
    bounds.extend(inner);
    bounds.push(last.bbox.x_max + layout.right_padding);

    if !strictly_increasing(&bounds) {
        return Err(FlightLogError::HeaderNotFound(format!(
            "header words do not yield increasing column boundaries: {:?}",
            bounds
        )));
    }

    Ok(bounds)
}

/// Row boundaries (YY) from tokens under the `ALT` header.
///
/// Returns the boundaries and the terminator strategy that closed the table.
pub fn row_bounds(
    words: &[Token],
    spans: &[Token],
    header: &[&Token],
    layout: &RouteLayout,
) -> Result<(Vec<f32>, TerminatorStrategy), FlightLogError> {
    let alt = header.iter().find(|t| t.text == ALT).ok_or_else(|| {
        FlightLogError::RowBoundsNotFound(format!("no '{}' header word on the baseline", ALT))
    })?;

    let candidates: Vec<&Token> = words.iter().chain(spans).collect();
    let (terminator, strategy) = TERMINATOR_STRATEGIES
        .iter()
        .find_map(|s| {
            s.locate(&candidates, alt.bbox.y_max, layout)
                .map(|t| (t, *s))
        })
        .ok_or_else(|| {
            FlightLogError::RowBoundsNotFound(format!(
                "no '{}' or '{}' terminator below the header",
                layout.terminator_word,
                layout.terminator_fallback.join("' + '")
            ))
        })?;

    let bottom = terminator.bbox.y_min - layout.row_top_offset;
    let mut tops: Vec<f32> = words
        .iter()
        .filter(|w| w.bbox != alt.bbox && w.bbox != terminator.bbox)
        .filter(|w| {
            let (cx, cy) = w.center();
            cx >= alt.bbox.x_min
                && cx <= alt.bbox.x_max
                && cy > alt.bbox.y_max
                && cy < terminator.bbox.y_min
        })
        .map(|w| w.bbox.y_min - layout.row_top_offset)
        .filter(|top| *top < bottom)
        .collect();
    tops.sort_by(f32::total_cmp);
    tops.dedup_by(|later, earlier| *later - *earlier < ROW_MERGE_EPSILON);
    tops.push(bottom);

    Ok((tops, strategy))
}

/// Reconstruct the route table from one page's words and spans.
///
/// Fails with `HeaderNotFound` or `RowBoundsNotFound` when a structural
/// anchor is missing; no partial grid is returned.
pub fn extract_grid(
    words: &[Token],
    spans: &[Token],
    layout: &RouteLayout,
) -> Result<RouteTable, FlightLogError> {
    let anchor = find_header_baseline(words, layout)?;
    let header = collect_header_words(words, anchor.baseline_y, layout);
    let xx = column_bounds(&header, layout)?;
    let (yy, terminator_strategy) = row_bounds(words, spans, &header, layout)?;

    let columns = layout.canonical_columns.len();
    if header.len() > columns {
        log::debug!(
            "{} header columns detected but only {} canonical columns; trailing columns dropped",
            header.len(),
            columns
        );
    }

    let rows = assign_cells(words, &xx, &yy, columns);
    log::debug!(
        "route grid: header via {} at y={:.1}, {} columns, {} rows, terminator via {}",
        anchor.strategy.name(),
        anchor.baseline_y,
        header.len(),
        rows.len(),
        terminator_strategy.name()
    );

    Ok(RouteTable {
        page_number: 0,
        grid: Grid {
            columns: layout.canonical_columns.clone(),
            rows,
        },
        header_strategy: anchor.strategy,
        terminator_strategy,
        header_words: header.iter().map(|t| t.text.clone()).collect(),
        column_bounds: xx,
        row_bounds: yy,
    })
}

/// Extract the route table from the first page that yields one.
///
/// When no page does, the error from the first page is returned.
pub fn extract_route_table(
    pages: &[PageContent],
    layout: &RouteLayout,
) -> Result<RouteTable, FlightLogError> {
    let mut first_error = None;

    for page in pages {
        match extract_grid(&page.words, &page.spans, layout) {
            Ok(mut table) => {
                table.page_number = page.page_number;
                return Ok(table);
            }
            Err(e) => {
                log::debug!("page {}: no route table ({})", page.page_number, e);
                first_error.get_or_insert(e);
            }
        }
    }

    Err(first_error.unwrap_or_else(|| {
        FlightLogError::EmptyDocument("main route document contains no pages".into())
    }))
}
