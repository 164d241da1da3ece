use serde::{Deserialize, Serialize};

/// Geometry and keyword constants for one flight-plan document family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub classifier: ClassifierLayout,
    pub route: RouteLayout,
    pub airport: AirportLayout,
    #[serde(default)]
    pub takeoff: TakeoffLayout,
}

/// How the Takeoff document is recognised from its first page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierLayout {
    /// Lower-case ASCII prefix the normalized page text must start with.
    pub prefix: String,
    /// Number of leading characters of the first page that are inspected.
    pub sample_chars: usize,
}

impl Default for ClassifierLayout {
    fn default() -> Self {
        ClassifierLayout {
            prefix: "takeoff".into(),
            sample_chars: 250,
        }
    }
}

/// Route table (navigation log) geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLayout {
    /// Exact token texts that count as column headers.
    pub header_keywords: Vec<String>,
    /// Output column names, filled left to right by detected columns.
    pub canonical_columns: Vec<String>,
    /// Max vertical distance between a header word and the baseline.
    pub baseline_tolerance: f32,
    /// Baseline offset below the `MAG` token when no WAYPOINT/ACT pair exists.
    pub mag_offset: f32,
    pub left_margin: f32,
    /// Width added after the last header word to close the final column.
    pub right_padding: f32,
    /// Gap kept left of the `AIRWAY` header when it opens the second column.
    pub airway_inset: f32,
    /// Distance above a reference-column token where its row starts.
    pub row_top_offset: f32,
    pub terminator_word: String,
    /// Fragments that must all appear in one token for the fallback terminator.
    pub terminator_fallback: Vec<String>,
}

/// Airport summary table geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportLayout {
    pub column_bounds: Vec<f32>,
    pub anchor: String,
    pub dest_anchor: String,
    pub row_height: f32,
}

/// Takeoff performance document geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffLayout {
    /// Phrase whose position divides the page; only text above it is read.
    pub anchor_phrase: String,
}

impl Default for TakeoffLayout {
    fn default() -> Self {
        TakeoffLayout {
            anchor_phrase: "All Engines Operating".into(),
        }
    }
}
