use regex::Regex;
use std::sync::LazyLock;

static KTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*kts").expect("valid wind regex"));

static BEARING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3})\s*°\s*T").expect("valid wind regex"));

/// Compact a reported wind relative to a runway.
///
/// The wind text must carry at least three `<n> kts` magnitudes (runway
/// component, crosswind component, wind speed, then optionally a gust) and
/// a `<n>°T` bearing; otherwise it is returned unchanged. The result reads
/// `"{H|T}{along}/{L|R}{cross} ({bearing}°/{gust or speed})"`.
///
/// `runway_heading` is the runway number (tens of degrees). The along-runway
/// letter is `H` when `|heading*10 - bearing|` lies in `[90, 270]` and `T`
/// otherwise; the cross letter is `L` when `heading*10 - bearing` is
/// positive and `R` otherwise.
pub fn decompose_wind(raw: &str, runway_heading: u32) -> String {
    let magnitudes: Vec<&str> = KTS_RE
        .captures_iter(raw)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    if magnitudes.len() < 3 {
        return raw.to_string();
    }

    let Some(bearing) = BEARING_RE
        .captures(raw)
        .and_then(|c| c[1].parse::<i32>().ok())
    else {
        return raw.to_string();
    };

    let runway = runway_heading as i32 * 10;
    let delta = runway - bearing;

    let along = if (90..=270).contains(&delta.abs()) {
        'H'
    } else {
        'T'
    };
    let side = if delta > 0 { 'L' } else { 'R' };
    let speed = magnitudes.get(3).unwrap_or(&magnitudes[2]);

    format!(
        "{}{}/{}{} ({}°/{})",
        along, magnitudes[0], side, magnitudes[1], bearing, speed
    )
}
