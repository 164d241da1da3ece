pub mod builtin;
pub mod schema;

use crate::error::FlightLogError;
use schema::LayoutProfile;
use std::path::Path;

/// Load a layout profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<LayoutProfile, FlightLogError> {
    let content = std::fs::read_to_string(path).map_err(|e| FlightLogError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a layout profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<LayoutProfile, FlightLogError> {
    let profile: LayoutProfile =
        serde_json::from_str(json).map_err(|e| FlightLogError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a layout profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<LayoutProfile, FlightLogError> {
    let profile: LayoutProfile = serde_json::from_str(json).map_err(FlightLogError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a layout profile is well-formed.
pub fn validate_profile(profile: &LayoutProfile) -> Result<(), FlightLogError> {
    if profile.classifier.prefix.trim().is_empty() {
        return Err(FlightLogError::ProfileInvalid(
            "classifier prefix must not be empty".into(),
        ));
    }

    let route = &profile.route;
    if route.header_keywords.is_empty() {
        return Err(FlightLogError::ProfileInvalid(
            "route.header_keywords must not be empty".into(),
        ));
    }
    if route.canonical_columns.is_empty() {
        return Err(FlightLogError::ProfileInvalid(
            "route.canonical_columns must not be empty".into(),
        ));
    }
    for (name, value) in [
        ("baseline_tolerance", route.baseline_tolerance),
        ("mag_offset", route.mag_offset),
        ("left_margin", route.left_margin),
        ("right_padding", route.right_padding),
        ("airway_inset", route.airway_inset),
        ("row_top_offset", route.row_top_offset),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(FlightLogError::ProfileInvalid(format!(
                "route.{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    if route.terminator_word.trim().is_empty() {
        return Err(FlightLogError::ProfileInvalid(
            "route.terminator_word must not be empty".into(),
        ));
    }

    let airport = &profile.airport;
    if airport.column_bounds.len() < 2 {
        return Err(FlightLogError::ProfileInvalid(
            "airport.column_bounds needs at least two boundaries".into(),
        ));
    }
    if airport.column_bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(FlightLogError::ProfileInvalid(
            "airport.column_bounds must be strictly increasing".into(),
        ));
    }
    if !(airport.row_height.is_finite() && airport.row_height > 0.0) {
        return Err(FlightLogError::ProfileInvalid(
            "airport.row_height must be positive".into(),
        ));
    }

    if profile.takeoff.anchor_phrase.trim().is_empty() {
        return Err(FlightLogError::ProfileInvalid(
            "takeoff.anchor_phrase must not be empty".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_json(route_extra: &str, bounds: &str) -> String {
        format!(
            r#"{{
            "name": "Test",
            "version": "1.0",
            "route": {{
                "header_keywords": ["WAYPOINT", "ALT"],
                "canonical_columns": ["WAYPOINT", "ALT"],
                "baseline_tolerance": 5.0,
                "mag_offset": 15.0,
                "left_margin": 5.0,
                "right_padding": 10.0,
                "airway_inset": 2.0,
                "row_top_offset": {route_extra},
                "terminator_word": "ALTERNATE",
                "terminator_fallback": []
            }},
            "airport": {{
                "column_bounds": {bounds},
                "anchor": "AIRPORT",
                "dest_anchor": "DEST",
                "row_height": 15.0
            }}
        }}"#
        )
    }

    #[test]
    fn test_parse_valid_profile_uses_defaults() {
        let p = parse_profile_str(&profile_json("2.0", "[5, 75, 150]")).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.classifier.sample_chars, 250);
        assert_eq!(p.takeoff.anchor_phrase, "All Engines Operating");
    }

    #[test]
    fn test_non_increasing_airport_bounds_rejected() {
        let result = parse_profile_str(&profile_json("2.0", "[5, 150, 75]"));
        assert!(matches!(result, Err(FlightLogError::ProfileInvalid(_))));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let result = parse_profile_str(&profile_json("-1.0", "[5, 75]"));
        assert!(matches!(result, Err(FlightLogError::ProfileInvalid(_))));
    }

    #[test]
    fn test_parse_profile_reports_source_path() {
        let err = parse_profile("{", Path::new("custom.json")).unwrap_err();
        assert!(err.to_string().contains("custom.json"));
    }
}
