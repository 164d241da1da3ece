use crate::error::FlightLogError;
use crate::layout::schema::LayoutProfile;
use crate::layout::parse_profile_str;

const OFP_STANDARD_JSON: &str = include_str!("../../../../layouts/ofp-standard.json");

/// Available predefined layout profiles.
pub const PRESETS: &[&str] = &["ofp-standard"];

/// Name of the profile used when none is given.
pub const DEFAULT_PRESET: &str = "ofp-standard";

/// Load a predefined layout profile by name.
pub fn load_preset(name: &str) -> Result<LayoutProfile, FlightLogError> {
    match name {
        "ofp-standard" => parse_profile_str(OFP_STANDARD_JSON),
        _ => Err(FlightLogError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The default layout profile.
pub fn default_profile() -> Result<LayoutProfile, FlightLogError> {
    load_preset(DEFAULT_PRESET)
}
