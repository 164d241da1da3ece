use flightlog_core::error::FlightLogError;
use flightlog_core::layout::builtin;
use std::path::Path;

pub fn list() -> Result<(), FlightLogError> {
    println!("Available layout profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<14} {} (v{}){}",
            name, profile.name, profile.version, default_marker
        );
        if let Some(ref desc) = profile.description {
            println!("                 {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), FlightLogError> {
    let profile = builtin::load_preset(name)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), FlightLogError> {
    let profile = flightlog_core::layout::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", profile.name, profile.version);
    println!(
        "  Route columns: {}",
        profile.route.canonical_columns.join(", ")
    );
    println!(
        "  Airport columns: {}",
        profile.airport.column_bounds.len() - 1
    );

    let mut warnings = Vec::new();
    for keyword in ["WAYPOINT", "ACT", "ALT"] {
        if !profile.route.header_keywords.iter().any(|k| k == keyword) {
            warnings.push(format!(
                "header keyword '{}' is missing; route tables will not be located by it",
                keyword
            ));
        }
    }
    if profile.route.header_keywords.len() > profile.route.canonical_columns.len() {
        warnings.push(format!(
            "{} header keywords but only {} canonical columns",
            profile.route.header_keywords.len(),
            profile.route.canonical_columns.len()
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
