use flightlog_core::error::FlightLogError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), FlightLogError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
