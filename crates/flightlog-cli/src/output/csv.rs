use flightlog_core::error::FlightLogError;
use flightlog_core::report::Sheet;
use std::io;
use std::path::{Path, PathBuf};

/// Write each sheet to `<dir>/<sheet name>.csv`, header row first.
///
/// Returns the paths written, in sheet order.
pub fn write_sheets(sheets: &[Sheet], dir: &Path) -> Result<Vec<PathBuf>, FlightLogError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        write_sheet(sheet, &path).map_err(io::Error::from)?;
        log::debug!("{}: {} row(s)", path.display(), sheet.rows.len());
        written.push(path);
    }
    Ok(written)
}

fn write_sheet(sheet: &Sheet, path: &Path) -> Result<(), ::csv::Error> {
    let mut writer = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;
    writer.write_record(&sheet.columns)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str) -> Sheet {
        Sheet {
            name: name.into(),
            columns: vec!["WAYPOINT".into(), "ALT".into()],
            rows: vec![
                vec!["DENUT".into(), "350".into()],
                vec!["KONAN, FIR".into(), String::new()],
            ],
        }
    }

    #[test]
    fn test_write_sheets_one_file_per_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sheets");
        let written =
            write_sheets(&[sheet("Main_Route_Grid"), sheet("Airport_Table")], &out).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], out.join("Main_Route_Grid.csv"));

        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(text, "WAYPOINT,ALT\nDENUT,350\n\"KONAN, FIR\",\n");
    }
}
