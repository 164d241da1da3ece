use crate::grid::route::RouteTable;
use crate::grid::Grid;
use crate::takeoff::TakeoffData;
use serde::{Deserialize, Serialize};

pub const ROUTE_SHEET: &str = "Main_Route_Grid";
pub const AIRPORT_SHEET: &str = "Airport_Table";
pub const VARIABLES_SHEET: &str = "Takeoff_Variables";
pub const LEFT_LINES_SHEET: &str = "Takeoff_Left";
pub const RIGHT_LINES_SHEET: &str = "Takeoff_Right";

/// Result of converting a main-route document and a Takeoff document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightLogReport {
    pub main_file: String,
    pub takeoff_file: String,
    pub route: RouteTable,
    pub airport: Grid,
    pub takeoff: TakeoffData,
}

/// A named plain table, ready to be written as one spreadsheet sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn from_grid(name: &str, grid: &Grid) -> Self {
        Sheet {
            name: name.to_string(),
            columns: grid.columns.clone(),
            rows: grid.rows.clone(),
        }
    }

    fn from_lines(name: &str, lines: &[String]) -> Self {
        Sheet {
            name: name.to_string(),
            columns: vec!["Line".into()],
            rows: lines.iter().map(|l| vec![l.clone()]).collect(),
        }
    }
}

impl FlightLogReport {
    /// Flatten the report into its output sheets, in workbook order.
    ///
    /// The airport sheet is always present; it has no rows when the table
    /// was not found.
    pub fn sheets(&self) -> Vec<Sheet> {
        let variables = Sheet {
            name: VARIABLES_SHEET.into(),
            columns: vec!["Field".into(), "Value".into()],
            rows: self
                .takeoff
                .variables
                .iter()
                .map(|(k, v)| vec![k.clone(), v.clone()])
                .collect(),
        };

        vec![
            Sheet::from_grid(ROUTE_SHEET, &self.route.grid),
            Sheet::from_grid(AIRPORT_SHEET, &self.airport),
            variables,
            Sheet::from_lines(LEFT_LINES_SHEET, &self.takeoff.left_lines),
            Sheet::from_lines(RIGHT_LINES_SHEET, &self.takeoff.right_lines),
        ]
    }
}
