use flightlog_core::grid::Grid;
use flightlog_core::report::FlightLogReport;

pub fn print_report(report: &FlightLogReport) {
    println!("Main route document: {}", report.main_file);
    println!("Takeoff document:    {}", report.takeoff_file);
    println!(
        "Route table on page {} (header: {}, end: {})\n",
        report.route.page_number,
        report.route.header_strategy.name(),
        report.route.terminator_strategy.name()
    );

    for sheet in report.sheets() {
        println!("=== {} ===\n", sheet.name);
        if sheet.rows.is_empty() {
            println!("  (empty)\n");
            continue;
        }
        print_rows(&sheet.columns, &sheet.rows);
        println!();
    }
}

pub fn print_grid(grid: &Grid) {
    print_rows(&grid.columns, &grid.rows);
}

/// Print a left-aligned table. Trailing columns empty in every row are hidden.
fn print_rows(columns: &[String], rows: &[Vec<String>]) {
    let shown = (0..columns.len())
        .rev()
        .find(|&c| rows.iter().any(|r| r.get(c).is_some_and(|v| !v.is_empty())))
        .map_or(columns.len().min(1), |c| c + 1);

    let widths: Vec<usize> = (0..shown)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|v| v.chars().count())
                .chain(std::iter::once(columns[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_line(columns, &widths);
    for row in rows {
        print_line(row, &widths);
    }
}

fn print_line(cells: &[String], widths: &[usize]) {
    let text = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    println!("  {}", text.trim_end());
}
