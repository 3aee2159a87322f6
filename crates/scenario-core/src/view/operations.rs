use crate::ingest::{Accumulator, MetricTable};
use crate::view::types::{DashboardView, ViewRecord, ViewWindow};

/// Title shown for the metric at `position` (0-based).
pub fn window_title(position: usize) -> String {
    format!("Scenario {}", position + 1)
}

/// Take the last `window_rows` rows of `table` and convert each cell to a
/// fraction. Does not modify the table.
pub fn build_view_window(table: &MetricTable, position: usize, window_rows: usize) -> ViewWindow {
    let records = table
        .tail(window_rows)
        .map(|row| ViewRecord {
            timestamp: row.timestamp,
            values: row
                .values
                .iter()
                .map(|(column, percent)| (column.clone(), percent.fraction()))
                .collect(),
        })
        .collect();

    ViewWindow {
        metric: table.name().to_string(),
        title: window_title(position),
        columns: table.columns().to_vec(),
        records,
    }
}

/// Build a view window for every table of the accumulator.
pub fn build_dashboard(acc: &Accumulator, window_rows: usize) -> DashboardView {
    DashboardView {
        windows: acc
            .tables()
            .iter()
            .enumerate()
            .map(|(position, table)| build_view_window(table, position, window_rows))
            .collect(),
    }
}

/// Render a fraction as a percentage with at most two decimals:
/// `0.1` → `10%`, `0.125` → `12.5%`, `-0.05` → `-5%`.
pub fn format_fraction(fraction: f64) -> String {
    let percent = (fraction * 10_000.0).round() / 100.0;
    let fixed = format!("{:.2}", percent);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0%".to_string(),
        other => format!("{}%", other),
    }
}
