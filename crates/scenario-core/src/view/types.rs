use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of a view window: symbol column → fraction (`12%` → `0.12`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRecord {
    pub timestamp: NaiveDateTime,
    pub values: BTreeMap<String, f64>,
}

impl ViewRecord {
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }
}

/// The most recent rows of one metric table, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewWindow {
    pub metric: String,
    /// Display title, `Scenario <n>` for the n-th metric.
    pub title: String,
    pub columns: Vec<String>,
    pub records: Vec<ViewRecord>,
}

impl ViewWindow {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// View windows for every metric, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DashboardView {
    pub windows: Vec<ViewWindow>,
}

impl DashboardView {
    pub fn window(&self, metric: &str) -> Option<&ViewWindow> {
        self.windows.iter().find(|w| w.metric == metric)
    }

    pub fn is_empty(&self) -> bool {
        self.windows.iter().all(ViewWindow::is_empty)
    }
}
