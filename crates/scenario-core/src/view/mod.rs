//! Display windows derived from the metric tables.

pub mod operations;
pub mod types;

pub use operations::{build_dashboard, build_view_window, format_fraction, window_title};
pub use types::{DashboardView, ViewRecord, ViewWindow};
