//! Default values for configuration types.
//!
//! Every optional setting resolves through an accessor here, so callers never
//! see an unset value.

use crate::config::types::{FeedConfig, GeneratorConfig, IngestConfig, MetricSpec, ViewConfig};
use std::path::PathBuf;

pub const DEFAULT_FEED_PATH: &str = "scenario2.csv";
pub const DEFAULT_SYMBOLS: [&str; 3] = ["X", "Y", "Z"];
pub const DEFAULT_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 8000;
pub const DEFAULT_MAX_ROWS: usize = 50;
pub const DEFAULT_WINDOW_ROWS: usize = 20;

/// Returns the six default metric series with their generator ranges.
pub fn default_metrics() -> Vec<MetricSpec> {
    vec![
        MetricSpec::new("Value1", 5, 15),
        MetricSpec::new("Value2", 5, 15),
        MetricSpec::new("Value3", -10, 20),
        MetricSpec::new("Value4", -10, 20),
        MetricSpec::new("Value5", -5, 15),
        MetricSpec::new("Value6", 5, 25),
    ]
}

pub fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

impl FeedConfig {
    /// Returns the feed path, defaulting to `scenario2.csv`.
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FEED_PATH))
    }

    /// Returns the configured symbols, defaulting to X, Y, Z.
    pub fn symbols(&self) -> Vec<String> {
        self.symbols.clone().unwrap_or_else(default_symbols)
    }

    /// Returns the configured metrics, defaulting to Value1..Value6.
    pub fn metrics(&self) -> Vec<MetricSpec> {
        self.metrics.clone().unwrap_or_else(default_metrics)
    }
}

impl GeneratorConfig {
    /// Returns the snapshot interval in seconds, defaulting to 10.
    pub fn interval_secs(&self) -> u64 {
        self.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS)
    }
}

impl IngestConfig {
    /// Returns the poll interval in milliseconds, defaulting to 8000.
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Returns the per-metric row cap, defaulting to 50.
    pub fn max_rows(&self) -> usize {
        self.max_rows.unwrap_or(DEFAULT_MAX_ROWS)
    }
}

impl ViewConfig {
    /// Returns the number of rows per view window, defaulting to 20.
    pub fn window_rows(&self) -> usize {
        self.window_rows.unwrap_or(DEFAULT_WINDOW_ROWS)
    }
}
