//! Configuration type definitions for scenario.
//!
//! These types are serialized/deserialized from TOML config files. Every
//! tunable is optional so that a project config only overrides what it sets;
//! accessor methods in [`super::defaults`] supply the built-in fallbacks.
//!
//! # Example Configuration
//!
//! ```toml
//! [feed]
//! path = "scenario2.csv"
//! symbols = ["X", "Y", "Z"]
//!
//! [[feed.metrics]]
//! name = "Value1"
//! min = 5
//! max = 15
//!
//! [generator]
//! interval_secs = 10
//!
//! [ingest]
//! poll_interval_ms = 8000
//! max_rows = 50
//!
//! [view]
//! window_rows = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
///
/// Loaded from, in order of increasing precedence:
/// 1. User config: `~/.scenario/config.toml`
/// 2. Project config: `./.scenario/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioConfig {
    /// Shared CSV file and the schema both processes agree on
    #[serde(default)]
    pub feed: FeedConfig,

    /// Snapshot generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Polling and rolling-window settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Presentation settings
    #[serde(default)]
    pub view: ViewConfig,
}

/// The shared feed file and its expected shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedConfig {
    /// Path of the CSV file the generator writes and the dashboard polls.
    /// Default: `scenario2.csv` in the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Symbols expected in every snapshot, in column order.
    /// Default: X, Y, Z.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,

    /// Metric series, in column order, with the generator's value ranges.
    /// Default: Value1..Value6.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricSpec>>,
}

/// One metric series: its column name and the inclusive range of whole
/// percentages the generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

impl MetricSpec {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneratorConfig {
    /// Seconds between snapshots. Default: 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Fixed RNG seed for reproducible feeds. Default: seeded from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    /// Milliseconds between modification-time polls. Default: 8000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,

    /// Rows retained per metric table before the oldest is evicted. Default: 50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewConfig {
    /// Most recent rows shown per metric. Default: 20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_rows: Option<usize>,
}
