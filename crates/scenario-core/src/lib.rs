//! scenario-core: Core library for polled percentage-metric feeds
//!
//! A generator periodically replaces a small CSV file (one row per symbol,
//! one `N%` column per metric). An ingestor polls the file's modification
//! time and keeps a bounded, timestamp-unique table per metric; the view
//! layer turns the most recent rows into fractional values for display.
//!
//! # Main Entry Points
//!
//! - [`generator`] - Produce and publish random snapshots
//! - [`ingest`] - Poll the feed file and maintain the metric tables
//! - [`view`] - Derive display windows from the tables
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod generator;
pub mod ingest;
pub mod logging;
pub mod snapshot;
pub mod view;

// Re-export commonly used types at crate root for convenience
pub use config::{MetricSpec, ScenarioConfig};
pub use errors::{ConfigError, ScenarioError};
pub use generator::GeneratorError;
pub use ingest::{
    Accumulator, FeedMonitor, FeedSchema, IngestError, IngestReport, MetricRow, MetricTable,
    PollOutcome, PollState,
};
pub use snapshot::{Percent, Snapshot, SnapshotError};
pub use view::{DashboardView, ViewRecord, ViewWindow};

// Re-export handler modules as the primary API
pub use generator::handler as generator_ops;
pub use ingest::handler as ingest_ops;

// Re-export logging initialization
pub use logging::init_logging;
