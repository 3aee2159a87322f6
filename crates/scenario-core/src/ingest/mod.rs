//! Rolling-window ingestion of feed snapshots.
//!
//! [`poll_once`] watches the feed file's modification time; each new
//! snapshot is pivoted into one row per metric and committed to the
//! [`Accumulator`] as a unit.

pub mod errors;
pub mod handler;
pub mod operations;
pub mod types;

pub use errors::IngestError;
pub use handler::{FeedMonitor, poll_once};
pub use operations::{commit_staged, ingest_snapshot, ingestion_timestamp, stage_snapshot};
pub use types::{
    Accumulator, FeedSchema, IngestReport, MetricRow, MetricTable, PollOutcome, PollState,
    UpsertEffect,
};
