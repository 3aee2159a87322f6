use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::ScenarioConfig;
use crate::errors::ScenarioError;
use crate::ingest::{errors::IngestError, operations, types::*};
use crate::snapshot;

/// Poll the feed file once.
///
/// Reads and ingests the file when its modification time differs from the
/// one recorded in `state` (always on the first poll). On success the new
/// modification time is recorded; on error neither `state` nor `acc` is
/// changed, so the next poll tries again.
pub fn poll_once(
    path: &Path,
    state: &mut PollState,
    acc: &mut Accumulator,
    schema: &FeedSchema,
) -> Result<PollOutcome, IngestError> {
    let result = poll_inner(path, state, acc, schema);

    match &result {
        Ok(PollOutcome::Unchanged) => {
            debug!(event = "core.ingest.poll_unchanged", path = %path.display());
        }
        Ok(PollOutcome::Ingested(report)) => {
            info!(
                event = "core.ingest.poll_completed",
                path = %path.display(),
                timestamp = %report.timestamp,
                metrics = report.metrics,
                replaced = report.replaced,
                evicted = report.evicted,
                total_rows = acc.total_rows()
            );
        }
        Err(e) if e.is_user_error() => {
            warn!(
                event = "core.ingest.poll_skipped",
                path = %path.display(),
                error_code = e.error_code(),
                error = %e
            );
        }
        Err(e) => {
            warn!(
                event = "core.ingest.poll_failed",
                path = %path.display(),
                error_code = e.error_code(),
                error = %e
            );
        }
    }

    result
}

fn poll_inner(
    path: &Path,
    state: &mut PollState,
    acc: &mut Accumulator,
    schema: &FeedSchema,
) -> Result<PollOutcome, IngestError> {
    // Stat and read through one handle: content and mtime come from the same file
    let mut file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            IngestError::IoError { source: e }
        }
    })?;
    let modified = file.metadata()?.modified()?;

    if !state.is_stale(modified) {
        return Ok(PollOutcome::Unchanged);
    }

    let snapshot = snapshot::read_snapshot_from(&mut file, path)?;
    // A header without data rows carries nothing to ingest
    if snapshot.is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    let timestamp = operations::ingestion_timestamp(modified);
    let report = operations::ingest_snapshot(acc, &snapshot, timestamp, schema)?;

    state.record(modified);
    Ok(PollOutcome::Ingested(report))
}

/// Owns the poll state and accumulator for one feed file.
#[derive(Debug, Clone)]
pub struct FeedMonitor {
    path: PathBuf,
    schema: FeedSchema,
    state: PollState,
    accumulator: Accumulator,
}

impl FeedMonitor {
    pub fn new(path: impl Into<PathBuf>, schema: FeedSchema, max_rows: usize) -> Self {
        let accumulator = Accumulator::new(&schema, max_rows);
        Self {
            path: path.into(),
            schema,
            state: PollState::new(),
            accumulator,
        }
    }

    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(
            config.feed.path(),
            config.feed_schema(),
            config.ingest.max_rows(),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &FeedSchema {
        &self.schema
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn poll(&mut self) -> Result<PollOutcome, IngestError> {
        poll_once(
            &self.path,
            &mut self.state,
            &mut self.accumulator,
            &self.schema,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Percent;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn xyz_schema(metrics: &[&str]) -> FeedSchema {
        FeedSchema::new(
            vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
            metrics.iter().map(|m| m.to_string()).collect(),
        )
    }

    fn write_with_mtime(path: &Path, content: &str, modified: SystemTime) {
        fs::write(path, content).unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(modified).unwrap();
    }

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
    }

    #[test]
    fn test_first_poll_ingests() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        write_with_mtime(&path, "Symbol,Value1\nX,10%\nY,12%\nZ,-5%", at(0));

        let mut monitor = FeedMonitor::new(&path, xyz_schema(&["Value1"]), 50);
        let outcome = monitor.poll().unwrap();

        match outcome {
            PollOutcome::Ingested(report) => {
                assert_eq!(report.timestamp, operations::ingestion_timestamp(at(0)));
                assert_eq!(report.metrics, 1);
            }
            other => panic!("expected Ingested, got {:?}", other),
        }
        assert_eq!(monitor.state().last_modified(), Some(at(0)));
    }

    #[test]
    fn test_unchanged_file_is_not_reingested() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        write_with_mtime(&path, "Symbol,Value1\nX,1%\nY,2%\nZ,3%", at(0));

        let mut monitor = FeedMonitor::new(&path, xyz_schema(&["Value1"]), 50);
        monitor.poll().unwrap();

        assert_eq!(monitor.poll().unwrap(), PollOutcome::Unchanged);
        assert_eq!(monitor.accumulator().total_rows(), 1);
    }

    #[test]
    fn test_changed_file_appends_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        write_with_mtime(&path, "Symbol,Value1\nX,1%\nY,2%\nZ,3%", at(0));

        let mut monitor = FeedMonitor::new(&path, xyz_schema(&["Value1"]), 50);
        monitor.poll().unwrap();

        write_with_mtime(&path, "Symbol,Value1\nX,4%\nY,5%\nZ,6%", at(10));
        assert!(matches!(monitor.poll().unwrap(), PollOutcome::Ingested(_)));

        let table = monitor.accumulator().table("Value1").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.last_timestamp(),
            Some(operations::ingestion_timestamp(at(10)))
        );
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let mut monitor = FeedMonitor::new(path, xyz_schema(&["Value1"]), 50);

        let err = monitor.poll().unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
        assert_eq!(err.placeholder(), "CSV file not found.");
        assert_eq!(monitor.accumulator().total_rows(), 0);
        assert_eq!(monitor.state().last_modified(), None);
    }

    #[test]
    fn test_empty_file_reports_empty_and_leaves_tables_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        write_with_mtime(&path, "Symbol,Value1\nX,1%\nY,2%\nZ,3%", at(0));

        let mut monitor = FeedMonitor::new(&path, xyz_schema(&["Value1"]), 50);
        monitor.poll().unwrap();
        let before = monitor.accumulator().clone();

        write_with_mtime(&path, "", at(5));
        let err = monitor.poll().unwrap_err();

        assert!(matches!(err, IngestError::EmptyFile { .. }));
        assert_eq!(err.placeholder(), "CSV file is empty.");
        assert_eq!(monitor.accumulator(), &before);
        assert_eq!(monitor.state().last_modified(), Some(at(0)));
    }

    #[test]
    fn test_header_only_file_reports_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        write_with_mtime(&path, "Symbol,Value1\n", at(0));

        let mut monitor = FeedMonitor::new(&path, xyz_schema(&["Value1"]), 50);
        let err = monitor.poll().unwrap_err();

        assert!(matches!(err, IngestError::EmptyFile { .. }));
        assert!(err.is_user_error());
        assert_eq!(err.placeholder(), "CSV file is empty.");
        assert_eq!(monitor.accumulator().total_rows(), 0);
        assert_eq!(monitor.state().last_modified(), None);
    }

    #[test]
    fn test_default_config_ingests_single_metric_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenario2.csv");
        write_with_mtime(&path, "Symbol,Value1\nX,10%\nY,12%\nZ,-5%", at(0));

        let mut config = ScenarioConfig::default();
        config.feed.path = Some(path.clone());
        let mut monitor = FeedMonitor::from_config(&config);

        match monitor.poll().unwrap() {
            PollOutcome::Ingested(report) => assert_eq!(report.metrics, 1),
            other => panic!("expected Ingested, got {:?}", other),
        }

        let acc = monitor.accumulator();
        let row = acc.table("Value1").unwrap().rows().next().unwrap();
        assert_eq!(row.values["x"], Percent::from_whole(10));
        assert_eq!(row.values["y"], Percent::from_whole(12));
        assert_eq!(row.values["z"], Percent::from_whole(-5));
        for metric in ["Value2", "Value3", "Value4", "Value5", "Value6"] {
            assert!(acc.table(metric).unwrap().is_empty(), "{} should be untouched", metric);
        }
    }

    #[test]
    fn test_failed_poll_is_retried() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        write_with_mtime(&path, "Symbol,Value1\nX,1%\nY,bad\nZ,3%", at(0));

        let mut monitor = FeedMonitor::new(&path, xyz_schema(&["Value1"]), 50);
        assert!(matches!(
            monitor.poll(),
            Err(IngestError::MalformedPercent { .. })
        ));
        // Same mtime, still not recorded: the next poll reads the file again
        assert!(matches!(
            monitor.poll(),
            Err(IngestError::MalformedPercent { .. })
        ));
    }

    #[test]
    fn test_from_config_uses_configured_schema() {
        let mut config = ScenarioConfig::default();
        config.feed.path = Some(PathBuf::from("/tmp/elsewhere.csv"));
        config.ingest.max_rows = Some(7);

        let monitor = FeedMonitor::from_config(&config);
        assert_eq!(monitor.path(), Path::new("/tmp/elsewhere.csv"));
        assert_eq!(monitor.accumulator().tables().len(), 6);
        assert_eq!(monitor.accumulator().tables()[0].max_rows(), 7);
        assert_eq!(monitor.schema().columns(), vec!["x", "y", "z"]);
    }
}
