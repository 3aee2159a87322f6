use std::collections::{BTreeMap, VecDeque};
use std::time::SystemTime;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::snapshot::Percent;

/// The symbols and metric names a snapshot must carry.
///
/// Symbols keep their configured spelling; table columns use the
/// lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSchema {
    symbols: Vec<String>,
    metrics: Vec<String>,
}

impl FeedSchema {
    pub fn new(symbols: Vec<String>, metrics: Vec<String>) -> Self {
        Self { symbols, metrics }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Column names used by metric tables, in configured order.
    pub fn columns(&self) -> Vec<String> {
        self.symbols.iter().map(|s| column_name(s)).collect()
    }
}

/// Column key for a symbol.
pub fn column_name(symbol: &str) -> String {
    symbol.trim().to_lowercase()
}

/// One timestamped row of a metric table: symbol column → value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub timestamp: NaiveDateTime,
    pub values: BTreeMap<String, Percent>,
}

/// Effect of inserting one row into a [`MetricTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertEffect {
    /// A row with the same timestamp was replaced.
    pub replaced: bool,
    /// Rows dropped from the front to respect the cap.
    pub evicted: usize,
}

/// Rolling accumulation of one metric across snapshots.
///
/// Rows are in insertion order, timestamps are unique and the row count never
/// exceeds `max_rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    name: String,
    columns: Vec<String>,
    max_rows: usize,
    rows: VecDeque<MetricRow>,
}

impl MetricTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>, max_rows: usize) -> Self {
        let max_rows = max_rows.max(1);
        Self {
            name: name.into(),
            columns,
            max_rows,
            rows: VecDeque::with_capacity(max_rows + 1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &MetricRow> + ExactSizeIterator {
        self.rows.iter()
    }

    /// The most recent `count` rows, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &MetricRow> {
        self.rows.iter().skip(self.rows.len().saturating_sub(count))
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.rows.iter().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.back().map(|r| r.timestamp)
    }

    /// Append `row`, dropping any older row with the same timestamp, then
    /// evict from the front until the cap holds.
    pub fn upsert(&mut self, row: MetricRow) -> UpsertEffect {
        let before = self.rows.len();
        self.rows.retain(|existing| existing.timestamp != row.timestamp);
        let replaced = self.rows.len() != before;

        self.rows.push_back(row);

        let mut evicted = 0;
        while self.rows.len() > self.max_rows {
            self.rows.pop_front();
            evicted += 1;
        }

        UpsertEffect { replaced, evicted }
    }
}

/// Every metric table, in schema order. The only owner of ingested data.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    tables: Vec<MetricTable>,
}

impl Accumulator {
    pub fn new(schema: &FeedSchema, max_rows: usize) -> Self {
        let columns = schema.columns();
        let tables = schema
            .metrics()
            .iter()
            .map(|metric| MetricTable::new(metric.clone(), columns.clone(), max_rows))
            .collect();
        Self { tables }
    }

    pub fn tables(&self) -> &[MetricTable] {
        &self.tables
    }

    pub fn table(&self, metric: &str) -> Option<&MetricTable> {
        self.tables.iter().find(|t| t.name == metric)
    }

    pub(crate) fn table_mut(&mut self, metric: &str) -> Option<&mut MetricTable> {
        self.tables.iter_mut().find(|t| t.name == metric)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(MetricTable::len).sum()
    }
}

/// Last successfully ingested modification time of the feed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollState {
    last_modified: Option<SystemTime>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// True on the first poll or when the file changed since the last ingest.
    pub fn is_stale(&self, modified: SystemTime) -> bool {
        self.last_modified != Some(modified)
    }

    pub(crate) fn record(&mut self, modified: SystemTime) {
        self.last_modified = Some(modified);
    }
}

/// Summary of one committed snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub timestamp: NaiveDateTime,
    pub metrics: usize,
    pub replaced: usize,
    pub evicted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The file has not changed since the last ingest.
    Unchanged,
    Ingested(IngestReport),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, second)
            .unwrap()
    }

    fn row(second: u32, value: i64) -> MetricRow {
        MetricRow {
            timestamp: ts(second),
            values: BTreeMap::from([("x".to_string(), Percent::from_whole(value))]),
        }
    }

    #[test]
    fn test_upsert_appends_in_order() {
        let mut table = MetricTable::new("Value1", vec!["x".to_string()], 5);
        table.upsert(row(1, 10));
        table.upsert(row(2, 11));

        assert_eq!(table.timestamps().collect::<Vec<_>>(), vec![ts(1), ts(2)]);
        assert_eq!(table.last_timestamp(), Some(ts(2)));
    }

    #[test]
    fn test_upsert_same_timestamp_replaces_and_moves_to_end() {
        let mut table = MetricTable::new("Value1", vec!["x".to_string()], 5);
        table.upsert(row(1, 10));
        table.upsert(row(2, 11));

        let effect = table.upsert(row(1, 99));

        assert!(effect.replaced);
        assert_eq!(table.len(), 2);
        assert_eq!(table.timestamps().collect::<Vec<_>>(), vec![ts(2), ts(1)]);
        let last = table.rows().next_back().unwrap();
        assert_eq!(last.values["x"], Percent::from_whole(99));
    }

    #[test]
    fn test_upsert_evicts_oldest_first() {
        let mut table = MetricTable::new("Value1", vec!["x".to_string()], 3);
        for second in 0..3 {
            assert_eq!(table.upsert(row(second, 1)).evicted, 0);
        }

        let effect = table.upsert(row(3, 1));

        assert_eq!(effect.evicted, 1);
        assert_eq!(
            table.timestamps().collect::<Vec<_>>(),
            vec![ts(1), ts(2), ts(3)]
        );
    }

    #[test]
    fn test_tail_returns_most_recent_rows() {
        let mut table = MetricTable::new("Value1", vec!["x".to_string()], 10);
        for second in 0..6 {
            table.upsert(row(second, 1));
        }

        let tail: Vec<_> = table.tail(2).map(|r| r.timestamp).collect();
        assert_eq!(tail, vec![ts(4), ts(5)]);
        assert_eq!(table.tail(100).count(), 6);
        assert_eq!(table.tail(0).count(), 0);
    }

    #[test]
    fn test_zero_cap_is_clamped() {
        let mut table = MetricTable::new("Value1", vec![], 0);
        table.upsert(row(1, 1));
        assert_eq!(table.max_rows(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_accumulator_tables_follow_schema() {
        let schema = FeedSchema::new(
            vec!["X".to_string(), "Y".to_string()],
            vec!["Value2".to_string(), "Value1".to_string()],
        );
        let acc = Accumulator::new(&schema, 50);

        let names: Vec<_> = acc.tables().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Value2", "Value1"]);
        assert_eq!(acc.table("Value1").unwrap().columns(), ["x", "y"]);
        assert!(acc.table("Value3").is_none());
        assert_eq!(acc.total_rows(), 0);
    }

    #[test]
    fn test_poll_state_staleness() {
        let mut state = PollState::new();
        let modified = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(100);

        assert!(state.is_stale(modified));
        state.record(modified);
        assert!(!state.is_stale(modified));
        assert!(state.is_stale(modified + std::time::Duration::from_millis(1)));
    }
}
