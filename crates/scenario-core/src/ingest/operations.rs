//! Pivoting snapshots into metric tables.
//!
//! A snapshot is first staged into one row per metric without touching the
//! accumulator. Only a fully staged snapshot is committed, so a bad cell in
//! any metric leaves every table as it was.

use std::collections::{BTreeMap, HashSet};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};

use crate::ingest::errors::IngestError;
use crate::ingest::types::{Accumulator, FeedSchema, IngestReport, MetricRow, column_name};
use crate::snapshot::{Percent, Snapshot};

/// Ingestion timestamp for a file modified at `modified`: local wall-clock
/// time truncated to whole seconds. Writes within the same second share a
/// timestamp, so the later one replaces the earlier.
pub fn ingestion_timestamp(modified: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(modified)
        .naive_local()
        .trunc_subsecs(0)
}

/// Pivot `snapshot` into one row per schema metric it carries, stamped with
/// `timestamp`. Schema metrics absent from the snapshot are not staged.
///
/// # Errors
///
/// - [`IngestError::SchemaMismatch`] if the snapshot has no metric column, a
///   column outside the schema, or a repeated column
/// - [`IngestError::SymbolMismatch`] if the symbols differ from the schema or repeat
/// - [`IngestError::MalformedPercent`] if any cell is not a percentage
pub fn stage_snapshot(
    snapshot: &Snapshot,
    timestamp: NaiveDateTime,
    schema: &FeedSchema,
) -> Result<Vec<(String, MetricRow)>, IngestError> {
    check_metrics(snapshot, schema)?;
    check_symbols(snapshot, schema)?;

    let mut staged = Vec::with_capacity(schema.metrics().len());
    for metric in schema.metrics() {
        let Some(index) = snapshot.metric_index(metric) else {
            continue;
        };

        let mut values = BTreeMap::new();
        for row in &snapshot.rows {
            let cell = row.cells.get(index).map(String::as_str).unwrap_or_default();
            let percent: Percent = cell.parse().map_err(|_| IngestError::MalformedPercent {
                metric: metric.clone(),
                symbol: row.symbol.clone(),
                value: cell.to_string(),
            })?;
            values.insert(column_name(&row.symbol), percent);
        }

        staged.push((metric.clone(), MetricRow { timestamp, values }));
    }

    Ok(staged)
}

/// Apply staged rows to their tables.
pub fn commit_staged(
    acc: &mut Accumulator,
    staged: Vec<(String, MetricRow)>,
    timestamp: NaiveDateTime,
) -> IngestReport {
    let mut report = IngestReport {
        timestamp,
        metrics: 0,
        replaced: 0,
        evicted: 0,
    };

    for (metric, row) in staged {
        let Some(table) = acc.table_mut(&metric) else {
            continue;
        };
        let effect = table.upsert(row);
        report.metrics += 1;
        report.evicted += effect.evicted;
        if effect.replaced {
            report.replaced += 1;
        }
    }

    report
}

/// Stage and commit one snapshot: all metric tables are updated or none is.
pub fn ingest_snapshot(
    acc: &mut Accumulator,
    snapshot: &Snapshot,
    timestamp: NaiveDateTime,
    schema: &FeedSchema,
) -> Result<IngestReport, IngestError> {
    let staged = stage_snapshot(snapshot, timestamp, schema)?;
    Ok(commit_staged(acc, staged, timestamp))
}

fn check_metrics(snapshot: &Snapshot, schema: &FeedSchema) -> Result<(), IngestError> {
    let expected: HashSet<&str> = schema.metrics().iter().map(String::as_str).collect();
    let found: HashSet<&str> = snapshot.metrics.iter().map(String::as_str).collect();

    if found.is_empty() || !found.is_subset(&expected) || found.len() != snapshot.metrics.len() {
        return Err(IngestError::SchemaMismatch {
            expected: schema.metrics().to_vec(),
            found: snapshot.metrics.clone(),
        });
    }
    Ok(())
}

fn check_symbols(snapshot: &Snapshot, schema: &FeedSchema) -> Result<(), IngestError> {
    let expected: HashSet<String> = schema.columns().into_iter().collect();
    let found: HashSet<String> = snapshot.symbols().map(column_name).collect();

    if expected != found || found.len() != snapshot.rows.len() {
        return Err(IngestError::SymbolMismatch {
            expected: schema.symbols().to_vec(),
            found: snapshot.symbols().map(str::to_string).collect(),
        });
    }
    Ok(())
}
