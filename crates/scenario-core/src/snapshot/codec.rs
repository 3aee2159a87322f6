//! CSV encoding of snapshots.
//!
//! Layout: a `Symbol,<metric>...` header followed by one row per symbol.
//! Rows must have as many cells as the header.

use super::errors::SnapshotError;
use super::types::{SYMBOL_COLUMN, Snapshot};

/// Parse CSV text into a snapshot.
///
/// Whitespace-only input is reported as [`SnapshotError::EmptyFile`] with an
/// empty path; [`super::persistence::read_snapshot`] fills the path in.
pub fn parse_csv(content: &str) -> Result<Snapshot, SnapshotError> {
    if content.trim().is_empty() {
        return Err(SnapshotError::EmptyFile {
            path: String::new(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(SnapshotError::csv)?.clone();
    let mut columns = headers.iter();
    match columns.next() {
        Some(first) if first == SYMBOL_COLUMN => {}
        other => {
            return Err(SnapshotError::MissingSymbolColumn {
                expected: SYMBOL_COLUMN.to_string(),
                found: other.unwrap_or_default().to_string(),
            });
        }
    }

    let mut snapshot = Snapshot::new(columns.map(str::to_string).collect());
    for record in reader.records() {
        let record = record.map_err(SnapshotError::csv)?;
        let mut fields = record.iter();
        let symbol = fields.next().unwrap_or_default();
        snapshot.push_row(symbol, fields.map(str::to_string).collect());
    }

    Ok(snapshot)
}

/// Render a snapshot as CSV text with `\n` line endings.
pub fn render_csv(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let header = std::iter::once(SYMBOL_COLUMN).chain(snapshot.metrics.iter().map(String::as_str));
    writer.write_record(header).map_err(SnapshotError::csv)?;

    for row in &snapshot.rows {
        let record =
            std::iter::once(row.symbol.as_str()).chain(row.cells.iter().map(String::as_str));
        writer.write_record(record).map_err(SnapshotError::csv)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SnapshotError::csv(e.error()))?;
    String::from_utf8(bytes).map_err(SnapshotError::csv)
}
