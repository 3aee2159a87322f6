//! Snapshot file persistence
//!
//! Writes replace the feed file atomically (temp file in the same directory,
//! then rename) so a polling reader never observes a half-written snapshot.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::codec::{parse_csv, render_csv};
use super::errors::SnapshotError;
use super::types::Snapshot;

/// Read and parse the whole feed file.
pub fn read_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let mut file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SnapshotError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            SnapshotError::IoError { source: e }
        }
    })?;

    read_snapshot_from(&mut file, path)
}

/// Read and parse a snapshot from an already opened feed file.
///
/// `path` is only used in error messages. Reading through the handle that
/// was used to stat the file keeps content and modification time paired
/// when the file is replaced concurrently.
pub fn read_snapshot_from<R: Read>(reader: &mut R, path: &Path) -> Result<Snapshot, SnapshotError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    parse_csv(&content).map_err(|e| match e {
        SnapshotError::EmptyFile { .. } => SnapshotError::EmptyFile {
            path: path.display().to_string(),
        },
        other => other,
    })
}

/// Replace the feed file with `snapshot`.
///
/// Creates the parent directory if it does not exist.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let csv = render_csv(snapshot)?;
    let write_failed = |message: String| SnapshotError::WriteFailed {
        path: path.display().to_string(),
        message,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|e| write_failed(format!("cannot create '{}': {}", parent.display(), e)))?;

    // Temp file must live on the same filesystem for the rename to be atomic
    let mut temp_file = NamedTempFile::new_in(parent)
        .map_err(|e| write_failed(format!("cannot create temp file: {}", e)))?;
    temp_file
        .write_all(csv.as_bytes())
        .map_err(|e| write_failed(format!("cannot write temp file: {}", e)))?;
    temp_file
        .persist(path)
        .map_err(|e| write_failed(format!("cannot replace file: {}", e.error)))?;

    debug!(
        event = "core.snapshot.write_completed",
        path = %path.display(),
        rows = snapshot.rows.len(),
        bytes = csv.len()
    );

    Ok(())
}
