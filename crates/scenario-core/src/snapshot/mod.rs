pub mod codec;
pub mod errors;
pub mod persistence;
pub mod types;

pub use codec::{parse_csv, render_csv};
pub use errors::SnapshotError;
pub use persistence::{read_snapshot, read_snapshot_from, write_snapshot};
pub use types::{Percent, SYMBOL_COLUMN, Snapshot, SnapshotRow};
