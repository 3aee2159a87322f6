use crate::errors::ScenarioError;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot file not found at '{path}'")]
    FileNotFound { path: String },

    #[error("Snapshot file '{path}' is empty")]
    EmptyFile { path: String },

    #[error("Snapshot header must start with a '{expected}' column, found '{found}'")]
    MissingSymbolColumn { expected: String, found: String },

    #[error("Malformed CSV: {message}")]
    MalformedCsv { message: String },

    #[error("Malformed percentage '{value}': expected a number followed by '%'")]
    MalformedPercent { value: String },

    #[error("Failed to write snapshot to '{path}': {message}")]
    WriteFailed { path: String, message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl SnapshotError {
    pub(crate) fn csv(error: impl std::fmt::Display) -> Self {
        Self::MalformedCsv {
            message: error.to_string(),
        }
    }
}

impl ScenarioError for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::FileNotFound { .. } => "SNAPSHOT_NOT_FOUND",
            SnapshotError::EmptyFile { .. } => "SNAPSHOT_EMPTY",
            SnapshotError::MissingSymbolColumn { .. } => "SNAPSHOT_MISSING_SYMBOL_COLUMN",
            SnapshotError::MalformedCsv { .. } => "SNAPSHOT_MALFORMED_CSV",
            SnapshotError::MalformedPercent { .. } => "SNAPSHOT_MALFORMED_PERCENT",
            SnapshotError::WriteFailed { .. } => "SNAPSHOT_WRITE_FAILED",
            SnapshotError::IoError { .. } => "SNAPSHOT_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SnapshotError::FileNotFound { .. } | SnapshotError::EmptyFile { .. }
        )
    }
}
