use crate::errors::ScenarioError;
use crate::snapshot::SnapshotError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("CSV file not found at '{path}'")]
    FileNotFound { path: String },

    #[error("CSV file '{path}' is empty")]
    EmptyFile { path: String },

    #[error("Snapshot columns {found:?} do not match configured metrics {expected:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Snapshot symbols {found:?} do not match configured symbols {expected:?}")]
    SymbolMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Malformed percentage '{value}' for {symbol} in {metric}")]
    MalformedPercent {
        metric: String,
        symbol: String,
        value: String,
    },

    #[error("Invalid snapshot: {source}")]
    InvalidSnapshot { source: SnapshotError },

    #[error("IO error polling feed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl From<SnapshotError> for IngestError {
    fn from(error: SnapshotError) -> Self {
        match error {
            SnapshotError::FileNotFound { path } => IngestError::FileNotFound { path },
            SnapshotError::EmptyFile { path } => IngestError::EmptyFile { path },
            SnapshotError::IoError { source } => IngestError::IoError { source },
            other => IngestError::InvalidSnapshot { source: other },
        }
    }
}

impl IngestError {
    /// Short message shown in place of the dashboard when a poll fails.
    pub fn placeholder(&self) -> String {
        match self {
            IngestError::FileNotFound { .. } => "CSV file not found.".to_string(),
            IngestError::EmptyFile { .. } => "CSV file is empty.".to_string(),
            other => format!("An error occurred: {}", other),
        }
    }
}

impl ScenarioError for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            IngestError::FileNotFound { .. } => "INGEST_FILE_NOT_FOUND",
            IngestError::EmptyFile { .. } => "INGEST_EMPTY_FILE",
            IngestError::SchemaMismatch { .. } => "INGEST_SCHEMA_MISMATCH",
            IngestError::SymbolMismatch { .. } => "INGEST_SYMBOL_MISMATCH",
            IngestError::MalformedPercent { .. } => "INGEST_MALFORMED_PERCENT",
            IngestError::InvalidSnapshot { .. } => "INGEST_INVALID_SNAPSHOT",
            IngestError::IoError { .. } => "INGEST_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        // Missing and empty files are expected while the generator starts up
        matches!(
            self,
            IngestError::FileNotFound { .. } | IngestError::EmptyFile { .. }
        )
    }
}
