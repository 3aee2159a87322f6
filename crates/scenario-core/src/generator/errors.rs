use crate::errors::{ConfigError, ScenarioError};
use crate::snapshot::SnapshotError;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Generator configuration is invalid: {source}")]
    InvalidConfig {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to publish snapshot: {source}")]
    PublishFailed {
        #[from]
        source: SnapshotError,
    },
}

impl ScenarioError for GeneratorError {
    fn error_code(&self) -> &'static str {
        match self {
            GeneratorError::InvalidConfig { .. } => "GENERATOR_INVALID_CONFIG",
            GeneratorError::PublishFailed { .. } => "GENERATOR_PUBLISH_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, GeneratorError::InvalidConfig { .. })
    }
}
