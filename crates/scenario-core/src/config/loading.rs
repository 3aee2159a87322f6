//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.scenario/config.toml` (global user preferences)
//! 3. **Project config** - `./.scenario/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)

use crate::config::types::{
    FeedConfig, GeneratorConfig, IngestConfig, ScenarioConfig, ViewConfig,
};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = ".scenario";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.scenario/config.toml`)
/// 3. Project config (`./.scenario/config.toml`)
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if the
/// merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<ScenarioConfig, ConfigError> {
    let user_dir = dirs::home_dir();
    let project_dir = std::env::current_dir()?;
    load_hierarchy_from(user_dir.as_deref(), &project_dir)
}

/// Load the hierarchy rooted at explicit user and project directories.
///
/// Each directory is expected to contain a `.scenario/config.toml`.
pub fn load_hierarchy_from(
    user_dir: Option<&Path>,
    project_dir: &Path,
) -> Result<ScenarioConfig, ConfigError> {
    let mut config = ScenarioConfig::default();

    // Missing files are expected, parse errors fail
    if let Some(user_dir) = user_dir
        && let Some(user_config) = load_optional(&config_path_in(user_dir))?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(project_config) = load_optional(&config_path_in(project_dir))? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;

    Ok(config)
}

fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

fn load_optional(path: &Path) -> Result<Option<ScenarioConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::ConfigNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<ScenarioConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Every field is optional, so an override only replaces values it sets.
/// Symbol and metric lists are replaced as a whole, never concatenated.
pub fn merge_configs(base: ScenarioConfig, override_config: ScenarioConfig) -> ScenarioConfig {
    ScenarioConfig {
        feed: FeedConfig {
            path: override_config.feed.path.or(base.feed.path),
            symbols: override_config.feed.symbols.or(base.feed.symbols),
            metrics: override_config.feed.metrics.or(base.feed.metrics),
        },
        generator: GeneratorConfig {
            interval_secs: override_config
                .generator
                .interval_secs
                .or(base.generator.interval_secs),
            seed: override_config.generator.seed.or(base.generator.seed),
        },
        ingest: IngestConfig {
            poll_interval_ms: override_config
                .ingest
                .poll_interval_ms
                .or(base.ingest.poll_interval_ms),
            max_rows: override_config.ingest.max_rows.or(base.ingest.max_rows),
        },
        view: ViewConfig {
            window_rows: override_config.view.window_rows.or(base.view.window_rows),
        },
    }
}
