//! # Configuration System
//!
//! Hierarchical TOML configuration system for scenario.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.scenario/config.toml` (global user preferences)
//! 3. **Project config** - `./.scenario/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use scenario_core::config::ScenarioConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScenarioConfig::load_hierarchy()?;
//!     let schema = config.feed_schema();
//!     println!("polling {} for {:?}", config.feed.path().display(), schema.symbols());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{FeedConfig, GeneratorConfig, IngestConfig, MetricSpec, ScenarioConfig, ViewConfig};
pub use validation::validate_config;

use crate::ingest::FeedSchema;

impl ScenarioConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }

    /// The symbol set and metric names every snapshot must carry.
    pub fn feed_schema(&self) -> FeedSchema {
        FeedSchema::new(
            self.feed.symbols(),
            self.feed.metrics().into_iter().map(|m| m.name).collect(),
        )
    }
}
