//! Configuration validation logic.

use crate::config::types::{MetricSpec, ScenarioConfig};
use crate::errors::ConfigError;
use crate::ingest::types::column_name;
use crate::snapshot::SYMBOL_COLUMN;
use std::collections::HashSet;

/// Characters that would corrupt a CSV cell or header.
const FORBIDDEN_CHARS: [char; 4] = [',', '"', '\n', '\r'];

/// Validate a ScenarioConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - At least one symbol; symbols non-blank, CSV-safe and unique ignoring case
///   (tables key their columns by the lower-cased symbol)
/// - At least one metric; names non-blank, CSV-safe, unique and not `Symbol`
/// - Every metric range has `min <= max`
/// - Intervals and row counts are at least 1
pub fn validate_config(config: &ScenarioConfig) -> Result<(), ConfigError> {
    validate_symbols(&config.feed.symbols())?;
    validate_metrics(&config.feed.metrics())?;

    if config.generator.interval_secs() == 0 {
        return Err(invalid("generator.interval_secs must be at least 1"));
    }
    if config.ingest.poll_interval_ms() == 0 {
        return Err(invalid("ingest.poll_interval_ms must be at least 1"));
    }
    if config.ingest.max_rows() == 0 {
        return Err(invalid("ingest.max_rows must be at least 1"));
    }
    if config.view.window_rows() == 0 {
        return Err(invalid("view.window_rows must be at least 1"));
    }

    Ok(())
}

pub fn validate_symbols(symbols: &[String]) -> Result<(), ConfigError> {
    if symbols.is_empty() {
        return Err(invalid("feed.symbols must list at least one symbol"));
    }

    let mut seen = HashSet::new();
    for symbol in symbols {
        if symbol.trim().is_empty() {
            return Err(ConfigError::InvalidSymbol {
                symbol: symbol.clone(),
                reason: "must not be blank".to_string(),
            });
        }
        if symbol.contains(FORBIDDEN_CHARS) {
            return Err(ConfigError::InvalidSymbol {
                symbol: symbol.clone(),
                reason: "must not contain commas, quotes or newlines".to_string(),
            });
        }
        if !seen.insert(column_name(symbol)) {
            return Err(ConfigError::InvalidSymbol {
                symbol: symbol.clone(),
                reason: "duplicates another symbol (symbols are compared trimmed, ignoring case)"
                    .to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_metrics(metrics: &[MetricSpec]) -> Result<(), ConfigError> {
    if metrics.is_empty() {
        return Err(invalid("feed.metrics must list at least one metric"));
    }

    let mut seen = HashSet::new();
    for metric in metrics {
        let reason = if metric.name.trim().is_empty() {
            Some("name must not be blank".to_string())
        } else if metric.name.contains(FORBIDDEN_CHARS) {
            Some("name must not contain commas, quotes or newlines".to_string())
        } else if metric.name == SYMBOL_COLUMN {
            Some(format!("'{}' is reserved for the symbol column", SYMBOL_COLUMN))
        } else if !seen.insert(metric.name.as_str()) {
            Some("duplicates another metric".to_string())
        } else if metric.min > metric.max {
            Some(format!(
                "min ({}) must not exceed max ({})",
                metric.min, metric.max
            ))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(ConfigError::InvalidMetric {
                metric: metric.name.clone(),
                reason,
            });
        }
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}
