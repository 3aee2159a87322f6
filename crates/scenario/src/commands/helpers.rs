use std::path::PathBuf;

use clap::ArgMatches;
use tracing::warn;

use scenario_core::config::ScenarioConfig;

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> ScenarioConfig {
    match ScenarioConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.scenario/config.toml and ./.scenario/config.toml for errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            ScenarioConfig::default()
        }
    }
}

/// Apply the `--path` and `--rows` overrides shared by the feed commands.
pub fn apply_feed_overrides(config: &mut ScenarioConfig, matches: &ArgMatches) {
    if let Some(path) = matches.try_get_one::<PathBuf>("path").ok().flatten() {
        config.feed.path = Some(path.clone());
    }
    if let Some(rows) = matches.try_get_one::<u64>("rows").ok().flatten() {
        config.view.window_rows = Some(usize::try_from(*rows).unwrap_or(usize::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;

    #[test]
    fn test_feed_overrides_replace_config_values() {
        let matches = build_cli()
            .try_get_matches_from(vec!["scenario", "show", "--path", "other.csv", "--rows", "3"])
            .unwrap();
        let show = matches.subcommand_matches("show").unwrap();

        let mut config = ScenarioConfig::default();
        apply_feed_overrides(&mut config, show);

        assert_eq!(config.feed.path(), PathBuf::from("other.csv"));
        assert_eq!(config.view.window_rows(), 3);
    }

    #[test]
    fn test_feed_overrides_keep_config_when_absent() {
        let matches = build_cli()
            .try_get_matches_from(vec!["scenario", "generate"])
            .unwrap();
        let generate = matches.subcommand_matches("generate").unwrap();

        let mut config = ScenarioConfig::default();
        config.feed.path = Some(PathBuf::from("configured.csv"));
        config.view.window_rows = Some(9);
        apply_feed_overrides(&mut config, generate);

        assert_eq!(config.feed.path(), PathBuf::from("configured.csv"));
        assert_eq!(config.view.window_rows(), 9);
    }
}
