use clap::ArgMatches;
use tracing::{error, info};

use scenario_core::events;
use scenario_core::generator_ops;

use super::helpers::{apply_feed_overrides, load_config_with_warning};

pub(crate) fn handle_generate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let count = matches.get_one::<u64>("count").copied();

    let mut config = load_config_with_warning();
    apply_feed_overrides(&mut config, matches);
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.generator.interval_secs = Some(*interval);
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.generator.seed = Some(*seed);
    }

    let path = config.feed.path();
    info!(
        event = "cli.generate_started",
        path = %path.display(),
        count = ?count
    );

    match generator_ops::run_generator(&config, count) {
        Ok(published) => {
            println!("✅ Published {} snapshot(s)", published);
            println!("   Feed: {}", path.display());

            info!(event = "cli.generate_completed", published = published);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to generate snapshots: {}", e);

            error!(event = "cli.generate_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
