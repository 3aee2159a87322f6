use clap::ArgMatches;
use tracing::{info, warn};

use scenario_core::FeedMonitor;
use scenario_core::errors::ScenarioError;
use scenario_core::events;
use scenario_core::view::build_dashboard;

use super::helpers::{apply_feed_overrides, load_config_with_warning};
use super::render;

pub(crate) fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json = matches.get_flag("json");

    let mut config = load_config_with_warning();
    apply_feed_overrides(&mut config, matches);

    info!(
        event = "cli.show_started",
        path = %config.feed.path().display(),
        json = json
    );

    let mut monitor = FeedMonitor::from_config(&config);
    match monitor.poll() {
        Ok(_) => {
            let view = build_dashboard(monitor.accumulator(), config.view.window_rows());
            render::print_dashboard(&view, json)?;

            info!(
                event = "cli.show_completed",
                windows = view.windows.len()
            );
            Ok(())
        }
        Err(e) => {
            render::print_poll_error(&e, json)?;

            if e.is_user_error() {
                warn!(event = "cli.show_no_data", error_code = e.error_code());
                Ok(())
            } else {
                events::log_app_error(&e);
                Err(e.into())
            }
        }
    }
}
