use std::thread;
use std::time::Duration;

use clap::ArgMatches;
use tracing::info;

use scenario_core::view::build_dashboard;
use scenario_core::{FeedMonitor, PollOutcome};

use super::helpers::{apply_feed_overrides, load_config_with_warning};
use super::render;

pub(crate) fn handle_watch_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = matches.get_flag("json");
    let iterations = matches.get_one::<u64>("iterations").copied();

    let mut config = load_config_with_warning();
    apply_feed_overrides(&mut config, matches);
    if let Some(poll_ms) = matches.get_one::<u64>("poll-ms") {
        config.ingest.poll_interval_ms = Some(*poll_ms);
    }

    let interval = Duration::from_millis(config.ingest.poll_interval_ms());
    let window_rows = config.view.window_rows();
    let mut monitor = FeedMonitor::from_config(&config);

    info!(
        event = "cli.watch_started",
        path = %monitor.path().display(),
        poll_interval_ms = config.ingest.poll_interval_ms(),
        iterations = ?iterations
    );

    // Repeated identical failures are printed once
    let mut last_placeholder: Option<String> = None;
    let mut polls = 0u64;
    loop {
        match monitor.poll() {
            Ok(PollOutcome::Ingested(report)) => {
                let view = build_dashboard(monitor.accumulator(), window_rows);
                render::print_dashboard(&view, json)?;
                last_placeholder = None;

                info!(
                    event = "cli.watch.render_completed",
                    timestamp = %report.timestamp,
                    windows = view.windows.len()
                );
            }
            Ok(PollOutcome::Unchanged) => {}
            Err(e) => {
                let placeholder = e.placeholder();
                if last_placeholder.as_deref() != Some(placeholder.as_str()) {
                    render::print_poll_error(&e, json)?;
                    last_placeholder = Some(placeholder);
                }
            }
        }

        polls += 1;
        if iterations.is_some_and(|limit| polls >= limit) {
            break;
        }
        thread::sleep(interval);
    }

    info!(event = "cli.watch_completed", polls = polls);
    Ok(())
}
