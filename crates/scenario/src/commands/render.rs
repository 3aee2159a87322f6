use serde::Serialize;

use scenario_core::errors::ScenarioError;
use scenario_core::{DashboardView, IngestError};

use crate::table::TableFormatter;

#[derive(Serialize)]
struct PollErrorResponse<'a> {
    error: &'a str,
    message: String,
}

/// Print every window: box-drawn tables, or a JSON array of windows.
pub(crate) fn print_dashboard(
    view: &DashboardView,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    for (i, window) in view.windows.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({})", window.title, window.metric);
        if window.is_empty() {
            println!("No rows yet.");
        } else {
            TableFormatter::new(window).print_table(window);
        }
    }
    Ok(())
}

/// Print the placeholder shown in place of the tables when a poll fails.
pub(crate) fn print_poll_error(
    error: &IngestError,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let response = PollErrorResponse {
            error: error.error_code(),
            message: error.placeholder(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", error.placeholder());
    }
    Ok(())
}
