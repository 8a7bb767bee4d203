// UI layer: console output for the run. Progress lines go to stdout,
// spinners (indicatif) draw on stderr while a request is in flight.

use std::time::Duration;

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::error::StageError;
use crate::models::TenderDetails;

/// `1. Checking API access: https://...`
pub fn stage(number: u8, title: &str, url: &str) {
    println!("{}. {}: {}", number, title, url);
}

/// Indented result line under the current stage.
pub fn note(message: impl AsRef<str>) {
    println!("   >> {}", message.as_ref());
}

/// Print the diagnostic for a failed stage: the call failure (HTTP status
/// and raw body when the server answered), then the stage message.
pub fn report_failure(err: &StageError) {
    let marker = "[Error]".red().bold();
    match err.api_error() {
        Some(cause) => {
            println!("   >> {} {}", marker, cause);
            note(err.to_string());
        }
        None => println!("   >> {} {}", marker, err),
    }
}

/// Spinner shown while a blocking request runs. Call `finish_and_clear`
/// once the response is in.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Report lines for a tender record. The best-proposal line is only
/// present when the server returned one.
pub fn status_lines(details: &TenderDetails) -> Vec<String> {
    let mut lines = vec![
        format!("Number: {}", display_value(&details.number)),
        format!(
            "Status: {} ({})",
            display_value(&details.status_title),
            display_value(&details.status)
        ),
        format!(
            "Last status change: {} ({})",
            display_value(&details.actual_date),
            display_value(&details.actual_date_title)
        ),
        format!("Route length: {}", display_value(&details.route_length)),
        format!("Proposals: {}", display_value(&details.proposals_count)),
    ];
    if let Some(best) = &details.best_proposal {
        lines.push(format!("Best proposal: {}", display_value(&best.bet)));
    }
    lines
}

/// JSON scalars as plain text: strings without quotes, null as `-`.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
