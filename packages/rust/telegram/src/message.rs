//! Notification message composition.

use chrono::{DateTime, Utc};

use guidewatch_shared::Summary;

/// Build the notification body for a run summary.
///
/// Target-year hits take precedence, then fetch errors, then a no-update
/// line. The result is never empty.
pub fn build_message(summary: &Summary) -> String {
    let target = summary.target_year;
    let mut lines: Vec<String> = Vec::new();

    if !summary.target_year_hits.is_empty() {
        lines.push(format!("[OU IST] Detected {target}年度 募集要項"));
        for item in &summary.target_year_hits {
            lines.push(format!("- {}: {}", item.text, item.url));
        }
    } else if !summary.fetch_errors.is_empty() {
        lines.push("[OU IST] Check failed (fetch error)".to_string());
        for err in &summary.fetch_errors {
            lines.push(format!("- {err}"));
        }
    } else {
        lines.push(format!("[OU IST] No update for {target}年度"));
    }

    lines.join("\n")
}

/// Append the heartbeat line.
///
/// Callers apply this only when there are no hits and no errors and
/// heartbeat mode is on. The timestamp is injected for testability.
pub fn append_heartbeat(message: &str, now: DateTime<Utc>) -> String {
    let ts = now.format("%Y-%m-%d %H:%M UTC");
    format!("{message}\n- heartbeat: workflow is running ({ts})")
}
