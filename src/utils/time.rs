//! Time utilities: duration formatting and shift time labels.

use chrono::{DateTime, Local, TimeDelta};

/// Render a worked duration as `"2 hrs 5 min"`, `"1 hr 0 min"` or `"45 min"`.
/// Non-positive durations render as `"0 min"`.
pub fn format_duration(d: TimeDelta) -> String {
    if d <= TimeDelta::zero() {
        return "0 min".to_string();
    }

    let total_minutes = d.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        let unit = if hours == 1 { "hr" } else { "hrs" };
        format!("{hours} {unit} {minutes} min")
    } else {
        format!("{minutes} min")
    }
}

/// Clock label such as `9:05 AM`; `--:--` when the date is unknown.
pub fn time_label(dt: Option<&DateTime<Local>>) -> String {
    dt.map(|d| d.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Calendar label such as `Mar 10, 2026`; empty when the date is unknown.
pub fn date_label(dt: Option<&DateTime<Local>>) -> String {
    dt.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}
