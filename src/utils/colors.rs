/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Reliability color: ≥90% green, ≥70% yellow, otherwise red.
pub fn color_for_reliability(percent: u32) -> &'static str {
    if percent >= 90 {
        GREEN
    } else if percent >= 70 {
        YELLOW
    } else {
        RED
    }
}

/// Colorize an attendance status label: green when checked in, grey when
/// the operator never checked in today, reset otherwise.
pub fn colorize_status(label: &str, checked_in: bool) -> String {
    if checked_in {
        format!("{GREEN}{label}{RESET}")
    } else if label.trim().is_empty() || label.trim() == "--" {
        format!("{GREY}{label}{RESET}")
    } else {
        label.to_string()
    }
}

/// Grey out empty-looking values (`--:--`, `0 min`, blanks).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "0 min" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
