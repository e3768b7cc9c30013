/// ANSI color helper utilities for terminal output.
use crate::core::calculator::classifier::UsageStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// OK → green, Warning → yellow, Over Limit → red
pub fn color_for_usage(status: UsageStatus) -> &'static str {
    match status {
        UsageStatus::Ok => GREEN,
        UsageStatus::Warning => YELLOW,
        UsageStatus::OverLimit => RED,
    }
}

pub fn badge(status: UsageStatus) -> String {
    format!("{}{}{}", color_for_usage(status), status.as_str(), RESET)
}

/// Grey out placeholders such as "--:--" or an empty cell.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
