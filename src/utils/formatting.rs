//! Formatting utilities used for CLI and export outputs.

use crate::models::BreakType;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Label and ANSI colour for a break type.
pub fn describe_break(kind: BreakType) -> (&'static str, &'static str) {
    match kind {
        BreakType::Lunch => (kind.label(), "\x1b[33m"),
        BreakType::Coffee => (kind.label(), "\x1b[36m"),
        BreakType::Bathroom => (kind.label(), "\x1b[34m"),
        BreakType::Personal => (kind.label(), "\x1b[35m"),
        BreakType::Other => (kind.label(), "\x1b[37m"),
    }
}
