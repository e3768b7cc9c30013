//! Live and closed-form duration queries over a session and its breaks.
//!
//! Every function here is pure: same records and same `now` give the same
//! result, so they are safe to call on every tick.

use crate::models::{AttendanceSession, BreakRecord};
use crate::utils::time::{hours, sum_durations};
use chrono::{DateTime, Duration, Utc};

/// Elapsed length of one break: `now - start` while open, `end - start`
/// once closed.
pub fn break_duration(record: &BreakRecord, now: DateTime<Utc>) -> Duration {
    record.break_end.unwrap_or(now) - record.break_start
}

/// Sum of the breaks that have ended. Open breaks contribute nothing.
pub fn completed_break_time(breaks: &[BreakRecord]) -> Duration {
    sum_durations(
        breaks
            .iter()
            .filter_map(|b| b.break_end.map(|end| end - b.break_start)),
    )
}

/// Worked time so far:
/// `(min(now, clock_out ?? now) - clock_in) - Σ completed breaks`.
///
/// An open break is not subtracted: the live counter keeps running until
/// the break ends, then drops back by the break length.
///
/// Unlike the bare formula, the result is floored at zero: an instant
/// before `clock_in` reports no work rather than a negative duration.
pub fn worked_duration(
    session: &AttendanceSession,
    breaks: &[BreakRecord],
    now: DateTime<Utc>,
) -> Duration {
    let end = match session.clock_out {
        Some(out) => out.min(now),
        None => now,
    };

    let worked = (end - session.clock_in) - completed_break_time(breaks);
    worked.max(Duration::zero())
}

/// Closed-form `total_hours` of a session evaluated at `clock_out`.
pub fn total_hours(
    session: &AttendanceSession,
    breaks: &[BreakRecord],
    clock_out: DateTime<Utc>,
) -> f64 {
    hours(worked_duration(session, breaks, clock_out))
}

/// The currently open break, if any.
pub fn open_break(breaks: &[BreakRecord]) -> Option<&BreakRecord> {
    breaks.iter().find(|b| b.is_open())
}
