//! Time utilities: "now" sampling, timestamp codecs, duration arithmetic and formatting.

use crate::errors::{AppError, AppResult};
use chrono::{
    DateTime, Duration, Local, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc,
};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to milliseconds (the storage precision).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        storage_precision(Utc::now())
    }
}

/// Truncate to the millisecond precision timestamps are stored with.
/// Checks and arithmetic must run on this value, not the raw input.
pub fn storage_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Clock pinned to one instant (`--at`, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Encode a timestamp for the DB. The fixed-width form keeps lexical
/// order equal to chronological order.
pub fn to_db_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn from_db_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a local "YYYY-MM-DD HH:MM" (or "YYYY-MM-DD HH:MM:SS") instant.
pub fn parse_local_datetime(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTime(s.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(format!("{} does not exist in local time", s)))
}

pub fn parse_optional_datetime(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(|s| parse_local_datetime(s)).transpose()
}

/// Whole minutes, truncated toward zero.
pub fn whole_minutes(d: Duration) -> i64 {
    d.num_minutes()
}

/// Fractional hours at millisecond precision.
pub fn hours(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 3_600_000.0
}

pub fn sum_durations<I: IntoIterator<Item = Duration>>(items: I) -> Duration {
    items.into_iter().fold(Duration::zero(), |acc, d| acc + d)
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// "HH:MM:SS" counter, as shown by the live view.
pub fn format_clock(d: Duration) -> String {
    let sign = if d < Duration::zero() { "-" } else { "" };
    let secs = d.num_seconds().abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Local "YYYY-MM-DD HH:MM" rendering of a stored instant.
pub fn fmt_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Local "HH:MM" rendering of a stored instant.
pub fn fmt_local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}
