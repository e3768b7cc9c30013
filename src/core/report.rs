//! Read model: sessions grouped by employee over a period, with per-session
//! break verdicts and per-type break tallies. Never mutates anything.

use crate::core::calculator::classifier::{BreakPolicy, BreakUsage, classify};
use crate::db::pool::DbPool;
use crate::db::queries::{list_sessions, load_breaks_for_sessions};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceSession, BreakRecord, BreakType};
use crate::utils::date::parse_range;
use crate::utils::time::whole_minutes;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use std::collections::{BTreeMap, HashMap};

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Trailing 7 days from now.
    Week,
    /// Trailing 30 days from now.
    Month,
    /// Calendar days, inclusive, in local time.
    Range(NaiveDate, NaiveDate),
    All,
}

impl Period {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => {
                let (first, last) = parse_range(other)?;
                Ok(Period::Range(first, last))
            }
        }
    }

    /// `[from, to)` bounds on `clock_in`.
    pub fn bounds(&self, now: DateTime<Utc>) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        match self {
            Period::Week => Ok((Some(now - Duration::days(7)), None)),
            Period::Month => Ok((Some(now - Duration::days(30)), None)),
            Period::All => Ok((None, None)),
            Period::Range(first, last) => {
                let next = last
                    .succ_opt()
                    .ok_or_else(|| AppError::InvalidPeriod(last.to_string()))?;
                Ok((Some(local_midnight(*first)?), Some(local_midnight(next)?)))
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Period::Week => "last 7 days".to_string(),
            Period::Month => "last 30 days".to_string(),
            Period::All => "all time".to_string(),
            Period::Range(a, b) if a == b => a.to_string(),
            Period::Range(a, b) => format!("{} → {}", a, b),
        }
    }
}

fn local_midnight(d: NaiveDate) -> AppResult<DateTime<Utc>> {
    let naive = d
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidDate(d.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub session: AttendanceSession,
    /// Ascending by start.
    pub breaks: Vec<BreakRecord>,
    pub usage: BreakUsage,
}

impl SessionReport {
    pub fn in_progress(&self) -> bool {
        self.session.total_hours.is_none()
    }
}

/// Completed breaks of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakTally {
    pub count: usize,
    pub total: Duration,
}

impl Default for BreakTally {
    fn default() -> Self {
        Self {
            count: 0,
            total: Duration::zero(),
        }
    }
}

impl BreakTally {
    pub fn minutes(&self) -> i64 {
        whole_minutes(self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeReport {
    pub employee_id: String,
    /// Ascending by clock-in.
    pub sessions: Vec<SessionReport>,
    /// Sum over sessions with a computed `total_hours`.
    pub total_hours: f64,
    /// Sessions still active (no `total_hours` yet).
    pub in_progress: usize,
    pub tallies: BTreeMap<BreakType, BreakTally>,
}

/// Group `sessions` by employee and attach their breaks. Output order is
/// employee id, then clock-in, then id; input order does not matter.
pub fn build_report(
    mut sessions: Vec<AttendanceSession>,
    mut breaks: Vec<BreakRecord>,
    policy: &BreakPolicy,
) -> Vec<EmployeeReport> {
    sessions.sort_by(|a, b| {
        a.employee_id
            .cmp(&b.employee_id)
            .then(a.clock_in.cmp(&b.clock_in))
            .then(a.id.cmp(&b.id))
    });
    breaks.sort_by(|a, b| a.break_start.cmp(&b.break_start).then(a.id.cmp(&b.id)));

    let mut by_session: HashMap<i64, Vec<BreakRecord>> = HashMap::new();
    for b in breaks {
        by_session.entry(b.session_id).or_default().push(b);
    }

    let mut reports: Vec<EmployeeReport> = Vec::new();

    for session in sessions {
        let session_breaks = by_session.remove(&session.id).unwrap_or_default();
        let usage = classify(&session_breaks, policy);

        let needs_new = reports
            .last()
            .is_none_or(|r| r.employee_id != session.employee_id);
        if needs_new {
            reports.push(EmployeeReport {
                employee_id: session.employee_id.clone(),
                sessions: Vec::new(),
                total_hours: 0.0,
                in_progress: 0,
                tallies: BTreeMap::new(),
            });
        }

        let Some(report) = reports.last_mut() else {
            continue;
        };

        match session.total_hours {
            Some(h) => report.total_hours += h,
            None => report.in_progress += 1,
        }

        for b in &session_breaks {
            if let Some(end) = b.break_end {
                let tally = report.tallies.entry(b.break_type).or_default();
                tally.count += 1;
                tally.total += end - b.break_start;
            }
        }

        report.sessions.push(SessionReport {
            session,
            breaks: session_breaks,
            usage,
        });
    }

    reports
}

pub struct ReportLogic;

impl ReportLogic {
    /// Load and aggregate every session whose clock-in falls in `period`.
    pub fn period(
        pool: &mut DbPool,
        period: Period,
        employee: Option<&str>,
        now: DateTime<Utc>,
        policy: &BreakPolicy,
    ) -> AppResult<Vec<EmployeeReport>> {
        let (from, to) = period.bounds(now)?;
        let sessions = list_sessions(&pool.conn, from.as_ref(), to.as_ref(), employee)?;
        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        let breaks = load_breaks_for_sessions(&pool.conn, &ids)?;
        Ok(build_report(sessions, breaks, policy))
    }
}
