use super::session_status::SessionStatus;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSession {
    pub id: i64,
    pub employee_id: String,           // ⇔ attendance_sessions.employee_id
    pub clock_in: DateTime<Utc>,       // ⇔ clock_in (RFC 3339, immutable except corrections)
    pub clock_out: Option<DateTime<Utc>>, // NULL while the session is open
    pub status: SessionStatus,
    pub total_hours: Option<f64>, // computed at close, full precision
}

impl AttendanceSession {
    pub fn clock_in_local(&self) -> DateTime<Local> {
        self.clock_in.with_timezone(&Local)
    }

    pub fn clock_out_local(&self) -> Option<DateTime<Local>> {
        self.clock_out.map(|t| t.with_timezone(&Local))
    }

    /// `total_hours` rounded to two decimals, for display only.
    pub fn total_hours_display(&self) -> Option<f64> {
        self.total_hours.map(|h| (h * 100.0).round() / 100.0)
    }
}
