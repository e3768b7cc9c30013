// src/export/model.rs

use crate::core::report::SessionReport;
use serde::Serialize;

/// Flat row per session, shared by the CSV and JSON writers.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionExport {
    pub id: i64,
    pub employee: String,
    pub clock_in: String,
    pub clock_out: String,
    pub status: String,
    pub total_hours: Option<f64>,
    pub breaks: usize,
    pub lunch_minutes: i64,
    pub other_minutes: i64,
    pub break_status: String,
}

impl From<&SessionReport> for SessionExport {
    fn from(r: &SessionReport) -> Self {
        let s = &r.session;
        Self {
            id: s.id,
            employee: s.employee_id.clone(),
            clock_in: s.clock_in_local().to_rfc3339(),
            clock_out: s
                .clock_out_local()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            status: s.status.to_db_str().to_string(),
            total_hours: s.total_hours_display(),
            breaks: r.breaks.len(),
            lunch_minutes: r.usage.lunch_minutes(),
            other_minutes: r.usage.other_minutes(),
            break_status: r.usage.status.as_str().to_string(),
        }
    }
}
