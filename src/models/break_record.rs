use super::break_type::BreakType;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakRecord {
    pub id: i64,
    pub session_id: i64,
    pub break_type: BreakType,
    pub break_start: DateTime<Utc>,
    pub break_end: Option<DateTime<Utc>>, // NULL while the break is open
}

impl BreakRecord {
    pub fn is_open(&self) -> bool {
        self.break_end.is_none()
    }
}
