//! Break-usage classification against the configured policy limits.

use crate::models::BreakRecord;
use crate::utils::time::{sum_durations, whole_minutes};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How the three-tier verdict is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    /// `OverLimit` is checked before `Warning`, so anything above the
    /// combined limit is `OverLimit` and `Warning` never fires.
    #[default]
    Literal,
    /// `Warning` for combined usage in `(limit, warning]`, `OverLimit`
    /// above the warning threshold.
    Tiered,
}

/// Process-wide break limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPolicy {
    #[serde(default = "default_lunch_limit")]
    pub lunch_limit_minutes: i64,
    #[serde(default = "default_other_limit")]
    pub other_combined_limit_minutes: i64,
    #[serde(default = "default_other_warning")]
    pub other_warning_minutes: i64,
    #[serde(default)]
    pub classification: ClassificationMode,
}

fn default_lunch_limit() -> i64 {
    60
}
fn default_other_limit() -> i64 {
    15
}
fn default_other_warning() -> i64 {
    20
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            lunch_limit_minutes: default_lunch_limit(),
            other_combined_limit_minutes: default_other_limit(),
            other_warning_minutes: default_other_warning(),
            classification: ClassificationMode::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UsageStatus {
    #[serde(rename = "OK")]
    Ok,
    Warning,
    OverLimit,
}

impl UsageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageStatus::Ok => "OK",
            UsageStatus::Warning => "Warning",
            UsageStatus::OverLimit => "Over Limit",
        }
    }
}

/// Verdict for one session plus the totals it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakUsage {
    pub status: UsageStatus,
    pub lunch: Duration,
    pub other: Duration,
}

impl BreakUsage {
    pub fn lunch_minutes(&self) -> i64 {
        whole_minutes(self.lunch)
    }

    pub fn other_minutes(&self) -> i64 {
        whole_minutes(self.other)
    }
}

/// Classify the completed breaks of one session. Open breaks are ignored.
///
/// Limits are compared against the exact durations, so 60m00s of lunch is
/// within a 60 minute limit while 60m01s is not.
pub fn classify(breaks: &[BreakRecord], policy: &BreakPolicy) -> BreakUsage {
    let closed = || {
        breaks
            .iter()
            .filter_map(|b| b.break_end.map(|end| (b.break_type, end - b.break_start)))
    };

    let lunch = sum_durations(closed().filter(|(t, _)| t.is_lunch()).map(|(_, d)| d));
    let other = sum_durations(closed().filter(|(t, _)| !t.is_lunch()).map(|(_, d)| d));

    BreakUsage {
        status: status_for(lunch, other, policy),
        lunch,
        other,
    }
}

fn status_for(lunch: Duration, other: Duration, policy: &BreakPolicy) -> UsageStatus {
    let lunch_limit = Duration::minutes(policy.lunch_limit_minutes);
    let other_limit = Duration::minutes(policy.other_combined_limit_minutes);
    let other_warning = Duration::minutes(policy.other_warning_minutes);

    match policy.classification {
        ClassificationMode::Literal => {
            if lunch > lunch_limit || other > other_limit {
                UsageStatus::OverLimit
            } else if other > other_limit && other <= other_warning {
                // never taken: the branch above already covers other > limit
                UsageStatus::Warning
            } else {
                UsageStatus::Ok
            }
        }
        ClassificationMode::Tiered => {
            if lunch > lunch_limit || other > other_warning {
                UsageStatus::OverLimit
            } else if other > other_limit {
                UsageStatus::Warning
            } else {
                UsageStatus::Ok
            }
        }
    }
}
