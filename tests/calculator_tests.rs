use chrono::Duration;
use rattendance::core::calculator::classifier::{
    BreakPolicy, ClassificationMode, UsageStatus, classify,
};
use rattendance::core::calculator::elapsed::{
    break_duration, completed_break_time, open_break, total_hours, worked_duration,
};
use rattendance::models::{AttendanceSession, BreakRecord, BreakType, SessionStatus};

mod common;
use common::{at, mins};

fn session(clock_in: chrono::DateTime<chrono::Utc>) -> AttendanceSession {
    AttendanceSession {
        id: 1,
        employee_id: "alice".into(),
        clock_in,
        clock_out: None,
        status: SessionStatus::Active,
        total_hours: None,
    }
}

fn brk(
    id: i64,
    kind: BreakType,
    start: chrono::DateTime<chrono::Utc>,
    end: Option<chrono::DateTime<chrono::Utc>>,
) -> BreakRecord {
    BreakRecord {
        id,
        session_id: 1,
        break_type: kind,
        break_start: start,
        break_end: end,
    }
}

/// Closed breaks of the given lengths, laid out back to back from 10:00.
fn closed(parts: &[(BreakType, Duration)]) -> Vec<BreakRecord> {
    let mut cursor = at(10, 0);
    parts
        .iter()
        .enumerate()
        .map(|(i, (kind, len))| {
            let b = brk(i as i64 + 1, *kind, cursor, Some(cursor + *len));
            cursor += *len;
            b
        })
        .collect()
}

fn tiered() -> BreakPolicy {
    BreakPolicy {
        classification: ClassificationMode::Tiered,
        ..BreakPolicy::default()
    }
}

#[test]
fn open_break_is_not_subtracted_while_live() {
    let s = session(at(9, 0));
    let live = vec![brk(1, BreakType::Coffee, at(10, 0), None)];

    assert_eq!(worked_duration(&s, &live, at(10, 10)), mins(70));
    assert_eq!(break_duration(&live[0], at(10, 10)), mins(10));

    let ended = vec![brk(1, BreakType::Coffee, at(10, 0), Some(at(10, 10)))];
    assert_eq!(worked_duration(&s, &ended, at(10, 10)), mins(60));
}

#[test]
fn duration_queries_are_idempotent() {
    let s = session(at(9, 0));
    let breaks = vec![
        brk(1, BreakType::Lunch, at(12, 0), Some(at(12, 30))),
        brk(2, BreakType::Coffee, at(14, 0), None),
    ];

    let first = worked_duration(&s, &breaks, at(15, 0));
    for _ in 0..5 {
        assert_eq!(worked_duration(&s, &breaks, at(15, 0)), first);
        assert_eq!(break_duration(&breaks[1], at(15, 0)), mins(60));
    }
    assert_eq!(first, mins(6 * 60 - 30));
}

#[test]
fn worked_time_stops_at_clock_out() {
    let mut s = session(at(9, 0));
    s.clock_out = Some(at(17, 0));
    s.status = SessionStatus::Completed;

    assert_eq!(worked_duration(&s, &[], at(20, 0)), mins(8 * 60));
    assert_eq!(worked_duration(&s, &[], at(10, 0)), mins(60));
}

#[test]
fn worked_time_is_never_negative() {
    let s = session(at(9, 0));
    assert_eq!(worked_duration(&s, &[], at(8, 0)), Duration::zero());
}

#[test]
fn total_hours_matches_closed_form() {
    let s = session(at(9, 0));
    let breaks = closed(&[(BreakType::Lunch, mins(45))]);

    assert_eq!(total_hours(&s, &breaks, at(17, 0)), 7.25);
    assert_eq!(completed_break_time(&breaks), mins(45));
}

#[test]
fn finds_the_open_break() {
    let breaks = vec![
        brk(1, BreakType::Coffee, at(10, 0), Some(at(10, 5))),
        brk(2, BreakType::Personal, at(11, 0), None),
    ];
    assert_eq!(open_break(&breaks).map(|b| b.id), Some(2));
    assert!(open_break(&breaks[..1]).is_none());
}

#[test]
fn lunch_limit_is_inclusive() {
    let policy = BreakPolicy::default();

    let at_limit = classify(&closed(&[(BreakType::Lunch, mins(60))]), &policy);
    assert_eq!(at_limit.status, UsageStatus::Ok);
    assert_eq!(at_limit.lunch_minutes(), 60);

    let over = classify(&closed(&[(BreakType::Lunch, mins(61))]), &policy);
    assert_eq!(over.status, UsageStatus::OverLimit);
}

#[test]
fn limits_compare_exact_durations() {
    let policy = BreakPolicy::default();
    let breaks = closed(&[(BreakType::Lunch, mins(60) + Duration::seconds(1))]);

    let usage = classify(&breaks, &policy);
    assert_eq!(usage.lunch_minutes(), 60);
    assert_eq!(usage.status, UsageStatus::OverLimit);
}

#[test]
fn other_breaks_are_combined() {
    let policy = BreakPolicy::default();

    let within = classify(
        &closed(&[
            (BreakType::Coffee, mins(5)),
            (BreakType::Bathroom, mins(5)),
            (BreakType::Personal, mins(5)),
        ]),
        &policy,
    );
    assert_eq!(within.other_minutes(), 15);
    assert_eq!(within.status, UsageStatus::Ok);

    let over = classify(
        &closed(&[(BreakType::Coffee, mins(10)), (BreakType::Other, mins(6))]),
        &policy,
    );
    assert_eq!(over.other_minutes(), 16);
    assert_eq!(over.status, UsageStatus::OverLimit);
}

#[test]
fn literal_mode_never_warns() {
    let policy = BreakPolicy::default();
    for m in 16..=20 {
        let usage = classify(&closed(&[(BreakType::Coffee, mins(m))]), &policy);
        assert_eq!(usage.status, UsageStatus::OverLimit, "{m} minutes");
    }
}

#[test]
fn tiered_mode_warns_between_limit_and_threshold() {
    let policy = tiered();

    let cases = [
        (15, UsageStatus::Ok),
        (16, UsageStatus::Warning),
        (20, UsageStatus::Warning),
        (21, UsageStatus::OverLimit),
    ];
    for (m, expected) in cases {
        let usage = classify(&closed(&[(BreakType::Coffee, mins(m))]), &policy);
        assert_eq!(usage.status, expected, "{m} minutes");
    }

    let lunch = classify(&closed(&[(BreakType::Lunch, mins(61))]), &policy);
    assert_eq!(lunch.status, UsageStatus::OverLimit);
}

#[test]
fn open_breaks_do_not_count_toward_limits() {
    let policy = BreakPolicy::default();
    let breaks = vec![brk(1, BreakType::Lunch, at(12, 0), None)];

    let usage = classify(&breaks, &policy);
    assert_eq!(usage.lunch, Duration::zero());
    assert_eq!(usage.status, UsageStatus::Ok);
}

#[test]
fn status_labels() {
    assert_eq!(UsageStatus::Ok.as_str(), "OK");
    assert_eq!(UsageStatus::Warning.as_str(), "Warning");
    assert_eq!(UsageStatus::OverLimit.as_str(), "Over Limit");
}

#[test]
fn worked_time_before_clock_in_with_breaks_is_zero() {
    let s = session(at(9, 0));
    let breaks = closed(&[(BreakType::Coffee, mins(30))]);
    assert_eq!(worked_duration(&s, &breaks, at(9, 10)), Duration::zero());
}
