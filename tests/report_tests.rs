use rattendance::core::breaks::BreakLogic;
use rattendance::core::calculator::classifier::{BreakPolicy, UsageStatus};
use rattendance::core::report::{Period, ReportLogic, build_report};
use rattendance::core::session::SessionLogic;
use rattendance::models::{AttendanceSession, BreakRecord, BreakType, SessionStatus};

mod common;
use common::{at, memory_pool, mins};

fn closed_session(id: i64, employee: &str, start_h: u32, end_h: u32) -> AttendanceSession {
    AttendanceSession {
        id,
        employee_id: employee.into(),
        clock_in: at(start_h, 0),
        clock_out: Some(at(end_h, 0)),
        status: SessionStatus::Completed,
        total_hours: Some((end_h - start_h) as f64),
    }
}

fn fixture() -> (Vec<AttendanceSession>, Vec<BreakRecord>) {
    let sessions = vec![
        closed_session(1, "bob", 8, 12),
        closed_session(2, "alice", 9, 17),
        closed_session(3, "alice", 6, 8),
        AttendanceSession {
            id: 4,
            employee_id: "carol".into(),
            clock_in: at(10, 0),
            clock_out: None,
            status: SessionStatus::Active,
            total_hours: None,
        },
    ];
    let breaks = vec![
        BreakRecord {
            id: 10,
            session_id: 2,
            break_type: BreakType::Lunch,
            break_start: at(12, 0),
            break_end: Some(at(12, 45)),
        },
        BreakRecord {
            id: 11,
            session_id: 2,
            break_type: BreakType::Coffee,
            break_start: at(10, 0),
            break_end: Some(at(10, 20)),
        },
        BreakRecord {
            id: 12,
            session_id: 4,
            break_type: BreakType::Coffee,
            break_start: at(10, 30),
            break_end: None,
        },
    ];
    (sessions, breaks)
}

#[test]
fn groups_by_employee_in_order() {
    let (sessions, breaks) = fixture();
    let report = build_report(sessions, breaks, &BreakPolicy::default());

    let employees: Vec<&str> = report.iter().map(|r| r.employee_id.as_str()).collect();
    assert_eq!(employees, ["alice", "bob", "carol"]);

    let alice = &report[0];
    let ids: Vec<i64> = alice.sessions.iter().map(|s| s.session.id).collect();
    assert_eq!(ids, [3, 2]);
    assert_eq!(alice.total_hours, 10.0);
    assert_eq!(alice.in_progress, 0);
}

#[test]
fn input_order_does_not_change_the_report() {
    let (sessions, breaks) = fixture();
    let policy = BreakPolicy::default();
    let expected = build_report(sessions.clone(), breaks.clone(), &policy);

    let mut rev_sessions = sessions;
    rev_sessions.reverse();
    let mut rev_breaks = breaks;
    rev_breaks.reverse();

    assert_eq!(build_report(rev_sessions, rev_breaks, &policy), expected);
}

#[test]
fn breaks_are_attached_in_start_order_with_verdicts() {
    let (sessions, breaks) = fixture();
    let report = build_report(sessions, breaks, &BreakPolicy::default());

    let day = &report[0].sessions[1];
    let starts: Vec<i64> = day.breaks.iter().map(|b| b.id).collect();
    assert_eq!(starts, [11, 10]);
    assert_eq!(day.usage.lunch, mins(45));
    assert_eq!(day.usage.other, mins(20));
    assert_eq!(day.usage.status, UsageStatus::OverLimit);
}

#[test]
fn tallies_count_completed_breaks_only() {
    let (sessions, breaks) = fixture();
    let report = build_report(sessions, breaks, &BreakPolicy::default());

    let alice = &report[0];
    assert_eq!(alice.tallies[&BreakType::Lunch].count, 1);
    assert_eq!(alice.tallies[&BreakType::Lunch].minutes(), 45);
    assert_eq!(alice.tallies[&BreakType::Coffee].minutes(), 20);

    let carol = &report[2];
    assert!(carol.tallies.is_empty());
    assert_eq!(carol.in_progress, 1);
    assert_eq!(carol.total_hours, 0.0);
    assert!(carol.sessions[0].in_progress());
}

#[test]
fn empty_input_gives_empty_report() {
    assert!(build_report(Vec::new(), Vec::new(), &BreakPolicy::default()).is_empty());
}

#[test]
fn period_parsing() {
    assert_eq!(Period::parse("week").unwrap(), Period::Week);
    assert_eq!(Period::parse("MONTH").unwrap(), Period::Month);
    assert_eq!(Period::parse("all").unwrap(), Period::All);
    assert!(matches!(Period::parse("2026-03").unwrap(), Period::Range(_, _)));
    assert!(Period::parse("fortnight").is_err());
}

#[test]
fn period_bounds_filter_on_clock_in() {
    let mut pool = memory_pool();
    let policy = BreakPolicy::default();

    let s = SessionLogic::clock_in(&mut pool, "alice", at(9, 0)).unwrap();
    BreakLogic::start(&mut pool, s.id, BreakType::Coffee, at(10, 0)).unwrap();
    BreakLogic::end(&mut pool, s.id, at(10, 5)).unwrap();
    SessionLogic::clock_out(&mut pool, s.id, at(11, 0)).unwrap();
    SessionLogic::clock_in(&mut pool, "bob", at(9, 30)).unwrap();

    let all = ReportLogic::period(&mut pool, Period::All, None, at(12, 0), &policy).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].sessions[0].breaks.len(), 1);

    let week = ReportLogic::period(&mut pool, Period::Week, None, at(12, 0), &policy).unwrap();
    assert_eq!(week.len(), 2);

    let later = at(12, 0) + chrono::Duration::days(8);
    let none = ReportLogic::period(&mut pool, Period::Week, None, later, &policy).unwrap();
    assert!(none.is_empty());

    let only_bob = ReportLogic::period(&mut pool, Period::All, Some("bob"), at(12, 0), &policy).unwrap();
    assert_eq!(only_bob.len(), 1);
    assert_eq!(only_bob[0].in_progress, 1);
}
