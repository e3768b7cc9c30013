use crate::core::breaks::{end_open_break, require_session};
use crate::core::calculator::elapsed;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_session, find_active_session, insert_session, is_unique_violation, load_breaks,
    update_session,
};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceSession, BreakRecord, Caller, SessionStatus};
use crate::utils::time::storage_precision;
use chrono::{DateTime, Utc};

/// Administrative override of a closed session's times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correction {
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
}

impl Correction {
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none()
    }
}

/// Clock-in / clock-out lifecycle of attendance sessions.
pub struct SessionLogic;

impl SessionLogic {
    /// Open a new session. An employee has at most one active session.
    pub fn clock_in(
        pool: &mut DbPool,
        employee: &str,
        at: DateTime<Utc>,
    ) -> AppResult<AttendanceSession> {
        let employee = employee.trim();
        if employee.is_empty() {
            return Err(AppError::Other("Employee id must not be empty.".into()));
        }
        let at = storage_precision(at);

        let tx = pool.immediate()?;

        if let Some(active) = find_active_session(&tx, employee)? {
            return Err(AppError::AlreadyClockedIn {
                employee: employee.to_string(),
                session: active.id,
            });
        }

        let id = match insert_session(&tx, employee, &at) {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => {
                let session = find_active_session(&tx, employee)?.map_or(0, |s| s.id);
                return Err(AppError::AlreadyClockedIn {
                    employee: employee.to_string(),
                    session,
                });
            }
            Err(e) => return Err(e.into()),
        };

        ttlog(
            &tx,
            "clock_in",
            employee,
            &format!("Session #{} opened at {}", id, at),
        )?;
        tx.commit()?;

        Ok(AttendanceSession {
            id,
            employee_id: employee.to_string(),
            clock_in: at,
            clock_out: None,
            status: SessionStatus::Active,
            total_hours: None,
        })
    }

    /// Close an active session. An open break is ended at `at` first, then
    /// `total_hours` is computed from the completed breaks.
    pub fn clock_out(
        pool: &mut DbPool,
        session_id: i64,
        at: DateTime<Utc>,
    ) -> AppResult<(AttendanceSession, Vec<BreakRecord>)> {
        let at = storage_precision(at);
        let tx = pool.immediate()?;

        let mut session = require_session(&tx, session_id)?;
        if !session.status.is_active() {
            return Err(AppError::InvalidState {
                session: session_id,
                expected: SessionStatus::Active.to_db_str(),
                found: session.status.to_db_str(),
            });
        }

        if at <= session.clock_in {
            return Err(AppError::InvalidTime(format!(
                "Clock-out at {} must be after clock-in at {}.",
                at, session.clock_in
            )));
        }

        let ended_late = load_breaks(&tx, session_id)?
            .into_iter()
            .find(|b| b.break_end.is_some_and(|end| end > at));
        if let Some(b) = ended_late {
            return Err(AppError::InvalidTime(format!(
                "Clock-out at {} precedes the end of break #{}.",
                at, b.id
            )));
        }

        end_open_break(&tx, session_id, at)?;
        let breaks = load_breaks(&tx, session_id)?;

        session.clock_out = Some(at);
        session.status = SessionStatus::Completed;
        session.total_hours = Some(elapsed::total_hours(&session, &breaks, at));
        update_session(&tx, &session)?;

        ttlog(
            &tx,
            "clock_out",
            &session.employee_id,
            &format!(
                "Session #{} closed at {} ({:.2} h)",
                session.id,
                at,
                session.total_hours.unwrap_or_default()
            ),
        )?;
        tx.commit()?;

        Ok((session, breaks))
    }

    /// Administrative correction of a closed session. The caller must be an
    /// administrator; the session ends up `Corrected`.
    pub fn correct(
        pool: &mut DbPool,
        caller: &Caller,
        session_id: i64,
        patch: &Correction,
    ) -> AppResult<AttendanceSession> {
        if !caller.is_admin {
            return Err(AppError::NotAuthorized(caller.employee_id.clone()));
        }
        if patch.is_empty() {
            return Err(AppError::InvalidCorrection(
                "nothing to change: give a new clock-in and/or clock-out".into(),
            ));
        }

        let tx = pool.immediate()?;

        let mut session = require_session(&tx, session_id)?;
        if session.status.is_active() {
            return Err(AppError::InvalidState {
                session: session_id,
                expected: SessionStatus::Completed.to_db_str(),
                found: session.status.to_db_str(),
            });
        }

        let clock_in = patch.clock_in.map_or(session.clock_in, storage_precision);
        let clock_out = match patch.clock_out.map(storage_precision).or(session.clock_out) {
            Some(out) => out,
            None => return Err(AppError::Other(format!("Session #{} has no clock-out", session_id))),
        };

        if clock_out <= clock_in {
            return Err(AppError::InvalidCorrection(format!(
                "clock-out {} must be after clock-in {}",
                clock_out, clock_in
            )));
        }

        let breaks = load_breaks(&tx, session_id)?;
        for b in &breaks {
            let end = b.break_end.unwrap_or(b.break_start);
            if b.break_start < clock_in || end > clock_out {
                return Err(AppError::InvalidCorrection(format!(
                    "break #{} ({} - {}) falls outside {} - {}",
                    b.id, b.break_start, end, clock_in, clock_out
                )));
            }
        }

        session.clock_in = clock_in;
        session.clock_out = Some(clock_out);
        session.status = SessionStatus::Corrected;
        session.total_hours = Some(elapsed::total_hours(&session, &breaks, clock_out));
        update_session(&tx, &session)?;

        ttlog(
            &tx,
            "correct",
            &session.employee_id,
            &format!(
                "Session #{} corrected by {}: {} - {}",
                session.id, caller.employee_id, clock_in, clock_out
            ),
        )?;
        tx.commit()?;

        Ok(session)
    }

    /// Remove a session and, through the cascade, its breaks.
    pub fn delete(pool: &mut DbPool, caller: &Caller, session_id: i64) -> AppResult<()> {
        if !caller.is_admin {
            return Err(AppError::NotAuthorized(caller.employee_id.clone()));
        }

        let tx = pool.immediate()?;
        let session = require_session(&tx, session_id)?;
        delete_session(&tx, session_id)?;

        ttlog(
            &tx,
            "delete",
            &session.employee_id,
            &format!("Session #{} deleted by {}", session_id, caller.employee_id),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// The active session of `employee`, with its breaks.
    pub fn active_for(
        pool: &mut DbPool,
        employee: &str,
    ) -> AppResult<Option<(AttendanceSession, Vec<BreakRecord>)>> {
        match find_active_session(&pool.conn, employee)? {
            Some(session) => {
                let breaks = load_breaks(&pool.conn, session.id)?;
                Ok(Some((session, breaks)))
            }
            None => Ok(None),
        }
    }

    /// A session by id, with its breaks.
    pub fn load(pool: &mut DbPool, session_id: i64) -> AppResult<(AttendanceSession, Vec<BreakRecord>)> {
        let session = require_session(&pool.conn, session_id)?;
        let breaks = load_breaks(&pool.conn, session_id)?;
        Ok((session, breaks))
    }
}
