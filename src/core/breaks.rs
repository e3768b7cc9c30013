use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_break, find_open_break, insert_break, is_unique_violation, load_breaks, load_session,
};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceSession, BreakRecord, BreakType};
use crate::utils::time::storage_precision;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Break sub-session transitions. Persists records only; durations and
/// verdicts live in `core::calculator`.
pub struct BreakLogic;

impl BreakLogic {
    /// Open a break of `kind` on an active session.
    pub fn start(
        pool: &mut DbPool,
        session_id: i64,
        kind: BreakType,
        at: DateTime<Utc>,
    ) -> AppResult<BreakRecord> {
        let at = storage_precision(at);
        let tx = pool.immediate()?;

        let session = require_session(&tx, session_id)?;
        if !session.status.is_active() {
            return Err(AppError::SessionNotActive(session_id));
        }

        if at < session.clock_in {
            return Err(AppError::InvalidTime(format!(
                "Break cannot start at {} before clock-in at {}.",
                at, session.clock_in
            )));
        }

        let breaks = load_breaks(&tx, session_id)?;
        if let Some(open) = breaks.iter().find(|b| b.is_open()) {
            return Err(AppError::BreakAlreadyOpen {
                session: session_id,
                open_break: open.id,
            });
        }

        if let Some(last_end) = breaks.iter().filter_map(|b| b.break_end).max()
            && at < last_end
        {
            return Err(AppError::InvalidTime(format!(
                "Break cannot start at {} before the previous break ended at {}.",
                at, last_end
            )));
        }

        let id = match insert_break(&tx, session_id, kind, &at) {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => {
                let open_break = find_open_break(&tx, session_id)?.map_or(0, |b| b.id);
                return Err(AppError::BreakAlreadyOpen {
                    session: session_id,
                    open_break,
                });
            }
            Err(e) => return Err(e.into()),
        };

        ttlog(
            &tx,
            "break_start",
            &format!("session #{}", session_id),
            &format!("{} break #{} started at {}", kind.label(), id, at),
        )?;
        tx.commit()?;

        Ok(BreakRecord {
            id,
            session_id,
            break_type: kind,
            break_start: at,
            break_end: None,
        })
    }

    /// Close the open break of a session.
    pub fn end(pool: &mut DbPool, session_id: i64, at: DateTime<Utc>) -> AppResult<BreakRecord> {
        let at = storage_precision(at);
        let tx = pool.immediate()?;

        require_session(&tx, session_id)?;
        let closed = end_open_break(&tx, session_id, at)?.ok_or(AppError::NoOpenBreak(session_id))?;

        tx.commit()?;
        Ok(closed)
    }
}

pub(crate) fn require_session(conn: &Connection, session_id: i64) -> AppResult<AttendanceSession> {
    load_session(conn, session_id)?.ok_or(AppError::SessionNotFound(session_id))
}

/// Finalize the open break of `session_id` at `at`, if there is one.
/// Runs on the caller's transaction.
pub(crate) fn end_open_break(
    conn: &Connection,
    session_id: i64,
    at: DateTime<Utc>,
) -> AppResult<Option<BreakRecord>> {
    let Some(mut open) = find_open_break(conn, session_id)? else {
        return Ok(None);
    };

    if at <= open.break_start {
        return Err(AppError::InvalidTime(format!(
            "Break #{} cannot end at {}: it started at {}.",
            open.id, at, open.break_start
        )));
    }

    if close_break(conn, open.id, &at)? == 0 {
        return Err(AppError::NoOpenBreak(session_id));
    }
    open.break_end = Some(at);

    ttlog(
        conn,
        "break_end",
        &format!("session #{}", session_id),
        &format!(
            "{} break #{} ended at {}",
            open.break_type.label(),
            open.id,
            at
        ),
    )?;

    Ok(Some(open))
}
