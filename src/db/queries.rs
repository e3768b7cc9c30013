use crate::errors::AppError;
use crate::models::{AttendanceSession, BreakRecord, BreakType, SessionStatus};
use crate::utils::time::{from_db_ts, to_db_ts};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

const SESSION_COLUMNS: &str = "id, employee_id, clock_in, clock_out, status, total_hours";
const BREAK_COLUMNS: &str = "id, session_id, break_type, break_start, break_end";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn get_ts(row: &Row, col: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    let idx = row.as_ref().column_index(col)?;
    from_db_ts(&raw).ok_or_else(|| conversion_error(idx, AppError::InvalidTime(raw)))
}

fn get_opt_ts(row: &Row, col: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    let idx = row.as_ref().column_index(col)?;
    raw.map(|s| from_db_ts(&s).ok_or_else(|| conversion_error(idx, AppError::InvalidTime(s))))
        .transpose()
}

pub fn map_session(row: &Row) -> Result<AttendanceSession> {
    let status_str: String = row.get("status")?;
    let status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            4,
            AppError::Other(format!("Invalid session status: {}", status_str)),
        )
    })?;

    Ok(AttendanceSession {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        clock_in: get_ts(row, "clock_in")?,
        clock_out: get_opt_ts(row, "clock_out")?,
        status,
        total_hours: row.get("total_hours")?,
    })
}

pub fn map_break(row: &Row) -> Result<BreakRecord> {
    let kind_str: String = row.get("break_type")?;
    let break_type = BreakType::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidBreakType(kind_str)))?;

    Ok(BreakRecord {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        break_type,
        break_start: get_ts(row, "break_start")?,
        break_end: get_opt_ts(row, "break_end")?,
    })
}

/// True when `err` comes from a UNIQUE constraint (the partial indexes
/// guarding one active session / one open break).
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

// ---------------------------------------------------------------------------
// attendance_sessions
// ---------------------------------------------------------------------------

pub fn insert_session(conn: &Connection, employee: &str, clock_in: &DateTime<Utc>) -> Result<i64> {
    conn.execute(
        "INSERT INTO attendance_sessions (employee_id, clock_in, status)
         VALUES (?1, ?2, 'active')",
        params![employee, to_db_ts(clock_in)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_session(conn: &Connection, id: i64) -> Result<Option<AttendanceSession>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM attendance_sessions WHERE id = ?1");
    conn.query_row(&sql, [id], map_session).optional()
}

pub fn find_active_session(conn: &Connection, employee: &str) -> Result<Option<AttendanceSession>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM attendance_sessions
         WHERE employee_id = ?1 AND status = 'active'"
    );
    conn.query_row(&sql, [employee], map_session).optional()
}

/// Persist clock-out / correction fields of a session.
pub fn update_session(conn: &Connection, s: &AttendanceSession) -> Result<usize> {
    conn.execute(
        "UPDATE attendance_sessions
         SET clock_in = ?1, clock_out = ?2, status = ?3, total_hours = ?4
         WHERE id = ?5",
        params![
            to_db_ts(&s.clock_in),
            s.clock_out.as_ref().map(to_db_ts),
            s.status.to_db_str(),
            s.total_hours,
            s.id,
        ],
    )
}

/// Sessions with `clock_in` in `[from, to)`, optionally for one employee,
/// ordered by employee, clock-in and id.
pub fn list_sessions(
    conn: &Connection,
    from: Option<&DateTime<Utc>>,
    to: Option<&DateTime<Utc>>,
    employee: Option<&str>,
) -> Result<Vec<AttendanceSession>> {
    let mut sql = format!("SELECT {SESSION_COLUMNS} FROM attendance_sessions");
    let mut conditions: Vec<&str> = Vec::new();
    let mut owned: Vec<String> = Vec::new();

    if let Some(f) = from {
        conditions.push("clock_in >= ?");
        owned.push(to_db_ts(f));
    }
    if let Some(t) = to {
        conditions.push("clock_in < ?");
        owned.push(to_db_ts(t));
    }
    if let Some(e) = employee {
        conditions.push("employee_id = ?");
        owned.push(e.to_string());
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY employee_id ASC, clock_in ASC, id ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let param_refs: Vec<&dyn ToSql> = owned.iter().map(|s| s as &dyn ToSql).collect();
    let rows = stmt.query_map(param_refs.as_slice(), map_session)?;
    rows.collect()
}

/// Delete a session; its breaks go with it (ON DELETE CASCADE).
pub fn delete_session(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM attendance_sessions WHERE id = ?1", [id])
}

// ---------------------------------------------------------------------------
// break_records
// ---------------------------------------------------------------------------

pub fn insert_break(
    conn: &Connection,
    session_id: i64,
    kind: BreakType,
    start: &DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO break_records (session_id, break_type, break_start)
         VALUES (?1, ?2, ?3)",
        params![session_id, kind.to_db_str(), to_db_ts(start)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_open_break(conn: &Connection, session_id: i64) -> Result<Option<BreakRecord>> {
    let sql = format!(
        "SELECT {BREAK_COLUMNS} FROM break_records
         WHERE session_id = ?1 AND break_end IS NULL"
    );
    conn.query_row(&sql, [session_id], map_break).optional()
}

/// Set `break_end` on a still-open record. Returns affected rows (0 if it
/// was already closed).
pub fn close_break(conn: &Connection, break_id: i64, end: &DateTime<Utc>) -> Result<usize> {
    conn.execute(
        "UPDATE break_records SET break_end = ?1
         WHERE id = ?2 AND break_end IS NULL",
        params![to_db_ts(end), break_id],
    )
}

/// Breaks of one session, ascending by start.
pub fn load_breaks(conn: &Connection, session_id: i64) -> Result<Vec<BreakRecord>> {
    let sql = format!(
        "SELECT {BREAK_COLUMNS} FROM break_records
         WHERE session_id = ?1
         ORDER BY break_start ASC, id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([session_id], map_break)?;
    rows.collect()
}

/// Breaks for a set of sessions, ascending by (session, start).
pub fn load_breaks_for_sessions(conn: &Connection, ids: &[i64]) -> Result<Vec<BreakRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(",");
    let sql = format!(
        "SELECT {BREAK_COLUMNS} FROM break_records
         WHERE session_id IN ({placeholders})
         ORDER BY session_id ASC, break_start ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), map_break)?;
    rows.collect()
}
