use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ordered schema migrations: (version, SQL).
/// A version is applied once and recorded in `log` as `migration_applied`.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20260302_0001_create_attendance_sessions",
        r#"
        CREATE TABLE IF NOT EXISTS attendance_sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL,
            clock_in     TEXT NOT NULL,          -- RFC 3339, UTC
            clock_out    TEXT,                   -- NULL while active
            status       TEXT NOT NULL DEFAULT 'active'
                         CHECK (status IN ('active','completed','corrected')),
            total_hours  REAL,
            CHECK ((status = 'active') = (clock_out IS NULL)),
            CHECK (clock_out IS NULL OR clock_out > clock_in)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_employee_clock_in
            ON attendance_sessions(employee_id, clock_in);
        "#,
    ),
    (
        "20260302_0002_create_break_records",
        r#"
        CREATE TABLE IF NOT EXISTS break_records (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id   INTEGER NOT NULL
                         REFERENCES attendance_sessions(id) ON DELETE CASCADE,
            break_type   TEXT NOT NULL
                         CHECK (break_type IN ('lunch','coffee','bathroom','personal','other')),
            break_start  TEXT NOT NULL,
            break_end    TEXT,                   -- NULL while open
            CHECK (break_end IS NULL OR break_end > break_start)
        );

        CREATE INDEX IF NOT EXISTS idx_breaks_session_start
            ON break_records(session_id, break_start);
        "#,
    ),
    (
        "20260316_0003_single_active_session_guard",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS one_active_session_per_employee
            ON attendance_sessions(employee_id) WHERE status = 'active';
        "#,
    ),
    (
        "20260316_0004_single_open_break_guard",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS one_open_break_per_session
            ON break_records(session_id) WHERE break_end IS NULL;
        "#,
    ),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, version: &str, sql: &str) -> Result<()> {
    conn.execute_batch("BEGIN;")?;

    let result = conn.execute_batch(sql).and_then(|_| {
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![
                chrono::Local::now().to_rfc3339(),
                version,
                format!("Applied migration {}", version)
            ],
        )
    });

    match result {
        Ok(_) => conn.execute_batch("COMMIT;"),
        Err(e) => {
            conn.execute_batch("ROLLBACK;")?;
            Err(e)
        }
    }
}

/// Run every migration not yet recorded in `log`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }
        apply(conn, version, sql)?;
        success(format!("Migration applied: {}", version));
    }

    Ok(())
}
