pub mod breaks;
pub mod clock;
pub mod config;
pub mod correct;
pub mod delete;
pub mod export;
pub mod init;
pub mod log;
pub mod report;
pub mod status;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Caller;
use crate::utils::time::{Clock, SystemClock, parse_local_datetime};
use chrono::{DateTime, Utc};
use std::env;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Resolve the acting employee: `--user`, else the OS user name.
pub(crate) fn resolve_caller(cli: &Cli, cfg: &Config) -> AppResult<Caller> {
    let id = cli
        .user
        .clone()
        .or_else(|| env::var("USER").ok())
        .or_else(|| env::var("USERNAME").ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Config("cannot determine the employee: pass --user".into()))?;

    Ok(Caller {
        is_admin: cfg.is_admin(&id),
        employee_id: id,
    })
}

/// The instant a command acts at: `--at` if given, else the wall clock.
pub(crate) fn now(cli: &Cli) -> AppResult<DateTime<Utc>> {
    match &cli.at {
        Some(s) => parse_local_datetime(s),
        None => Ok(SystemClock.now()),
    }
}
