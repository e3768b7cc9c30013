//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Persistence
    // ---------------------------
    #[error("Persistence failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid break type: {0}")]
    InvalidBreakType(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Session / break invariants
    // ---------------------------
    #[error("Employee '{employee}' is already clocked in (session #{session})")]
    AlreadyClockedIn { employee: String, session: i64 },

    #[error("Session #{session} is {found}, expected {expected}")]
    InvalidState {
        session: i64,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Session #{0} is not active")]
    SessionNotActive(i64),

    #[error("Session #{session} already has an open break (#{open_break})")]
    BreakAlreadyOpen { session: i64, open_break: i64 },

    #[error("Session #{0} has no open break")]
    NoOpenBreak(i64),

    #[error("Session #{0} not found")]
    SessionNotFound(i64),

    #[error("No active session for employee '{0}'")]
    NoActiveSession(String),

    #[error("Employee '{0}' is not an administrator")]
    NotAuthorized(String),

    #[error("Invalid correction: {0}")]
    InvalidCorrection(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
