#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rattendance::db::initialize::init_db;
use rattendance::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a config file naming `admins` as administrators; returns its path.
pub fn temp_config(name: &str, db_path: &str, admins: &[&str], extra: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.conf", name));
    let list = admins
        .iter()
        .map(|a| format!("  - {}\n", a))
        .collect::<String>();
    let yaml = format!(
        "database: {}\nadministrators:\n{}{}",
        db_path,
        if list.is_empty() { "  []\n".to_string() } else { list },
        extra
    );
    fs::write(&path, yaml).expect("write config");
    path.to_string_lossy().to_string()
}

/// Initialize a DB file via the CLI in test mode.
pub fn init_db_file(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh migrated in-memory database.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// 2026-03-02 at `h:m` UTC.
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
}

pub fn mins(m: i64) -> Duration {
    Duration::minutes(m)
}
