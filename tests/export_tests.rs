use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_file, rti, setup_test_db, temp_config, temp_out};

fn seed(name: &str) -> (String, String) {
    let db = setup_test_db(name);
    let conf = temp_config(name, &db, &[], "");
    init_db_file(&db);

    let steps: [(&str, &[&str]); 6] = [
        ("2026-03-02 09:00", &["in"]),
        ("2026-03-02 10:00", &["break", "start", "coffee"]),
        ("2026-03-02 10:20", &["break", "end"]),
        ("2026-03-02 12:00", &["break", "start", "lunch"]),
        ("2026-03-02 12:30", &["break", "end"]),
        ("2026-03-02 17:00", &["out"]),
    ];
    for (when, args) in steps {
        rti()
            .args(["--db", &db, "--config", &conf, "--user", "alice", "--at", when])
            .args(args)
            .assert()
            .success();
    }
    (db, conf)
}

#[test]
fn export_csv_writes_one_row_per_session() {
    let (db, conf) = seed("export_csv");
    let out = temp_out("export_csv", "csv");

    rti()
        .args(["--db", &db, "--config", &conf, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("employee"));
    assert!(header.contains("break_status"));

    let row = lines.next().unwrap();
    assert!(row.contains("alice"));
    assert!(row.contains("7.17"));
    assert!(row.contains("Over Limit"));
    assert!(lines.next().is_none());
}

#[test]
fn export_json_is_parseable() {
    let (db, conf) = seed("export_json");
    let out = temp_out("export_json", "json");

    rti()
        .args(["--db", &db, "--config", &conf, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee"], "alice");
    assert_eq!(rows[0]["lunch_minutes"], 30);
    assert_eq!(rows[0]["other_minutes"], 20);
    assert_eq!(rows[0]["breaks"], 2);
}

#[test]
fn export_requires_absolute_path() {
    let (db, conf) = seed("export_relative");

    rti()
        .args(["--db", &db, "--config", &conf, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn export_existing_file_needs_force() {
    let (db, conf) = seed("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").unwrap();

    rti()
        .args(["--db", &db, "--config", &conf, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    rti()
        .args(["--db", &db, "--config", &conf, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("alice"));
}

#[test]
fn export_empty_period_writes_nothing() {
    let (db, conf) = seed("export_empty");
    let out = temp_out("export_empty", "csv");

    rti()
        .args(["--db", &db, "--config", &conf, "export", "--file", &out, "--period", "2020"])
        .assert()
        .success()
        .stdout(contains("No sessions found"));
    assert!(!std::path::Path::new(&out).exists());
}
