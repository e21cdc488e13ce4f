#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn bt() -> Command {
    cargo_bin_cmd!("biztrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_biztrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema for a test DB (test mode: no config file update)
pub fn init_test_db(db_path: &str) {
    bt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn open(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}

pub fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count rows")
}

/// Record one mileage reading via the CLI.
pub fn add_mileage(db_path: &str, name: &str, date: &str, position: &str, distance: &str) {
    bt()
        .args(["--db", db_path, "mileage", name, date, position, distance])
        .assert()
        .success();
}

/// Record one hours report via the CLI.
pub fn add_hours(db_path: &str, date: &str, today: &str, week: &str) {
    bt()
        .args(["--db", db_path, "hours", date, today, week])
        .assert()
        .success();
}

pub fn total_miles(conn: &rusqlite::Connection, name: &str, date: &str) -> Option<f64> {
    conn.query_row(
        "SELECT total_miles FROM mileage_summary WHERE name = ?1 AND date = ?2",
        rusqlite::params![name, date],
        |row| row.get(0),
    )
    .ok()
}
