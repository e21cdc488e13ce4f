use predicates::str::contains;

mod common;
use common::{add_hours, bt, count, init_test_db, open, setup_test_db};

fn seed_two_weeks(db_path: &str) {
    // ISO week of 2025-06-02 (Mon): 44 h → 4 h overtime at the default
    // 40 h threshold. Week of 2025-06-09: 36 h → none.
    add_hours(db_path, "2025-06-02", "10", "10");
    add_hours(db_path, "2025-06-03", "10", "20");
    add_hours(db_path, "2025-06-04", "12", "32");
    add_hours(db_path, "2025-06-05", "12", "44");
    add_hours(db_path, "2025-06-09", "9", "9");
    add_hours(db_path, "2025-06-10", "9", "18");
    add_hours(db_path, "2025-06-11", "9", "27");
    add_hours(db_path, "2025-06-12", "9", "36");
}

#[test]
fn test_rollup_splits_regular_and_overtime() {
    let db_path = setup_test_db("rollup_split");
    init_test_db(&db_path);
    seed_two_weeks(&db_path);

    bt()
        .args(["--db", &db_path, "rollup", "--start", "2025-06-02", "--end", "2025-06-15"])
        .assert()
        .success()
        .stdout(contains("80.0 h total"))
        .stdout(contains("76.0 regular"))
        .stdout(contains("4.0 overtime"))
        .stdout(contains("8 worked days"));

    let conn = open(&db_path);
    assert_eq!(count(&conn, "pay_periods"), 1);
}

#[test]
fn test_rollup_upsert_is_idempotent_per_period() {
    let db_path = setup_test_db("rollup_idempotent");
    init_test_db(&db_path);
    seed_two_weeks(&db_path);

    let args = ["--db", &db_path, "rollup", "--start", "2025-06-02", "--end", "2025-06-15"];
    bt().args(args).assert().success();

    // A late hours submission lands in the same period; re-running the
    // rollup updates the existing row instead of adding one.
    add_hours(&db_path, "2025-06-13", "5", "41");

    bt()
        .args(args)
        .assert()
        .success()
        .stdout(contains("85.0 h total"))
        .stdout(contains("5.0 overtime"));

    let conn = open(&db_path);
    assert_eq!(count(&conn, "pay_periods"), 1);
    let total: f64 = conn
        .query_row(
            "SELECT total_hours FROM pay_periods WHERE period_start = '2025-06-02'",
            [],
            |row| row.get(0),
        )
        .expect("pay period row");
    assert!((total - 85.0).abs() < 1e-9);
}

#[test]
fn test_rollup_start_only_uses_configured_length() {
    let db_path = setup_test_db("rollup_default_len");
    init_test_db(&db_path);
    seed_two_weeks(&db_path);

    // Default pay_period_days is 14: 2025-06-02 → 2025-06-15.
    bt()
        .args(["--db", &db_path, "rollup", "--start", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("2025-06-02 → 2025-06-15"));
}

#[test]
fn test_rollup_rejects_inverted_period() {
    let db_path = setup_test_db("rollup_inverted");
    init_test_db(&db_path);

    bt()
        .args(["--db", &db_path, "rollup", "--start", "2025-06-15", "--end", "2025-06-02"])
        .assert()
        .failure()
        .stderr(contains("Invalid pay period"));

    let conn = open(&db_path);
    assert_eq!(count(&conn, "pay_periods"), 0);
}

#[test]
fn test_rollup_empty_period_is_all_zeroes() {
    let db_path = setup_test_db("rollup_empty");
    init_test_db(&db_path);

    bt()
        .args(["--db", &db_path, "rollup", "--start", "2025-01-06", "--end", "2025-01-19"])
        .assert()
        .success()
        .stdout(contains("0.0 h total"))
        .stdout(contains("0 worked days"));
}
