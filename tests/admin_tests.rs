use predicates::str::contains;

mod common;
use common::{add_hours, bt, init_test_db, setup_test_db};

#[test]
fn test_db_check_reports_healthy_schema() {
    let db_path = setup_test_db("admin_check");
    init_test_db(&db_path);

    bt()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check: ok"))
        .stdout(contains("Schema check: all tables present"));
}

#[test]
fn test_db_migrate_is_idempotent() {
    let db_path = setup_test_db("admin_migrate");
    init_test_db(&db_path);

    bt()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migrations up to date."));

    bt()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success();
}

#[test]
fn test_db_info_lists_row_counts() {
    let db_path = setup_test_db("admin_info");
    init_test_db(&db_path);
    add_hours(&db_path, "2025-06-07", "8", "32");

    bt()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("hours"))
        .stdout(contains("mileage_raw"));
}

#[test]
fn test_internal_log_records_init() {
    let db_path = setup_test_db("admin_log");
    init_test_db(&db_path);

    bt()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("[init]"))
        .stdout(contains("Database initialized"));
}

#[test]
fn test_config_print_shows_yaml() {
    let db_path = setup_test_db("admin_config");
    init_test_db(&db_path);

    bt()
        .args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("pay_period_start:"))
        .stdout(contains("overtime_threshold:"));
}
