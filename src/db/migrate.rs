use rusqlite::{Connection, OptionalExtension, Result};

/// Check if a table exists in the connected database.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Ensure that the internal `log` table exists.
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

/// Raw odometer readings, append-only. Multiple rows may share a
/// (name, date) key; totals are recomputed from all of them.
fn ensure_mileage_raw_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS mileage_raw (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            date        TEXT NOT NULL,
            position    TEXT NOT NULL CHECK(position IN ('start','mid','end')),
            distance    REAL NOT NULL CHECK(distance >= 0),
            received_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mileage_raw_name_date ON mileage_raw(name, date);
        "#,
    )?;
    Ok(())
}

/// Derived per-(name, date) totals, upserted on every recompute.
fn ensure_mileage_summary_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS mileage_summary (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            date        TEXT NOT NULL,
            total_miles REAL NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            UNIQUE(name, date)
        );
        "#,
    )?;
    Ok(())
}

/// Daily hours reports, one row per calendar date.
fn ensure_hours_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS hours (
            id          TEXT PRIMARY KEY,
            date        TEXT NOT NULL UNIQUE,
            hours_today REAL NOT NULL CHECK(hours_today >= 0),
            hours_week  REAL NOT NULL CHECK(hours_week >= 0),
            received_at TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Pay-period rollups, one row per (period_start, period_end).
fn ensure_pay_periods_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pay_periods (
            id             TEXT PRIMARY KEY,
            period_start   TEXT NOT NULL,
            period_end     TEXT NOT NULL,
            total_hours    REAL NOT NULL,
            regular_hours  REAL NOT NULL,
            overtime_hours REAL NOT NULL,
            days_worked    INTEGER NOT NULL,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            UNIQUE(period_start, period_end)
        );
        "#,
    )?;
    Ok(())
}

/// Read-only reporting projection joining summaries with their raw rows.
/// Convenience only, never a source of truth.
fn ensure_mileage_report_view(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE VIEW IF NOT EXISTS mileage_report AS
        SELECT
            s.name                                                   AS name,
            s.date                                                   AS date,
            s.total_miles                                            AS total_miles,
            COUNT(r.id)                                              AS entry_count,
            MIN(CASE WHEN r.position = 'start' THEN r.distance END)  AS start_reading,
            MAX(CASE WHEN r.position = 'end'   THEN r.distance END)  AS end_reading
        FROM mileage_summary s
        JOIN mileage_raw r ON r.name = s.name AND r.date = s.date
        GROUP BY s.name, s.date;
        "#,
    )?;
    Ok(())
}

/// Run all pending schema migrations. Idempotent: safe to call on an
/// already up-to-date database.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_mileage_raw_table(conn)?;
    ensure_mileage_summary_table(conn)?;
    ensure_hours_table(conn)?;
    ensure_pay_periods_table(conn)?;
    ensure_mileage_report_view(conn)?;
    Ok(())
}

/// Quick structural check used by `db --check`.
pub fn check_schema(conn: &Connection) -> Result<Vec<String>> {
    let mut missing = Vec::new();
    for table in ["log", "mileage_raw", "mileage_summary", "hours", "pay_periods"] {
        if !table_exists(conn, table)? {
            missing.push(table.to_string());
        }
    }
    Ok(missing)
}
