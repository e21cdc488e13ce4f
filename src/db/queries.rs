use crate::errors::{AppError, AppResult};
use crate::models::hours::HoursEntry;
use crate::models::mileage::{MileageReading, MileageSummary};
use crate::models::payperiod::PayPeriodSummary;
use crate::models::position::Position;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use uuid::Uuid;

// ---------------------------------------------------------------
// mileage_raw
// ---------------------------------------------------------------

/// Append one raw odometer reading. The table is an audit trail:
/// rows are never updated or deleted.
pub fn insert_reading(conn: &Connection, r: &MileageReading) -> AppResult<()> {
    conn.execute(
        "INSERT INTO mileage_raw (id, name, date, position, distance, received_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            r.id,
            r.name,
            r.date_str(),
            r.position.to_db_str(),
            r.distance,
            r.received_at,
        ],
    )?;
    Ok(())
}

pub fn map_reading_row(row: &Row) -> Result<MileageReading> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let pos_str: String = row.get("position")?;
    let position = Position::from_db_str(&pos_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidPosition(pos_str.clone())),
        )
    })?;

    Ok(MileageReading {
        id: row.get("id")?,
        name: row.get("name")?,
        date,
        position,
        distance: row.get("distance")?,
        received_at: row.get("received_at")?,
    })
}

/// All raw readings for one (name, date) key, in arrival order.
pub fn load_readings_for_key(
    conn: &Connection,
    name: &str,
    date: &NaiveDate,
) -> AppResult<Vec<MileageReading>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM mileage_raw
         WHERE name = ?1 AND date = ?2
         ORDER BY received_at ASC",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map(params![name, date_str], map_reading_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// mileage_summary
// ---------------------------------------------------------------

pub fn map_summary_row(row: &Row) -> Result<MileageSummary> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(MileageSummary {
        id: row.get("id")?,
        name: row.get("name")?,
        date,
        total_miles: row.get("total_miles")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Insert-or-replace the summary for (name, date). The existing row's
/// id and created_at survive a replacement; only the total and
/// updated_at move.
pub fn upsert_mileage_summary(
    conn: &Connection,
    name: &str,
    date: &NaiveDate,
    total_miles: f64,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO mileage_summary (id, name, date, total_miles, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         ON CONFLICT(name, date) DO UPDATE SET
             total_miles = excluded.total_miles,
             updated_at  = excluded.updated_at",
        params![
            Uuid::new_v4().to_string(),
            name,
            date.format("%Y-%m-%d").to_string(),
            total_miles,
            now,
        ],
    )?;
    Ok(())
}

pub fn get_mileage_summary(
    conn: &Connection,
    name: &str,
    date: &NaiveDate,
) -> AppResult<Option<MileageSummary>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM mileage_summary WHERE name = ?1 AND date = ?2",
    )?;
    let summary = stmt
        .query_row(
            params![name, date.format("%Y-%m-%d").to_string()],
            map_summary_row,
        )
        .optional()?;
    Ok(summary)
}

// ---------------------------------------------------------------
// hours
// ---------------------------------------------------------------

pub fn map_hours_row(row: &Row) -> Result<HoursEntry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(HoursEntry {
        id: row.get("id")?,
        date,
        hours_today: row.get("hours_today")?,
        hours_week: row.get("hours_week")?,
        received_at: row.get("received_at")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert-or-replace the hours row for a date. The newest submission is
/// authoritative; id and created_at of an existing row are preserved.
pub fn upsert_hours_entry(
    conn: &Connection,
    date: &NaiveDate,
    hours_today: f64,
    hours_week: f64,
    received_at: &str,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO hours (id, date, hours_today, hours_week, received_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(date) DO UPDATE SET
             hours_today = excluded.hours_today,
             hours_week  = excluded.hours_week,
             received_at = excluded.received_at",
        params![
            Uuid::new_v4().to_string(),
            date.format("%Y-%m-%d").to_string(),
            hours_today,
            hours_week,
            received_at,
            now,
        ],
    )?;
    Ok(())
}

pub fn get_hours_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Option<HoursEntry>> {
    let mut stmt = conn.prepare("SELECT * FROM hours WHERE date = ?1")?;
    let entry = stmt
        .query_row([date.format("%Y-%m-%d").to_string()], map_hours_row)
        .optional()?;
    Ok(entry)
}

/// Hours rows inside an inclusive date range, oldest first.
pub fn load_hours_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<HoursEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM hours
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        map_hours_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// pay_periods
// ---------------------------------------------------------------

pub fn map_pay_period_row(row: &Row) -> Result<PayPeriodSummary> {
    let parse = |s: String| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s)),
            )
        })
    };

    Ok(PayPeriodSummary {
        id: row.get("id")?,
        period_start: parse(row.get("period_start")?)?,
        period_end: parse(row.get("period_end")?)?,
        total_hours: row.get("total_hours")?,
        regular_hours: row.get("regular_hours")?,
        overtime_hours: row.get("overtime_hours")?,
        days_worked: row.get("days_worked")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Insert-or-replace the rollup for one (period_start, period_end) pair.
#[allow(clippy::too_many_arguments)]
pub fn upsert_pay_period(
    conn: &Connection,
    period_start: &NaiveDate,
    period_end: &NaiveDate,
    total_hours: f64,
    regular_hours: f64,
    overtime_hours: f64,
    days_worked: i64,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO pay_periods
             (id, period_start, period_end, total_hours, regular_hours,
              overtime_hours, days_worked, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
         ON CONFLICT(period_start, period_end) DO UPDATE SET
             total_hours    = excluded.total_hours,
             regular_hours  = excluded.regular_hours,
             overtime_hours = excluded.overtime_hours,
             days_worked    = excluded.days_worked,
             updated_at     = excluded.updated_at",
        params![
            Uuid::new_v4().to_string(),
            period_start.format("%Y-%m-%d").to_string(),
            period_end.format("%Y-%m-%d").to_string(),
            total_hours,
            regular_hours,
            overtime_hours,
            days_worked,
            now,
        ],
    )?;
    Ok(())
}

pub fn get_pay_period(
    conn: &Connection,
    period_start: &NaiveDate,
    period_end: &NaiveDate,
) -> AppResult<Option<PayPeriodSummary>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM pay_periods WHERE period_start = ?1 AND period_end = ?2",
    )?;
    let summary = stmt
        .query_row(
            params![
                period_start.format("%Y-%m-%d").to_string(),
                period_end.format("%Y-%m-%d").to_string(),
            ],
            map_pay_period_row,
        )
        .optional()?;
    Ok(summary)
}

// ---------------------------------------------------------------
// mileage_report view
// ---------------------------------------------------------------

/// One row of the read-only reporting projection.
#[derive(Debug, Clone)]
pub struct MileageReportRow {
    pub name: String,
    pub date: String,
    pub total_miles: f64,
    pub entry_count: i64,
    pub start_reading: Option<f64>,
    pub end_reading: Option<f64>,
}

/// Query the `mileage_report` view with optional name/date filters and
/// an optional inclusive lower bound on the date.
pub fn load_mileage_report(
    conn: &Connection,
    name: Option<&str>,
    date: Option<&NaiveDate>,
    since: Option<&NaiveDate>,
) -> AppResult<Vec<MileageReportRow>> {
    let mut sql = String::from(
        "SELECT name, date, total_miles, entry_count, start_reading, end_reading
         FROM mileage_report WHERE 1=1",
    );
    let mut bound: Vec<String> = Vec::new();

    if let Some(n) = name {
        sql.push_str(" AND name = ?");
        bound.push(n.to_string());
    }
    if let Some(d) = date {
        sql.push_str(" AND date = ?");
        bound.push(d.format("%Y-%m-%d").to_string());
    }
    if let Some(s) = since {
        sql.push_str(" AND date >= ?");
        bound.push(s.format("%Y-%m-%d").to_string());
    }
    sql.push_str(" ORDER BY date DESC, name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(bound.iter()), |row| {
        Ok(MileageReportRow {
            name: row.get(0)?,
            date: row.get(1)?,
            total_miles: row.get(2)?,
            entry_count: row.get(3)?,
            start_reading: row.get(4)?,
            end_reading: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// db --info
// ---------------------------------------------------------------

/// Row counts per table, used by `db --info`.
pub fn table_counts(conn: &Connection) -> Result<Vec<(&'static str, i64)>> {
    let mut out = Vec::new();
    for table in ["mileage_raw", "mileage_summary", "hours", "pay_periods", "log"] {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        out.push((table, count));
    }
    Ok(out)
}
