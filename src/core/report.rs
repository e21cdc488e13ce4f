//! Read-only reporting over the `mileage_report` view and recent hours.
//! A convenience projection for answering SMS queries, never a source
//! of truth.

use crate::db::pool::DbPool;
use crate::db::queries::{load_hours_range, load_mileage_report};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::{days_back, today};
use chrono::NaiveDate;

pub struct ReportLogic;

impl ReportLogic {
    /// Print mileage summaries (with per-day entry counts and start/end
    /// odometer readings) plus recent hours rows. With no explicit date
    /// filter the window is the last `days` days.
    pub fn print(
        pool: &mut DbPool,
        name: Option<&str>,
        date: Option<&NaiveDate>,
        days: i64,
    ) -> AppResult<()> {
        let since = if date.is_none() { Some(days_back(days)) } else { None };

        let rows = load_mileage_report(&pool.conn, name, date, since.as_ref())?;

        info("Mileage");
        if rows.is_empty() {
            println!("  (no summaries in range)");
        }
        for r in &rows {
            let start = r
                .start_reading
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "-".to_string());
            let end = r
                .end_reading
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {}  {}  total {:.1} mi  (readings: {}, start {}, end {})",
                r.date, r.name, r.total_miles, r.entry_count, start, end
            );
        }

        let range_start = match (date, since) {
            (Some(d), _) => *d,
            (None, Some(s)) => s,
            (None, None) => days_back(days),
        };
        let range_end = date.copied().unwrap_or_else(today);
        let hours = load_hours_range(&pool.conn, &range_start, &range_end)?;

        info("Hours");
        if hours.is_empty() {
            println!("  (no entries in range)");
        }
        for h in &hours {
            println!(
                "  {}  today {:.1} h  week {:.1} h",
                h.date_str(),
                h.hours_today,
                h.hours_week
            );
        }

        Ok(())
    }
}
