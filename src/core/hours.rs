//! Hours aggregation: one authoritative row per calendar date.

use crate::db::pool::DbPool;
use crate::db::queries::{get_hours_by_date, upsert_hours_entry};
use crate::errors::{AppError, AppResult};
use crate::models::entry::HoursInput;
use crate::models::hours::HoursEntry;
use chrono::Local;

pub struct HoursLogic;

impl HoursLogic {
    /// Insert-or-replace the daily hours report. An SMS resubmission for
    /// the same date overwrites the previous values instead of stacking;
    /// the single-statement upsert is atomic on its own.
    pub fn record(pool: &mut DbPool, input: &HoursInput) -> AppResult<HoursEntry> {
        let date = input.validate()?;

        let received_at = input
            .received_at
            .clone()
            .unwrap_or_else(|| Local::now().to_rfc3339());

        upsert_hours_entry(
            &pool.conn,
            &date,
            input.hours_today,
            input.hours_week,
            &received_at,
        )?;

        get_hours_by_date(&pool.conn, &date)?
            .ok_or_else(|| AppError::Other("hours row missing after upsert".into()))
    }
}
