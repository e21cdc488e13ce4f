//! Pay-period rollup over the daily hours table.
//!
//! Reads every hours row inside the period window under one transaction
//! (consistent snapshot, no partial-write visibility) and upserts the
//! aggregate keyed by (period_start, period_end). Overtime is whatever
//! exceeds the weekly threshold, computed per ISO week.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{get_pay_period, load_hours_range, upsert_pay_period};
use crate::errors::{AppError, AppResult};
use crate::models::hours::HoursEntry;
use crate::models::payperiod::PayPeriodSummary;
use crate::utils::date::{iso_week_key, parse_date};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq)]
struct HoursSplit {
    total: f64,
    regular: f64,
    overtime: f64,
    days_worked: i64,
}

pub struct RollupLogic;

impl RollupLogic {
    /// The period containing `today`: the configured anchor advanced by
    /// whole period lengths. Days before the anchor fall into the first
    /// period.
    pub fn current_period(cfg: &Config, today: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
        let anchor = parse_date(&cfg.pay_period_start)
            .ok_or_else(|| AppError::Config(format!("bad pay_period_start: {}", cfg.pay_period_start)))?;
        let len = cfg.pay_period_days;
        if len <= 0 {
            return Err(AppError::InvalidPeriod(format!(
                "pay_period_days must be positive, got {}",
                len
            )));
        }

        let elapsed = (today - anchor).num_days();
        let periods = if elapsed >= 0 { elapsed / len } else { 0 };
        let start = anchor + Duration::days(periods * len);
        Ok((start, start + Duration::days(len - 1)))
    }

    pub fn run(
        pool: &mut DbPool,
        start: &NaiveDate,
        end: &NaiveDate,
        overtime_threshold: f64,
    ) -> AppResult<PayPeriodSummary> {
        if end < start {
            return Err(AppError::InvalidPeriod(format!(
                "period end {} before start {}",
                end, start
            )));
        }

        let tx = pool.conn.transaction()?;

        let rows = load_hours_range(&tx, start, end)?;
        let split = split_hours(&rows, overtime_threshold);

        upsert_pay_period(
            &tx,
            start,
            end,
            split.total,
            split.regular,
            split.overtime,
            split.days_worked,
        )?;

        let summary = get_pay_period(&tx, start, end)?
            .ok_or_else(|| AppError::Other("pay period row missing after upsert".into()))?;

        tx.commit()?;
        Ok(summary)
    }
}

fn split_hours(rows: &[HoursEntry], threshold: f64) -> HoursSplit {
    let mut weeks: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    let mut total = 0.0;
    let mut days_worked = 0;

    for row in rows {
        total += row.hours_today;
        if row.hours_today > 0.0 {
            days_worked += 1;
        }
        *weeks.entry(iso_week_key(&row.date)).or_insert(0.0) += row.hours_today;
    }

    let overtime: f64 = weeks.values().map(|w| (w - threshold).max(0.0)).sum();

    HoursSplit {
        total,
        regular: total - overtime,
        overtime,
        days_worked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use uuid::Uuid;

    fn entry(date: &str, hours: f64) -> HoursEntry {
        HoursEntry {
            id: Uuid::new_v4().to_string(),
            date: parse_date(date).unwrap(),
            hours_today: hours,
            hours_week: 0.0,
            received_at: Local::now().to_rfc3339(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    #[test]
    fn overtime_splits_per_iso_week() {
        // Week of 2025-06-02 (Mon): 44h → 4h overtime.
        // Week of 2025-06-09: 36h → none.
        let rows = vec![
            entry("2025-06-02", 10.0),
            entry("2025-06-03", 10.0),
            entry("2025-06-04", 12.0),
            entry("2025-06-05", 12.0),
            entry("2025-06-09", 9.0),
            entry("2025-06-10", 9.0),
            entry("2025-06-11", 9.0),
            entry("2025-06-12", 9.0),
        ];
        let split = split_hours(&rows, 40.0);
        assert!((split.total - 80.0).abs() < 1e-9);
        assert!((split.overtime - 4.0).abs() < 1e-9);
        assert!((split.regular - 76.0).abs() < 1e-9);
        assert_eq!(split.days_worked, 8);
    }

    #[test]
    fn zero_hour_days_are_not_worked() {
        let rows = vec![entry("2025-06-02", 8.0), entry("2025-06-03", 0.0)];
        let split = split_hours(&rows, 40.0);
        assert_eq!(split.days_worked, 1);
        assert!((split.overtime - 0.0).abs() < 1e-9);
    }

    #[test]
    fn empty_period_rolls_up_to_zero() {
        let split = split_hours(&[], 40.0);
        assert_eq!(
            split,
            HoursSplit {
                total: 0.0,
                regular: 0.0,
                overtime: 0.0,
                days_worked: 0
            }
        );
    }

    #[test]
    fn current_period_advances_from_anchor() {
        let cfg = Config {
            pay_period_start: "2025-05-19".into(),
            pay_period_days: 14,
            ..Config::default()
        };
        let (start, end) =
            RollupLogic::current_period(&cfg, parse_date("2025-06-07").unwrap()).unwrap();
        assert_eq!(start, parse_date("2025-06-02").unwrap());
        assert_eq!(end, parse_date("2025-06-15").unwrap());

        // Before the anchor: first period.
        let (start, _) =
            RollupLogic::current_period(&cfg, parse_date("2025-05-01").unwrap()).unwrap();
        assert_eq!(start, parse_date("2025-05-19").unwrap());
    }
}
