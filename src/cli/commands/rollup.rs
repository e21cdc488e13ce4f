use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::rollup::RollupLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date::{parse_date, today};
use chrono::Duration;

/// Aggregate hours into a pay-period summary.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rollup { start, end } = cmd {
        let (period_start, period_end) = match (start, end) {
            (None, None) => RollupLogic::current_period(cfg, today())?,
            (Some(s), None) => {
                let d = parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?;
                (d, d + Duration::days(cfg.pay_period_days - 1))
            }
            (Some(s), Some(e)) => (
                parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                parse_date(e).ok_or_else(|| AppError::InvalidDate(e.clone()))?,
            ),
            (None, Some(e)) => {
                return Err(AppError::InvalidPeriod(format!(
                    "--end {} given without --start",
                    e
                )));
            }
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let summary =
            RollupLogic::run(&mut pool, &period_start, &period_end, cfg.overtime_threshold)?;

        success(format!(
            "Pay period {} → {}: {:.1} h total ({:.1} regular, {:.1} overtime) over {} worked days",
            summary.period_start,
            summary.period_end,
            summary.total_hours,
            summary.regular_hours,
            summary.overtime_hours,
            summary.days_worked
        ));

        if let Err(e) = ttlog(
            &pool.conn,
            "rollup",
            &format!("{}:{}", summary.period_start, summary.period_end),
            &format!("Rolled up {:.1} hours", summary.total_hours),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
    Ok(())
}
