use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::hours::HoursLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::entry::HoursInput;
use crate::ui::messages::success;

/// Record (or overwrite) the daily hours report.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Hours {
        date,
        hours_today,
        hours_week,
    } = cmd
    {
        let input = HoursInput {
            id: None,
            date: date.clone(),
            hours_today: *hours_today,
            hours_week: *hours_week,
            received_at: None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let entry = HoursLogic::record(&mut pool, &input)?;

        success(format!(
            "Hours for {}: {:.1} today, {:.1} this week",
            entry.date_str(),
            entry.hours_today,
            entry.hours_week
        ));
    }
    Ok(())
}
