use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;

/// Show mileage and hours summaries.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { name, date, days } = cmd {
        let date = match date {
            Some(s) => Some(parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        ReportLogic::print(&mut pool, name.as_deref(), date.as_ref(), *days)?;
    }
    Ok(())
}
