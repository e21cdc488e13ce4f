use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Import the queued SMS logfile through the aggregators.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, keep } = cmd {
        let path = file.clone().unwrap_or_else(|| cfg.logfile.clone());

        let mut pool = DbPool::new(&cfg.database)?;
        let report = ImportLogic::process_logfile(&mut pool, &path, *keep)?;

        success(format!(
            "Imported {} mileage and {} hours entries ({} skipped)",
            report.mileage, report.hours, report.skipped
        ));
        if report.cleared {
            info(format!("Logfile cleared: {}", path));
        }
    }
    Ok(())
}
