use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mileage::{MileageLogic, MileageOutcome};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::entry::MileageInput;
use crate::ui::messages::{info, success};

/// Record one odometer reading.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mileage {
        name,
        date,
        position,
        distance,
    } = cmd
    {
        let input = MileageInput {
            id: None,
            name: name.clone(),
            date: date.clone(),
            position: position.clone(),
            distance: *distance,
            received_at: None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let outcome = MileageLogic::record(&mut pool, input)?;

        match outcome {
            MileageOutcome::Finalized(s) => success(format!(
                "Mileage for {} on {}: {:.1} miles",
                s.name,
                s.date_str(),
                s.total_miles
            )),
            MileageOutcome::Provisional(s) => info(format!(
                "Mileage for {} on {}: {:.1} miles so far (no end reading yet)",
                s.name,
                s.date_str(),
                s.total_miles
            )),
            MileageOutcome::Pending => {
                info(format!("Reading saved for {} on {}; waiting for more readings", name, date))
            }
        }
    }
    Ok(())
}
