use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::serve::ServeLogic;
use crate::errors::AppResult;

/// Run the HTTP ingestion endpoint.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { addr } = cmd {
        ServeLogic::run(cfg, addr)?;
    }
    Ok(())
}
