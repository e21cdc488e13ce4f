use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{check_schema, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::queries::table_counts;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use std::fs;

/// Manage the database: explicit migrations, integrity check, info.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { migrate, check, info: show_info } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations up to date.");
        }

        if *check {
            let integrity: String =
                pool.conn
                    .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if integrity == "ok" {
                success("Integrity check: ok");
            } else {
                error(format!("Integrity check failed: {}", integrity));
            }

            let missing = check_schema(&pool.conn)?;
            if missing.is_empty() {
                success("Schema check: all tables present");
            } else {
                error(format!("Missing tables: {}", missing.join(", ")));
            }
        }

        if *show_info {
            let size = fs::metadata(&cfg.database).map(|m| m.len()).unwrap_or(0);
            info(format!(
                "Database {} ({:.2} MB)",
                cfg.database,
                (size as f64) / (1024.0 * 1024.0)
            ));
            for (table, count) in table_counts(&pool.conn)? {
                println!("  {:16} {:>8} rows", table, count);
            }
        }
    }
    Ok(())
}
