//! Batch importer for the queued SMS logfile.
//!
//! One JSON entry per line, same wire format as the HTTP endpoint.
//! Entries are applied sequentially through the same aggregators.
//! Malformed or invalid lines are skipped with a warning and do not
//! block the batch; a storage failure aborts the batch and leaves the
//! logfile untouched. The file is truncated only after every ingestible
//! line has been durably committed.

use crate::core::hours::HoursLogic;
use crate::core::mileage::MileageLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::LogEntry;
use crate::ui::messages::warning;
use chrono::Local;
use std::fs;
use std::path::Path;

#[derive(Debug, Default)]
pub struct ImportReport {
    pub mileage: usize,
    pub hours: usize,
    pub skipped: usize,
    pub cleared: bool,
}

impl ImportReport {
    pub fn processed(&self) -> usize {
        self.mileage + self.hours
    }
}

/// Rejected input or a duplicate delivery: log and move on.
/// Anything else is a storage failure and aborts the batch.
fn is_skippable(e: &AppError) -> bool {
    e.is_validation() || matches!(e, AppError::Conflict(_))
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn process_logfile(pool: &mut DbPool, path: &str, keep: bool) -> AppResult<ImportReport> {
        let mut report = ImportReport::default();

        if !Path::new(path).exists() {
            warning(format!("Logfile not found: {}", path));
            return Ok(report);
        }

        let content = fs::read_to_string(path)?;
        let now = Local::now().to_rfc3339();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut entry = match LogEntry::from_json(line) {
                Ok(e) => e,
                Err(e) => {
                    warning(format!("Skipped malformed line {}: {}", lineno + 1, e));
                    report.skipped += 1;
                    continue;
                }
            };
            entry.stamp_received(&now);

            let result = match entry {
                LogEntry::Mileage(m) => MileageLogic::record(pool, m).map(|_| {
                    report.mileage += 1;
                }),
                LogEntry::Hours(h) => HoursLogic::record(pool, &h).map(|_| {
                    report.hours += 1;
                }),
            };

            match result {
                Ok(()) => {}
                Err(e) if is_skippable(&e) => {
                    warning(format!("Skipped line {}: {}", lineno + 1, e));
                    report.skipped += 1;
                }
                // Storage failure: abort without clearing the logfile so
                // no entry is lost; the batch can be replayed.
                Err(e) => return Err(AppError::Import(format!("line {}: {}", lineno + 1, e))),
            }
        }

        if !keep {
            fs::write(path, "")?;
            report.cleared = true;
        }

        let msg = format!(
            "Imported {} mileage and {} hours entries ({} skipped)",
            report.mileage, report.hours, report.skipped
        );
        if let Err(e) = ttlog(&pool.conn, "import", path, &msg) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(report)
    }
}
