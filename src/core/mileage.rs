//! Mileage aggregation.
//!
//! Every accepted reading is appended to `mileage_raw`, then the
//! per-(name, date) total is recomputed from scratch out of all raw rows
//! for that key and upserted into `mileage_summary`. Duplicate SMS
//! deliveries resolve deterministically: the earliest `start` (minimum
//! distance) and the latest `end` (maximum distance) win.

use crate::db::pool::DbPool;
use crate::db::queries::{
    get_mileage_summary, insert_reading, load_readings_for_key, upsert_mileage_summary,
};
use crate::errors::{AppError, AppResult};
use crate::models::entry::MileageInput;
use crate::models::mileage::{MileageReading, MileageSummary};
use rusqlite::TransactionBehavior;

/// Result of recording one reading.
#[derive(Debug)]
pub enum MileageOutcome {
    /// A start and an end reading exist: total = max(end) − min(start).
    Finalized(MileageSummary),
    /// No end reading yet: total estimated as max(mid) − min(start).
    Provisional(MileageSummary),
    /// Not enough readings to compute a positive total; no summary row.
    Pending,
}

#[derive(Debug, PartialEq)]
struct ComputedTotal {
    total: f64,
    finalized: bool,
}

/// High-level business logic for recording mileage readings.
pub struct MileageLogic;

impl MileageLogic {
    /// Validate, append the raw reading and recompute the summary for
    /// its (name, date) key, all inside one IMMEDIATE transaction so
    /// concurrent writers of the same key serialize (no lost update).
    pub fn record(pool: &mut DbPool, input: MileageInput) -> AppResult<MileageOutcome> {
        // Validation happens before any write.
        let reading = input.validate()?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        insert_reading(&tx, &reading).map_err(|e| duplicate_to_conflict(e, &reading))?;

        let readings = load_readings_for_key(&tx, &reading.name, &reading.date)?;
        let computed = compute_total(&readings);

        if let Some(ct) = &computed {
            upsert_mileage_summary(&tx, &reading.name, &reading.date, ct.total)?;
        }

        let outcome = match computed {
            None => MileageOutcome::Pending,
            Some(ct) => {
                let summary = get_mileage_summary(&tx, &reading.name, &reading.date)?
                    .ok_or_else(|| AppError::Other("summary row missing after upsert".into()))?;
                if ct.finalized {
                    MileageOutcome::Finalized(summary)
                } else {
                    MileageOutcome::Provisional(summary)
                }
            }
        };

        tx.commit()?;
        Ok(outcome)
    }
}

/// Recompute the daily total from all raw rows of one key.
///
/// Policy:
/// - total = max(end distances) − min(start distances) when both exist;
/// - without an end reading, a provisional max(mid) − min(start);
/// - a summary exists only when the computed total is > 0, so a lone
///   start (or readings that move backwards) leave the key pending.
fn compute_total(readings: &[MileageReading]) -> Option<ComputedTotal> {
    let min_start = readings
        .iter()
        .filter(|r| r.position.is_start())
        .map(|r| r.distance)
        .reduce(f64::min)?;

    let max_end = readings
        .iter()
        .filter(|r| r.position.is_end())
        .map(|r| r.distance)
        .reduce(f64::max);

    if let Some(end) = max_end {
        let total = end - min_start;
        return (total > 0.0).then_some(ComputedTotal {
            total,
            finalized: true,
        });
    }

    let max_mid = readings
        .iter()
        .filter(|r| !r.position.is_start() && !r.position.is_end())
        .map(|r| r.distance)
        .reduce(f64::max)?;

    let total = max_mid - min_start;
    (total > 0.0).then_some(ComputedTotal {
        total,
        finalized: false,
    })
}

/// A replayed reading id violates the raw-table primary key. Surface it
/// as a conflict so callers can skip the duplicate delivery.
fn duplicate_to_conflict(e: AppError, reading: &MileageReading) -> AppError {
    match e {
        AppError::Db(rusqlite::Error::SqliteFailure(f, _))
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::Conflict(format!(
                "mileage reading {} for {} on {} was already recorded",
                reading.id,
                reading.name,
                reading.date_str()
            ))
        }
        other => other,
    }
}
