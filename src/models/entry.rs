//! Wire format for ingested entries.
//!
//! Both the HTTP endpoint and the batch importer speak the same JSON
//! shape: an object with a `type` discriminator ("mileage" or "hours")
//! plus the type-specific fields. Validation happens here, before any
//! write, so a rejected entry never touches the database.

use crate::errors::{AppError, AppResult};
use crate::models::mileage::MileageReading;
use crate::models::position::Position;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry as it arrives from the SMS ingester or the queued logfile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogEntry {
    Mileage(MileageInput),
    Hours(HoursInput),
}

impl LogEntry {
    /// Parse a single logfile line / request body.
    pub fn from_json(s: &str) -> AppResult<Self> {
        serde_json::from_str(s).map_err(|e| AppError::MalformedEntry(e.to_string()))
    }

    /// Stamp `received_at` with `now` unless the source already set it.
    pub fn stamp_received(&mut self, now: &str) {
        match self {
            LogEntry::Mileage(m) if m.received_at.is_none() => {
                m.received_at = Some(now.to_string());
            }
            LogEntry::Hours(h) if h.received_at.is_none() => {
                h.received_at = Some(now.to_string());
            }
            _ => {}
        }
    }
}

/// Raw mileage entry as received, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub date: String,
    pub position: String,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

impl MileageInput {
    /// Validate all fields and build the reading to persist.
    /// Nothing is written when this returns Err.
    pub fn validate(self) -> AppResult<MileageReading> {
        if self.name.trim().is_empty() {
            return Err(AppError::MissingField("name"));
        }
        let date = parse_date(&self.date).ok_or_else(|| AppError::InvalidDate(self.date.clone()))?;
        let position = Position::from_code(&self.position)
            .ok_or_else(|| AppError::InvalidPosition(self.position.clone()))?;
        check_non_negative("distance", self.distance)?;

        Ok(MileageReading::new(
            self.id,
            self.name.trim().to_string(),
            date,
            position,
            self.distance,
            self.received_at,
        ))
    }
}

/// Raw hours entry as received, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: String,
    pub hours_today: f64,
    pub hours_week: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

impl HoursInput {
    /// Validate numeric fields and the calendar date.
    pub fn validate(&self) -> AppResult<NaiveDate> {
        let date = parse_date(&self.date).ok_or_else(|| AppError::InvalidDate(self.date.clone()))?;
        check_non_negative("hours_today", self.hours_today)?;
        check_non_negative("hours_week", self.hours_week)?;
        Ok(date)
    }
}

fn check_non_negative(field: &'static str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
