use super::position::Position;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

/// One raw odometer reading as persisted in `mileage_raw`.
/// Rows are append-only: never mutated or deleted after insertion.
#[derive(Debug, Clone, Serialize)]
pub struct MileageReading {
    pub id: String,          // ⇔ mileage_raw.id (TEXT, uuid v4)
    pub name: String,        // ⇔ mileage_raw.name
    pub date: NaiveDate,     // ⇔ mileage_raw.date (TEXT "YYYY-MM-DD")
    pub position: Position,  // ⇔ mileage_raw.position ('start'|'mid'|'end')
    pub distance: f64,       // ⇔ mileage_raw.distance (REAL, >= 0)
    pub received_at: String, // ⇔ mileage_raw.received_at (TEXT, ISO8601)
}

impl MileageReading {
    /// High-level constructor for readings created from validated input.
    /// Assigns a fresh uuid when the source carried none and stamps
    /// `received_at` with now when the ingester didn't.
    pub fn new(
        id: Option<String>,
        name: String,
        date: NaiveDate,
        position: Position,
        distance: f64,
        received_at: Option<String>,
    ) -> Self {
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name,
            date,
            position,
            distance,
            received_at: received_at.unwrap_or_else(|| Local::now().to_rfc3339()),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Derived per-(name, date) total, unique on that key.
/// Always recomputed from scratch out of the raw rows, never patched.
#[derive(Debug, Clone, Serialize)]
pub struct MileageSummary {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub total_miles: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl MileageSummary {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
