use chrono::NaiveDate;
use serde::Serialize;

/// Daily hours report, unique per calendar date. A resubmission for the
/// same date replaces the previous row (upsert), it never stacks.
#[derive(Debug, Clone, Serialize)]
pub struct HoursEntry {
    pub id: String,          // ⇔ hours.id (TEXT, uuid v4)
    pub date: NaiveDate,     // ⇔ hours.date (TEXT "YYYY-MM-DD", UNIQUE)
    pub hours_today: f64,    // ⇔ hours.hours_today (REAL, >= 0)
    pub hours_week: f64,     // ⇔ hours.hours_week (REAL, >= 0)
    pub received_at: String, // ⇔ hours.received_at (TEXT, ISO8601)
    pub created_at: String,  // ⇔ hours.created_at (kept across replacements)
}

impl HoursEntry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
