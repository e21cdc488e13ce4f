use chrono::NaiveDate;
use serde::Serialize;

/// Aggregated hours over one pay period, unique per (period_start,
/// period_end). Derived from `hours` rows inside the window.
#[derive(Debug, Clone, Serialize)]
pub struct PayPeriodSummary {
    pub id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub days_worked: i64,
    pub created_at: String,
    pub updated_at: String,
}
