use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    // chrono accepts unpadded month/day digits; entry dates are strict
    // zero-padded YYYY-MM-DD, so require an exact round-trip.
    (d.format("%Y-%m-%d").to_string() == s).then_some(d)
}

/// Inclusive lower bound for a "last N days" window ending today.
pub fn days_back(n: i64) -> NaiveDate {
    today() - Duration::days(n.max(1) - 1)
}

/// Grouping key for weekly overtime: ISO year + ISO week number.
pub fn iso_week_key(d: &NaiveDate) -> (i32, u32) {
    let w = d.iso_week();
    (w.year(), w.week())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_only() {
        assert!(parse_date("2025-06-07").is_some());
        assert!(parse_date("07/06/2025").is_none());
        assert!(parse_date("2025-02-30").is_none());
    }

    #[test]
    fn parse_date_rejects_unpadded_forms() {
        assert!(parse_date("2025-6-7").is_none());
        assert!(parse_date("2025-06-7").is_none());
        assert!(parse_date("2025-6-07").is_none());
    }

    #[test]
    fn iso_week_key_groups_monday_to_sunday() {
        let mon = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let sun = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let next_mon = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        assert_eq!(iso_week_key(&mon), iso_week_key(&sun));
        assert_ne!(iso_week_key(&sun), iso_week_key(&next_mon));
    }
}
