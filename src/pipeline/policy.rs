use chrono::{Datelike, NaiveDate, Weekday};

/// Maps a calendar date to the organization's nominal work duration.
/// Kept behind a trait so a holiday calendar or per-site schedule can
/// be swapped in without touching the rest of the pipeline.
pub trait ExpectedHoursPolicy: Send + Sync {
    fn expected_hours_for(&self, date: NaiveDate) -> f64;
}

/// The current policy: Sundays off, Saturday half day (10:00-14:00),
/// weekdays 10:00-18:30.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWeekPolicy;

impl ExpectedHoursPolicy for StandardWeekPolicy {
    fn expected_hours_for(&self, date: NaiveDate) -> f64 {
        match date.weekday() {
            Weekday::Sun => 0.0,
            Weekday::Sat => 4.0,
            _ => 8.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    // 2024-01-01 is a Monday
    #[case("2024-01-01", 8.5)]
    #[case("2024-01-02", 8.5)]
    #[case("2024-01-03", 8.5)]
    #[case("2024-01-04", 8.5)]
    #[case("2024-01-05", 8.5)]
    #[case("2024-01-06", 4.0)]
    #[case("2024-01-07", 0.0)]
    fn standard_week(#[case] date: &str, #[case] expected: f64) {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        assert_eq!(StandardWeekPolicy.expected_hours_for(date), expected);
    }
}
