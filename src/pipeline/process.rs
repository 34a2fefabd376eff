use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::model::attendance::{NormalizedRecord, RawAttendanceRow};
use crate::pipeline::policy::ExpectedHoursPolicy;

/// The only hard failure in the pipeline. One bad row rejects the
/// whole batch so an upload either commits completely or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field {field:?}: employee name and date are required")]
    MissingField { field: &'static str },

    #[error("unreadable date {value:?}")]
    UnparseableDate { value: String },
}

/// Date shapes accepted from attendance sheets.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Anchors a `HH:MM` clock string to `date`. Returns None for blank
/// input or when either token is not an integer. Out-of-range tokens
/// like `25:99` are handed to `NaiveDate::and_hms_opt`, which rejects
/// them, so they also come back as None rather than overflowing.
pub fn parse_clock_time(date: NaiveDate, raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut tokens = raw.splitn(3, ':');
    let hour: u32 = tokens.next()?.trim().parse().ok()?;
    let minute: u32 = tokens.next()?.trim().parse().ok()?;

    date.and_hms_opt(hour, minute, 0)
}

/// Elapsed hours between a punch pair. Absent on either side, or an
/// out-time before the in-time, yields 0. Never fails.
pub fn worked_hours(in_time: Option<NaiveDateTime>, out_time: Option<NaiveDateTime>) -> f64 {
    match (in_time, out_time) {
        (Some(inn), Some(out)) => {
            let hours = (out - inn).num_seconds() as f64 / 3600.0;
            hours.max(0.0)
        }
        _ => 0.0,
    }
}

/// Transforms one raw sheet row into a normalized record. Pure and
/// row-order independent; rows may be processed in any order.
pub fn process_row(
    row: &RawAttendanceRow,
    policy: &dyn ExpectedHoursPolicy,
) -> Result<NormalizedRecord, ValidationError> {
    let employee = row.employee_name.trim();
    if employee.is_empty() {
        return Err(ValidationError::MissingField {
            field: "employeeName",
        });
    }

    let raw_date = row.date.trim();
    if raw_date.is_empty() {
        return Err(ValidationError::MissingField { field: "date" });
    }
    let date = parse_sheet_date(raw_date).ok_or_else(|| ValidationError::UnparseableDate {
        value: raw_date.to_string(),
    })?;

    let in_time = parse_clock_time(date, &row.in_time);
    let out_time = parse_clock_time(date, &row.out_time);

    let expected_hours = policy.expected_hours_for(date);
    let worked = worked_hours(in_time, out_time);
    let is_leave = expected_hours > 0.0 && (in_time.is_none() || out_time.is_none());

    Ok(NormalizedRecord {
        employee: employee.to_string(),
        date,
        in_time,
        out_time,
        worked_hours: worked,
        expected_hours,
        is_leave,
    })
}

/// Processes a whole upload, fail-fast: the first invalid row rejects
/// the batch and nothing is returned for the caller to commit.
pub fn process_rows(
    rows: &[RawAttendanceRow],
    policy: &dyn ExpectedHoursPolicy,
) -> Result<Vec<NormalizedRecord>, ValidationError> {
    rows.iter().map(|row| process_row(row, policy)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::policy::StandardWeekPolicy;
    use rstest::rstest;

    fn row(employee: &str, date: &str, in_time: &str, out_time: &str) -> RawAttendanceRow {
        RawAttendanceRow {
            employee_name: employee.to_string(),
            date: date.to_string(),
            in_time: in_time.to_string(),
            out_time: out_time.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_clock_time_anchored_to_date() {
        let ts = parse_clock_time(date("2024-01-08"), "10:30").unwrap();
        assert_eq!(ts, date("2024-01-08").and_hms_opt(10, 30, 0).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("ten:30")]
    #[case("10:oh-five")]
    #[case("10")]
    #[case("25:99")] // out of range, rejected by and_hms_opt
    fn unreadable_clock_times_are_absent(#[case] raw: &str) {
        assert_eq!(parse_clock_time(date("2024-01-08"), raw), None);
    }

    #[test]
    fn clock_time_tolerates_seconds_and_padding() {
        let d = date("2024-01-08");
        assert_eq!(parse_clock_time(d, " 09:05:33 "), d.and_hms_opt(9, 5, 0));
    }

    #[test]
    fn worked_hours_requires_both_punches() {
        let d = date("2024-01-08");
        let inn = d.and_hms_opt(10, 0, 0);
        let out = d.and_hms_opt(18, 30, 0);
        assert_eq!(worked_hours(inn, out), 8.5);
        assert_eq!(worked_hours(None, out), 0.0);
        assert_eq!(worked_hours(inn, None), 0.0);
        assert_eq!(worked_hours(None, None), 0.0);
    }

    #[test]
    fn negative_spans_clamp_to_zero() {
        let d = date("2024-01-08");
        let inn = d.and_hms_opt(18, 0, 0);
        let out = d.and_hms_opt(9, 0, 0);
        assert_eq!(worked_hours(inn, out), 0.0);
    }

    #[test]
    fn saturday_half_day_worked_in_full() {
        // Scenario A: 2024-01-06 is a Saturday
        let rec = process_row(&row("A", "2024-01-06", "10:00", "14:00"), &StandardWeekPolicy)
            .unwrap();
        assert_eq!(rec.expected_hours, 4.0);
        assert_eq!(rec.worked_hours, 4.0);
        assert!(!rec.is_leave);
    }

    #[test]
    fn sunday_without_punches_is_not_a_leave() {
        // Scenario B: 2024-01-07 is a Sunday
        let rec = process_row(&row("A", "2024-01-07", "", ""), &StandardWeekPolicy).unwrap();
        assert_eq!(rec.expected_hours, 0.0);
        assert_eq!(rec.worked_hours, 0.0);
        assert!(!rec.is_leave);
    }

    #[test]
    fn weekday_without_punches_is_a_leave() {
        // Scenario C: 2024-01-08 is a Monday
        let rec = process_row(&row("A", "2024-01-08", "", ""), &StandardWeekPolicy).unwrap();
        assert_eq!(rec.expected_hours, 8.5);
        assert_eq!(rec.worked_hours, 0.0);
        assert!(rec.is_leave);
    }

    #[test]
    fn single_missing_punch_is_a_leave_with_zero_hours() {
        let rec = process_row(&row("A", "2024-01-08", "10:00", ""), &StandardWeekPolicy).unwrap();
        assert!(rec.in_time.is_some());
        assert_eq!(rec.out_time, None);
        assert_eq!(rec.worked_hours, 0.0);
        assert!(rec.is_leave);
    }

    #[test]
    fn leave_implies_zero_worked_hours() {
        let rows = [
            row("A", "2024-01-08", "", ""),
            row("A", "2024-01-09", "10:00", ""),
            row("A", "2024-01-10", "bad", "18:00"),
            row("A", "2024-01-13", "10:00", "14:00"),
        ];
        for rec in process_rows(&rows, &StandardWeekPolicy).unwrap() {
            if rec.is_leave {
                assert_eq!(rec.worked_hours, 0.0);
            }
            if rec.expected_hours == 0.0 {
                assert!(!rec.is_leave);
            }
        }
    }

    #[test]
    fn processing_is_idempotent() {
        let r = row("A", "2024-01-08", "10:00", "18:30");
        let first = process_row(&r, &StandardWeekPolicy).unwrap();
        let second = process_row(&r, &StandardWeekPolicy).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("2024/01/08")]
    #[case("01/08/2024")]
    #[case("08-01-2024")]
    fn alternate_date_shapes_accepted(#[case] raw: &str) {
        let rec = process_row(&row("A", raw, "10:00", "18:30"), &StandardWeekPolicy).unwrap();
        assert_eq!(rec.date, date("2024-01-08"));
    }

    #[test]
    fn blank_name_or_date_rejects_the_row() {
        let err = process_row(&row("  ", "2024-01-08", "", ""), &StandardWeekPolicy).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "employeeName"
            }
        );

        let err = process_row(&row("A", "   ", "", ""), &StandardWeekPolicy).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "date" });
    }

    #[test]
    fn unreadable_date_rejects_the_row() {
        let err = process_row(&row("A", "not-a-date", "", ""), &StandardWeekPolicy).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnparseableDate {
                value: "not-a-date".to_string()
            }
        );
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let rows = [
            row("A", "2024-01-08", "10:00", "18:30"),
            row("", "2024-01-09", "10:00", "18:30"),
        ];
        assert!(process_rows(&rows, &StandardWeekPolicy).is_err());
    }
}
