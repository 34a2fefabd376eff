use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of an uploaded attendance sheet, one employee on one day.
/// In/out times may be empty strings (no punch recorded).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeName": "John Doe",
        "date": "2024-01-08",
        "inTime": "10:00",
        "outTime": "18:30"
    })
)]
pub struct RawAttendanceRow {
    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "2024-01-08")]
    pub date: String,

    #[schema(example = "10:00")]
    #[serde(default)]
    pub in_time: String,

    #[schema(example = "18:30")]
    #[serde(default)]
    pub out_time: String,
}

/// The processed form of one attendance row. Immutable once built;
/// the aggregator only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    #[schema(example = "John Doe")]
    pub employee: String,

    #[schema(example = "2024-01-08", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Punch-in anchored to `date`; None when the sheet had no (or an
    /// unreadable) in-time.
    #[schema(example = "2024-01-08T10:00:00", value_type = Option<String>)]
    pub in_time: Option<NaiveDateTime>,

    /// Punch-out anchored to `date`.
    #[schema(example = "2024-01-08T18:30:00", value_type = Option<String>)]
    pub out_time: Option<NaiveDateTime>,

    #[schema(example = 8.5)]
    pub worked_hours: f64,

    #[schema(example = 8.5)]
    pub expected_hours: f64,

    /// True iff the day had positive expected hours but no complete
    /// in/out pair. A policy weekend is never a leave.
    #[schema(example = false)]
    pub is_leave: bool,
}
