use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::NormalizedRecord;

/// Query-string marker for population-wide reports.
pub const ALL_EMPLOYEES_MARKER: &str = "ALL_EMPLOYEES";

/// Label rendered on population-wide reports.
pub const ALL_EMPLOYEES_LABEL: &str = "All Employees";

/// Who a report is about: one named employee or everyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportScope {
    Employee(String),
    AllEmployees,
}

impl ReportScope {
    /// Maps the HTTP-level employee parameter to a scope
    /// (`ALL_EMPLOYEES` is the population marker).
    pub fn from_param(employee: &str) -> Self {
        if employee == ALL_EMPLOYEES_MARKER {
            ReportScope::AllEmployees
        } else {
            ReportScope::Employee(employee.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ReportScope::Employee(name) => name,
            ReportScope::AllEmployees => ALL_EMPLOYEES_LABEL,
        }
    }
}

/// Population totals for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "date": "2024-01-08",
        "totalWorkedHours": 16.75,
        "totalExpectedHours": 17.0,
        "employeesPresent": 2,
        "totalEmployees": 2
    })
)]
pub struct DailyAggregate {
    #[schema(example = "2024-01-08", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = 16.75)]
    pub total_worked_hours: f64,

    #[schema(example = 17.0)]
    pub total_expected_hours: f64,

    /// Distinct employees with a non-leave record that day.
    #[schema(example = 2)]
    pub employees_present: usize,

    /// Distinct employees across the entire dataset, not just this
    /// day or the filtered slice.
    #[schema(example = 2)]
    pub total_employees: usize,
}

/// Top-level aggregation result, computed per query and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    /// Scope label: an employee name or "All Employees".
    #[schema(example = "All Employees")]
    pub employee_name: String,

    #[schema(example = 170.0)]
    pub total_expected_hours: f64,

    #[schema(example = 158.5)]
    pub total_worked_hours: f64,

    #[schema(example = 1)]
    pub leaves_used: usize,

    #[schema(example = 93.2)]
    pub productivity_percentage: f64,

    #[schema(example = 2)]
    pub employee_count: usize,

    pub employee_records: Vec<NormalizedRecord>,

    pub daily_breakdown: Vec<DailyAggregate>,
}
