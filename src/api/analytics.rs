use actix_web::{HttpResponse, Responder, web};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::{NormalizedRecord, RawAttendanceRow};
use crate::model::report::{ReportScope, SummaryReport};
use crate::pipeline::aggregate::{ReportFilter, distinct_employees, summarize};
use crate::pipeline::policy::StandardWeekPolicy;
use crate::pipeline::process::process_rows;
use crate::store::AttendanceStore;

/// Sample dataset served while nothing has been uploaded yet, so the
/// dashboard has something to render. Collaborator-defined; the
/// pipeline itself knows nothing about it.
static SAMPLE_DATASET: Lazy<Vec<NormalizedRecord>> = Lazy::new(|| {
    let rows = [
        ("John Doe", "2024-01-01", "10:00", "18:30"),
        ("Jane Smith", "2024-01-01", "09:45", "18:15"),
        ("John Doe", "2024-01-02", "10:15", "18:45"),
        ("Jane Smith", "2024-01-02", "10:30", "18:45"),
        ("John Doe", "2024-01-03", "10:30", "18:20"),
        ("Jane Smith", "2024-01-03", "10:00", "18:30"),
        ("John Doe", "2024-01-04", "", ""),
        ("Jane Smith", "2024-01-04", "10:05", "18:35"),
        ("John Doe", "2024-01-05", "09:50", "18:25"),
        ("Jane Smith", "2024-01-05", "", ""),
    ];
    let raw: Vec<RawAttendanceRow> = rows
        .iter()
        .map(|(employee_name, date, in_time, out_time)| RawAttendanceRow {
            employee_name: employee_name.to_string(),
            date: date.to_string(),
            in_time: in_time.to_string(),
            out_time: out_time.to_string(),
        })
        .collect();
    process_rows(&raw, &StandardWeekPolicy).expect("sample dataset rows are valid")
});

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AnalyticsQuery {
    /// Employee name, or ALL_EMPLOYEES for the whole population
    #[schema(example = "ALL_EMPLOYEES")]
    pub employee: Option<String>,
    /// Calendar month 1-12; unset matches every month
    #[schema(example = 1)]
    pub month: Option<u32>,
    /// 4-digit year; unset matches every year
    #[schema(example = 2024)]
    pub year: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InlineAnalyticsRequest {
    /// Raw attendance rows to report on, bypassing the cache
    pub data: Vec<RawAttendanceRow>,
    #[schema(example = "ALL_EMPLOYEES")]
    pub employee: Option<String>,
    #[schema(example = 1)]
    pub month: Option<u32>,
    #[schema(example = 2024)]
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({ "id": "1", "name": "John Doe" }))]
pub struct EmployeeEntry {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
}

fn build_filter(month: Option<u32>, year: Option<i32>) -> Result<ReportFilter, String> {
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            return Err(format!("month must be between 1 and 12, got {m}"));
        }
    }
    if let Some(y) = year {
        if !(1000..=9999).contains(&y) {
            return Err(format!("year must be a 4-digit year, got {y}"));
        }
    }
    Ok(ReportFilter { month, year })
}

fn report_for(
    dataset: &[NormalizedRecord],
    scope: &ReportScope,
    filter: &ReportFilter,
) -> SummaryReport {
    let mut report = summarize(dataset, scope, filter);
    // The aggregator hands back first-occurrence order; the
    // single-employee view is a daily timeline, so sort it here.
    if matches!(scope, ReportScope::Employee(_)) {
        report.employee_records.sort_by_key(|r| r.date);
        report.daily_breakdown.sort_by_key(|d| d.date);
    }
    report
}

/// Productivity report over the cached upload
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Summary report for the requested scope", body = SummaryReport),
        (status = 400, description = "Missing employee parameter or out-of-range filter", body = Object, example = json!({
            "error": "Employee name is required"
        }))
    ),
    tag = "Analytics"
)]
pub async fn get_analytics(
    query: web::Query<AnalyticsQuery>,
    store: web::Data<AttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let Some(employee) = query.employee.as_deref().map(str::trim).filter(|e| !e.is_empty())
    else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Employee name is required"
        })));
    };

    let filter = match build_filter(query.month, query.year) {
        Ok(filter) => filter,
        Err(message) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": message })));
        }
    };

    let scope = ReportScope::from_param(employee);
    let snapshot = store.snapshot();
    let dataset: &[NormalizedRecord] = if snapshot.is_empty() {
        tracing::debug!("Store empty, serving sample dataset");
        &SAMPLE_DATASET
    } else {
        &snapshot
    };

    Ok(HttpResponse::Ok().json(report_for(dataset, &scope, &filter)))
}

/// Productivity report over rows supplied in the request body
#[utoipa::path(
    post,
    path = "/api/analytics",
    request_body = InlineAnalyticsRequest,
    responses(
        (status = 200, description = "Summary report over the supplied rows", body = SummaryReport),
        (status = 400, description = "A supplied row failed validation or a filter is out of range")
    ),
    tag = "Analytics"
)]
pub async fn post_analytics(
    payload: web::Json<InlineAnalyticsRequest>,
) -> actix_web::Result<impl Responder> {
    let filter = match build_filter(payload.month, payload.year) {
        Ok(filter) => filter,
        Err(message) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": message })));
        }
    };

    let records = match process_rows(&payload.data, &StandardWeekPolicy) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, rows = payload.data.len(), "Rejected inline analytics data");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })));
        }
    };

    let scope = payload
        .employee
        .as_deref()
        .map(ReportScope::from_param)
        .unwrap_or(ReportScope::AllEmployees);

    Ok(HttpResponse::Ok().json(report_for(&records, &scope, &filter)))
}

/// Employee roster from the cached upload
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Distinct employees in upload order", body = [EmployeeEntry])
    ),
    tag = "Analytics"
)]
pub async fn list_employees(store: web::Data<AttendanceStore>) -> actix_web::Result<impl Responder> {
    let snapshot = store.snapshot();
    let dataset: &[NormalizedRecord] = if snapshot.is_empty() {
        &SAMPLE_DATASET
    } else {
        &snapshot
    };

    let roster: Vec<EmployeeEntry> = distinct_employees(dataset)
        .into_iter()
        .enumerate()
        .map(|(i, name)| EmployeeEntry {
            id: (i + 1).to_string(),
            name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(roster))
}
