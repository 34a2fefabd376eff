use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::RawAttendanceRow;
use crate::pipeline::aggregate::distinct_employees;
use crate::pipeline::policy::StandardWeekPolicy;
use crate::pipeline::process::process_rows;
use crate::store::AttendanceStore;

/// Column aliases accepted from spreadsheet exports. Aliasing is this
/// collaborator's job; the pipeline only ever sees plain rows.
const EMPLOYEE_COLUMNS: &[&str] = &["Employee Name", "EmployeeName", "Name"];
const DATE_COLUMNS: &[&str] = &["Date", "date"];
const IN_TIME_COLUMNS: &[&str] = &["In-Time", "InTime", "In Time"];
const OUT_TIME_COLUMNS: &[&str] = &["Out-Time", "OutTime", "Out Time"];

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "message": "File processed successfully",
    "recordsProcessed": 42,
    "employees": 3,
    "employeeNames": ["John Doe", "Jane Smith", "Alex Roe"]
}))]
pub struct UploadResponse {
    #[schema(example = "File processed successfully")]
    pub message: String,
    #[schema(example = 42)]
    pub records_processed: usize,
    #[schema(example = 3)]
    pub employees: usize,
    pub employee_names: Vec<String>,
}

fn column_index(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.trim()))
}

/// Reads a headered CSV body into raw rows. Columns the sheet does
/// not carry come through as empty strings and fall to the pipeline's
/// own validation.
fn rows_from_csv(body: &[u8]) -> Result<Vec<RawAttendanceRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(body);
    let headers = reader.headers()?.clone();

    let employee_col = column_index(&headers, EMPLOYEE_COLUMNS);
    let date_col = column_index(&headers, DATE_COLUMNS);
    let in_col = column_index(&headers, IN_TIME_COLUMNS);
    let out_col = column_index(&headers, OUT_TIME_COLUMNS);

    let field = |record: &csv::StringRecord, col: Option<usize>| -> String {
        col.and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawAttendanceRow {
            employee_name: field(&record, employee_col),
            date: field(&record, date_col),
            in_time: field(&record, in_col),
            out_time: field(&record, out_col),
        });
    }
    Ok(rows)
}

/// Attendance upload endpoint
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(
        content = Vec<RawAttendanceRow>,
        description = "Attendance rows, either a JSON array or a headered CSV body \
                       (text/csv). CSV headers may use the usual export aliases \
                       (Name/Employee Name, In-Time/In Time, ...).",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Upload processed and cached", body = UploadResponse),
        (status = 400, description = "Empty upload or a row failed validation; nothing was cached", body = Object, example = json!({
            "error": "missing required field \"employeeName\": employee name and date are required"
        })),
        (status = 415, description = "Body is neither JSON nor CSV")
    ),
    tag = "Upload"
)]
pub async fn upload_attendance(
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<AttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let content_type = req.content_type();

    let rows = if content_type.starts_with("text/csv") {
        match rows_from_csv(&body) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read CSV upload");
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Unreadable CSV body: {e}")
                })));
            }
        }
    } else if content_type.starts_with("application/json") || content_type.is_empty() {
        match serde_json::from_slice::<Vec<RawAttendanceRow>>(&body) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read JSON upload");
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Unreadable JSON body: {e}")
                })));
            }
        }
    } else {
        return Ok(HttpResponse::UnsupportedMediaType().json(serde_json::json!({
            "error": "Only application/json and text/csv uploads are supported"
        })));
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Upload is empty"
        })));
    }

    // Fail-fast: one bad row rejects the batch and the cache keeps
    // the previous upload.
    let records = match process_rows(&rows, &StandardWeekPolicy) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, rows = rows.len(), "Rejected attendance upload");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })));
        }
    };

    let employee_names = distinct_employees(&records);
    let response = UploadResponse {
        message: "File processed successfully".to_string(),
        records_processed: records.len(),
        employees: employee_names.len(),
        employee_names,
    };

    tracing::info!(
        records = response.records_processed,
        employees = response.employees,
        "Attendance upload cached"
    );
    store.replace(records);

    Ok(HttpResponse::Ok().json(response))
}
