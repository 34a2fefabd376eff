use crate::api::analytics::{AnalyticsQuery, EmployeeEntry, InlineAnalyticsRequest};
use crate::api::upload::UploadResponse;
use crate::model::attendance::{NormalizedRecord, RawAttendanceRow};
use crate::model::report::{DailyAggregate, SummaryReport};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave & Productivity Analyzer API",
        version = "1.0.0",
        description = r#"
## Leave & Productivity Analyzer

Ingests employee attendance sheets, derives per-day productivity
metrics, and serves reports filterable by month, year, and employee.

### Key Features
- **Attendance Upload**
  - JSON or CSV attendance rows, batch-atomic validation
- **Productivity Reports**
  - Per-employee and population-wide summaries with daily breakdowns
- **Employee Roster**
  - Distinct employees from the most recent upload

### Policy
Expected hours follow the standard week: Sundays off, Saturday half
day (4h), weekdays 8.5h. A weekday without a complete in/out pair
counts as a leave.

### Storage
The most recent upload is held in a volatile in-memory slot; each
upload replaces the previous one wholesale. Not a system of record.
"#,
    ),
    paths(
        crate::api::upload::upload_attendance,
        crate::api::analytics::get_analytics,
        crate::api::analytics::post_analytics,
        crate::api::analytics::list_employees,
    ),
    components(
        schemas(
            RawAttendanceRow,
            NormalizedRecord,
            DailyAggregate,
            SummaryReport,
            UploadResponse,
            AnalyticsQuery,
            InlineAnalyticsRequest,
            EmployeeEntry,
        )
    ),
    tags(
        (name = "Upload", description = "Attendance sheet ingestion APIs"),
        (name = "Analytics", description = "Productivity reporting APIs"),
    )
)]
pub struct ApiDoc;
