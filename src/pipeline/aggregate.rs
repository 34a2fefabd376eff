use std::collections::{HashMap, HashSet};

use chrono::Datelike;

use crate::model::attendance::NormalizedRecord;
use crate::model::report::{DailyAggregate, ReportScope, SummaryReport};

/// Optional month/year narrowing for a report. Unset fields match
/// every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl ReportFilter {
    fn matches(&self, record: &NormalizedRecord) -> bool {
        self.month.is_none_or(|m| record.date.month() == m)
            && self.year.is_none_or(|y| record.date.year() == y)
    }
}

/// Distinct employee names across `records`, in first-occurrence
/// order. This is the roster the report's population counts use.
pub fn distinct_employees(records: &[NormalizedRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        if seen.insert(record.employee.as_str()) {
            names.push(record.employee.clone());
        }
    }
    names
}

/// Folds the dataset into a SummaryReport for the given scope and
/// filter. Sums cover only matched records; the population
/// employee count deliberately covers the entire unfiltered dataset
/// so a narrow date filter cannot shrink the roster. The daily
/// breakdown keeps the first-occurrence order of dates in the
/// matched subset; callers wanting chronological order sort it.
pub fn summarize(
    dataset: &[NormalizedRecord],
    scope: &ReportScope,
    filter: &ReportFilter,
) -> SummaryReport {
    let matched: Vec<&NormalizedRecord> = dataset
        .iter()
        .filter(|record| filter.matches(record))
        .filter(|record| match scope {
            ReportScope::AllEmployees => true,
            ReportScope::Employee(name) => record.employee == *name,
        })
        .collect();

    let total_expected_hours: f64 = matched.iter().map(|r| r.expected_hours).sum();
    let total_worked_hours: f64 = matched.iter().map(|r| r.worked_hours).sum();
    let leaves_used = matched.iter().filter(|r| r.is_leave).count();

    // Guard the division so an all-weekend (or empty) scope yields 0
    // rather than NaN or infinity.
    let productivity_percentage = if total_expected_hours > 0.0 {
        total_worked_hours / total_expected_hours * 100.0
    } else {
        0.0
    };

    let roster_size = distinct_employees(dataset).len();
    let employee_count = match scope {
        ReportScope::AllEmployees => roster_size,
        ReportScope::Employee(_) => {
            let in_scope: HashSet<&str> =
                matched.iter().map(|r| r.employee.as_str()).collect();
            in_scope.len()
        }
    };

    let daily_breakdown = daily_breakdown(&matched, roster_size);

    SummaryReport {
        employee_name: scope.label().to_string(),
        total_expected_hours,
        total_worked_hours,
        leaves_used,
        productivity_percentage,
        employee_count,
        employee_records: matched.into_iter().cloned().collect(),
        daily_breakdown,
    }
}

fn daily_breakdown(matched: &[&NormalizedRecord], roster_size: usize) -> Vec<DailyAggregate> {
    let mut days: Vec<DailyAggregate> = Vec::new();
    let mut index: HashMap<chrono::NaiveDate, usize> = HashMap::new();
    let mut present: Vec<HashSet<&str>> = Vec::new();

    for record in matched {
        let slot = *index.entry(record.date).or_insert_with(|| {
            days.push(DailyAggregate {
                date: record.date,
                total_worked_hours: 0.0,
                total_expected_hours: 0.0,
                employees_present: 0,
                total_employees: roster_size,
            });
            present.push(HashSet::new());
            days.len() - 1
        });

        days[slot].total_worked_hours += record.worked_hours;
        days[slot].total_expected_hours += record.expected_hours;
        if !record.is_leave {
            present[slot].insert(record.employee.as_str());
        }
    }

    for (day, who) in days.iter_mut().zip(&present) {
        day.employees_present = who.len();
    }
    days
}
