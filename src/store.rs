use std::sync::{Arc, RwLock};

use crate::model::attendance::NormalizedRecord;

/// Holds the most recent processed upload. A deliberate single-slot
/// register: each upload replaces the previous set wholesale, with
/// last-writer-wins semantics. Injected into handlers as
/// `web::Data<AttendanceStore>` rather than living in a global, so
/// tests get their own instance.
#[derive(Debug, Default)]
pub struct AttendanceStore {
    slot: RwLock<Arc<Vec<NormalizedRecord>>>,
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new dataset as one assignment. Readers holding a
    /// snapshot keep the set they started with; they never observe a
    /// half-replaced slot.
    pub fn replace(&self, records: Vec<NormalizedRecord>) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Arc::new(records);
    }

    /// Cheap point-in-time view of the current dataset.
    pub fn snapshot(&self) -> Arc<Vec<NormalizedRecord>> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(employee: &str, date: &str) -> NormalizedRecord {
        NormalizedRecord {
            employee: employee.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            in_time: None,
            out_time: None,
            worked_hours: 0.0,
            expected_hours: 8.5,
            is_leave: true,
        }
    }

    #[test]
    fn replace_is_wholesale() {
        let store = AttendanceStore::new();
        store.replace(vec![record("A", "2024-01-08"), record("B", "2024-01-08")]);
        assert_eq!(store.snapshot().len(), 2);

        store.replace(vec![record("C", "2024-02-05")]);
        let current = store.snapshot();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].employee, "C");
    }

    #[test]
    fn snapshots_outlive_a_replace() {
        let store = AttendanceStore::new();
        store.replace(vec![record("A", "2024-01-08")]);
        let before = store.snapshot();
        store.clear();
        assert_eq!(before.len(), 1);
        assert!(store.is_empty());
    }
}
