pub mod seed;

use std::sync::Arc;
use uuid::Uuid;

use crate::models::HazardReport;

/// Append-only in-memory collection of reports. Reports leave the view
/// through filtering only; the store itself is never pruned.
#[derive(Debug, Default, Clone)]
pub struct ReportStore {
    reports: Vec<Arc<HazardReport>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reports(reports: impl IntoIterator<Item = HazardReport>) -> Self {
        let mut store = Self::new();
        store.extend(reports);
        store
    }

    pub fn insert(&mut self, report: HazardReport) -> Arc<HazardReport> {
        let report = Arc::new(report);
        self.reports.push(report.clone());
        report
    }

    pub fn extend(&mut self, reports: impl IntoIterator<Item = HazardReport>) {
        self.reports.extend(reports.into_iter().map(Arc::new));
    }

    pub fn get(&self, id: &Uuid) -> Option<&Arc<HazardReport>> {
        self.reports.iter().find(|r| r.id == *id)
    }

    /// All reports in insertion order.
    pub fn all(&self) -> &[Arc<HazardReport>] {
        &self.reports
    }

    /// Cheap clone of the current contents for off-lock querying.
    pub fn snapshot(&self) -> Vec<Arc<HazardReport>> {
        self.reports.clone()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order_and_lookup() {
        let mut store = ReportStore::with_reports(seed::sample_reports());
        assert_eq!(store.len(), 5);
        let last = seed::sample_reports().remove(0);
        let inserted = store.insert(last);
        assert_eq!(store.len(), 6);
        assert_eq!(store.all().last().unwrap().id, inserted.id);
        assert!(store.get(&inserted.id).is_some());
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut store = ReportStore::with_reports(seed::sample_reports());
        let snapshot = store.snapshot();
        store.insert(seed::sample_reports().remove(1));
        assert_eq!(snapshot.len(), 5);
        assert_eq!(store.len(), 6);
    }
}
