use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::CoastError;
use crate::models::{FilterCriteria, HazardReport};

/// True when the report passes every constraint present in `criteria`.
pub fn matches(report: &HazardReport, criteria: &FilterCriteria) -> bool {
    let hazard_ok = criteria
        .hazard_type
        .as_deref()
        .map_or(true, |t| report.hazard_type.trim().eq_ignore_ascii_case(t.trim()));
    let severity_ok = criteria.severity.map_or(true, |s| report.severity == s);
    let location_ok = criteria.location.as_deref().map_or(true, |needle| {
        report
            .location
            .to_lowercase()
            .contains(&needle.trim().to_lowercase())
    });
    let time_ok = criteria
        .time_range
        .as_ref()
        .map_or(true, |range| range.contains(&report.timestamp));

    hazard_ok && severity_ok && location_ok && time_ok
}

/// Narrow `reports` to the subset passing `criteria`, keeping relative order.
pub fn apply(reports: &[Arc<HazardReport>], criteria: &FilterCriteria) -> Vec<Arc<HazardReport>> {
    reports
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

/// Query capability behind filter changes. Lets a backend search replace the
/// in-memory pass without touching the render path.
#[async_trait]
pub trait ReportQuery: Send + Sync {
    async fn query(
        &self,
        reports: &[Arc<HazardReport>],
        criteria: &FilterCriteria,
    ) -> Result<Vec<Arc<HazardReport>>, CoastError>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// Filters the store snapshot in process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryQuery;

#[async_trait]
impl ReportQuery for InMemoryQuery {
    async fn query(
        &self,
        reports: &[Arc<HazardReport>],
        criteria: &FilterCriteria,
    ) -> Result<Vec<Arc<HazardReport>>, CoastError> {
        Ok(apply(reports, criteria))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, TimeRange};
    use crate::store::seed::sample_reports;
    use chrono::{TimeZone, Utc};

    fn seeded() -> Vec<Arc<HazardReport>> {
        sample_reports().into_iter().map(Arc::new).collect()
    }

    fn ids(reports: &[Arc<HazardReport>]) -> Vec<uuid::Uuid> {
        reports.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let reports = seeded();
        let out = apply(&reports, &FilterCriteria::default());
        assert_eq!(ids(&out), ids(&reports));
    }

    #[test]
    fn test_severity_subset_in_order() {
        let reports = seeded();
        let out = apply(&reports, &FilterCriteria::default().with_severity(Severity::High));
        let locations: Vec<&str> = out.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, vec!["Mumbai Coast", "Chennai Coast", "Pondicherry Coast"]);
        assert!(out.iter().all(|r| r.severity == Severity::High));
    }

    #[test]
    fn test_hazard_type_equality() {
        let reports = seeded();
        let out = apply(&reports, &FilterCriteria::default().with_hazard_type("high waves"));
        assert_eq!(out.len(), 2);
        let none = apply(&reports, &FilterCriteria::default().with_hazard_type("High"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_location_substring() {
        let reports = seeded();
        let out = apply(&reports, &FilterCriteria::default().with_location("chennai"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].hazard_type, "Storm Surge");
    }

    #[test]
    fn test_time_range_inclusive() {
        let reports = seeded();
        let range = TimeRange {
            from: Some(Utc.with_ymd_and_hms(2024, 1, 15, 12, 15, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()),
        };
        let out = apply(&reports, &FilterCriteria::default().with_time_range(range));
        let locations: Vec<&str> = out.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, vec!["Mumbai Coast", "Chennai Coast", "Pondicherry Coast"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let reports = seeded();
        let criteria = FilterCriteria::default()
            .with_severity(Severity::High)
            .with_hazard_type("High Waves")
            .with_location("Pondicherry");
        let out = apply(&reports, &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location, "Pondicherry Coast");
    }

    #[tokio::test]
    async fn test_in_memory_query_delegates() {
        let reports = seeded();
        let criteria = FilterCriteria::default().with_severity(Severity::Low);
        let out = InMemoryQuery.query(&reports, &criteria).await.unwrap();
        assert_eq!(ids(&out), ids(&apply(&reports, &criteria)));
    }
}
