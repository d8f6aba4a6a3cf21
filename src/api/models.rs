use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoastError;
use crate::models::{FilterCriteria, HazardReport, PreviewItem, Severity, TimeRange, TimeWindow};

/// Filter controls as the page sends them: free text plus the `all`
/// placeholder for unset selects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRequest {
    pub hazard_type: Option<String>,
    pub severity: Option<String>,
    pub location: Option<String>,
    /// `24h`, `7d` or `30d`; resolved against the current time.
    pub time_range: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl FilterRequest {
    pub fn into_criteria(self, now: DateTime<Utc>) -> Result<FilterCriteria, CoastError> {
        let severity = match self.severity.as_deref().and_then(selected) {
            None => None,
            Some(label) => Some(Severity::parse(label)?),
        };

        let window = match self.time_range.as_deref().and_then(selected) {
            None => None,
            Some(label) => Some(
                label
                    .parse::<TimeWindow>()
                    .map_err(|e| CoastError::validation("timeRange", e))?,
            ),
        };
        let time_range = match (window, self.from, self.to) {
            (Some(window), _, _) => Some(window.resolve(now)),
            (None, None, None) => None,
            (None, from, to) => Some(TimeRange { from, to }),
        };

        Ok(FilterCriteria {
            hazard_type: self.hazard_type,
            severity,
            location: self.location,
            time_range,
        }
        .normalized())
    }
}

/// A select value, or `None` when blank or the `all` placeholder.
fn selected(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && !value.eq_ignore_ascii_case("all")).then_some(value)
}

#[derive(Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<HazardReport>,
    pub total: usize,
}

#[derive(Deserialize)]
pub struct PreviewRequest {
    pub names: Vec<String>,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub items: Vec<PreviewItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_all_placeholders_mean_unset() {
        let req = FilterRequest {
            hazard_type: Some("all".into()),
            severity: Some("all".into()),
            location: Some("  ".into()),
            time_range: Some("all".into()),
            ..Default::default()
        };
        assert!(req.into_criteria(Utc::now()).unwrap().is_empty());
    }

    #[test]
    fn test_all_placeholder_ignores_case() {
        let req = FilterRequest {
            hazard_type: Some("All".into()),
            severity: Some("All".into()),
            time_range: Some(" ALL ".into()),
            ..Default::default()
        };
        assert!(req.into_criteria(Utc::now()).unwrap().is_empty());
    }

    #[test]
    fn test_window_resolves_to_range() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        let req = FilterRequest { time_range: Some("7d".into()), ..Default::default() };
        let range = req.into_criteria(now).unwrap().time_range.unwrap();
        assert_eq!(range.to, Some(now));
        assert_eq!(range.from, Some(now - chrono::Duration::days(7)));
    }

    #[test]
    fn test_bad_severity_and_window_rejected() {
        let req = FilterRequest { severity: Some("extreme".into()), ..Default::default() };
        assert!(matches!(req.into_criteria(Utc::now()), Err(CoastError::UnknownSeverity(_))));

        let req = FilterRequest { time_range: Some("1y".into()), ..Default::default() };
        let err = req.into_criteria(Utc::now()).unwrap_err();
        assert!(err.to_string().contains("timeRange"));
    }
}
