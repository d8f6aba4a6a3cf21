use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Inclusive time bounds. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| *at >= from) && self.to.map_or(true, |to| *at <= to)
    }
}

/// Relative windows offered by the time-range filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
}

impl TimeWindow {
    pub fn duration(&self) -> Duration {
        match self {
            Self::Last24Hours => Duration::hours(24),
            Self::Last7Days => Duration::days(7),
            Self::Last30Days => Duration::days(30),
        }
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> TimeRange {
        TimeRange {
            from: Some(now - self.duration()),
            to: Some(now),
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "24h" => Ok(Self::Last24Hours),
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            other => Err(format!("unknown time window '{}' (expected 24h, 7d or 30d)", other)),
        }
    }
}

/// Optional constraints on the active report subset. `None` means no
/// restriction on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub hazard_type: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.hazard_type.is_none()
            && self.severity.is_none()
            && self.location.is_none()
            && self.time_range.is_none()
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_hazard_type(mut self, hazard_type: impl Into<String>) -> Self {
        self.hazard_type = Some(hazard_type.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    /// Drop blank text constraints and the "all" placeholder the select
    /// controls emit, so they behave as absent.
    pub fn normalized(mut self) -> Self {
        self.hazard_type = normalize_text(self.hazard_type);
        self.location = normalize_text(self.location);
        if self.time_range == Some(TimeRange::default()) {
            self.time_range = None;
        }
        self
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}
