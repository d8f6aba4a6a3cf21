use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::severity::Severity;
use crate::errors::CoastError;

/// WGS84 coordinates. Construct through [`Position::new`] to enforce range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoastError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoastError::InvalidCoordinates(format!(
                "coordinates must be finite, got ({}, {})",
                lat, lng
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoastError::InvalidCoordinates(format!(
                "latitude {} outside -90..=90",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoastError::InvalidCoordinates(format!(
                "longitude {} outside -180..=180",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reporter {
    pub name: Option<String>,
    pub contact: Option<String>,
}

/// A single geotagged observation of a coastal hazard. Never mutated after
/// it enters the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardReport {
    pub id: Uuid,
    pub position: Position,
    /// Open set: "High Waves", "Storm Surge", "Coastal Flooding", ...
    pub hazard_type: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl HazardReport {
    pub fn new(
        position: Position,
        hazard_type: impl Into<String>,
        severity: Severity,
        timestamp: DateTime<Utc>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            hazard_type: hazard_type.into(),
            severity,
            timestamp,
            location: location.into(),
            description: description.into(),
            reporter: None,
            additional_info: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Option<Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_additional_info(mut self, info: Option<String>) -> Self {
        self.additional_info = info;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bounds_inclusive() {
        assert!(Position::new(90.0, 180.0).is_ok());
        assert!(Position::new(-90.0, -180.0).is_ok());
        assert!(Position::new(90.0001, 0.0).is_err());
        assert!(Position::new(0.0, -180.5).is_err());
    }

    #[test]
    fn test_position_rejects_non_finite() {
        assert!(Position::new(f64::NAN, 0.0).is_err());
        assert!(Position::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let pos = Position::new(19.0, 72.8).unwrap();
        let a = HazardReport::new(pos, "High Waves", Severity::High, Utc::now(), "Mumbai", "x");
        let b = HazardReport::new(pos, "High Waves", Severity::High, Utc::now(), "Mumbai", "x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_camel_case() {
        let pos = Position::new(13.08, 80.27).unwrap();
        let report = HazardReport::new(pos, "Storm Surge", Severity::High, Utc::now(), "Chennai", "surge");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["hazardType"], "Storm Surge");
        assert_eq!(value["severity"], "high");
        assert!(value.get("reporter").is_none());
    }
}
