use serde::{Deserialize, Serialize};

/// Raw report form as received from the form surface. Every field is
/// untrusted free text until it passes the validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSubmission {
    pub hazard_type: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub additional_info: Option<String>,
}

/// Values written back into the form after a successful geolocation lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFill {
    pub latitude: String,
    pub longitude: String,
    pub location: String,
}

impl LocationFill {
    pub fn from_coordinates(lat: f64, lng: f64) -> Self {
        Self {
            latitude: format!("{:.6}", lat),
            longitude: format!("{:.6}", lng),
            location: format!("{:.4}, {:.4}", lat, lng),
        }
    }
}

/// One entry in the attachment preview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_fill_precision() {
        let fill = LocationFill::from_coordinates(19.076012345, 72.8777);
        assert_eq!(fill.latitude, "19.076012");
        assert_eq!(fill.longitude, "72.877700");
        assert_eq!(fill.location, "19.0760, 72.8777");
    }

    #[test]
    fn test_submission_accepts_missing_fields() {
        let sub: ReportSubmission = serde_json::from_str(r#"{"hazardType":"High Waves"}"#).unwrap();
        assert_eq!(sub.hazard_type.as_deref(), Some("High Waves"));
        assert!(sub.severity.is_none());
    }
}
