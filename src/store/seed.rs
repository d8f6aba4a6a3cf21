use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::CoastError;
use crate::intake::parse_report_time;
use crate::models::{HazardReport, Position, Severity};
use crate::utils::text::{sanitize_line, sanitize_text, MAX_LONG_TEXT, MAX_SHORT_TEXT};

const SEED_FILE_LIMIT: u64 = 1_048_576;

/// Seed file entry. Same shape as the built-in samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRecord {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub hazard_type: String,
    pub severity: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

impl SeedRecord {
    pub fn into_report(self) -> Result<HazardReport, CoastError> {
        let position = Position::new(self.lat, self.lng)?;
        let severity = Severity::parse(&self.severity)?;
        let timestamp = parse_report_time(&self.time)?;
        let hazard_type = sanitize_line(&self.hazard_type, MAX_SHORT_TEXT);
        if hazard_type.is_empty() {
            return Err(CoastError::validation("type", "is required"));
        }
        Ok(HazardReport::new(
            position,
            hazard_type,
            severity,
            timestamp,
            sanitize_line(&self.location, MAX_SHORT_TEXT),
            sanitize_text(&self.description, MAX_LONG_TEXT),
        ))
    }
}

fn sample(lat: f64, lng: f64, hazard_type: &str, severity: Severity, hour: u32, minute: u32, location: &str, description: &str) -> HazardReport {
    HazardReport::new(
        Position { lat, lng },
        hazard_type,
        severity,
        jan_15(hour, minute),
        location,
        description,
    )
}

fn jan_15(hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Built-in sample set along the Indian coastline: three high, one medium,
/// one low.
pub fn sample_reports() -> Vec<HazardReport> {
    vec![
        sample(19.0760, 72.8777, "High Waves", Severity::High, 14, 30, "Mumbai Coast",
            "Unusually high waves observed near Marine Drive"),
        sample(13.0827, 80.2707, "Storm Surge", Severity::High, 12, 15, "Chennai Coast",
            "Storm surge affecting coastal areas"),
        sample(22.5726, 88.3639, "Coastal Flooding", Severity::Low, 16, 45, "Kolkata Coast",
            "Minor coastal flooding during high tide"),
        sample(15.2993, 74.1240, "Abnormal Tides", Severity::Medium, 11, 20, "Goa Coast",
            "Abnormal tidal patterns observed"),
        sample(11.9416, 79.8083, "High Waves", Severity::High, 13, 10, "Pondicherry Coast",
            "High waves causing beach erosion"),
    ]
}

/// Load seed reports from a JSON or YAML file (chosen by extension). Any
/// invalid record fails the whole load with its index in the message.
pub async fn load_seed_file(path: &Path) -> Result<Vec<HazardReport>, CoastError> {
    if !path.exists() {
        return Err(CoastError::Config(format!("Seed file not found: {}", path.display())));
    }
    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > SEED_FILE_LIMIT {
        return Err(CoastError::Config("Seed file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let records: Vec<SeedRecord> = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    let reports = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            record
                .into_report()
                .map_err(|e| CoastError::Config(format!("Seed record {}: {}", idx, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(path = %path.display(), count = reports.len(), "Loaded seed reports");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_distribution() {
        let reports = sample_reports();
        assert_eq!(reports.len(), 5);
        let high = reports.iter().filter(|r| r.severity == Severity::High).count();
        let medium = reports.iter().filter(|r| r.severity == Severity::Medium).count();
        let low = reports.iter().filter(|r| r.severity == Severity::Low).count();
        assert_eq!((high, medium, low), (3, 1, 1));
    }

    #[test]
    fn test_sample_timestamps() {
        let reports = sample_reports();
        assert_eq!(reports[0].timestamp.to_rfc3339(), "2024-01-15T14:30:00+00:00");
    }

    #[tokio::test]
    async fn test_load_yaml_seed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.yaml");
        std::fs::write(
            &path,
            "- lat: 8.5\n  lng: 76.9\n  type: Rip Current\n  severity: medium\n  time: 2024-02-01 07:45\n  location: Kovalam Beach\n  description: Strong rip current near the lighthouse\n",
        )
        .unwrap();
        let reports = load_seed_file(&path).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].hazard_type, "Rip Current");
        assert_eq!(reports[0].severity, Severity::Medium);
    }

    #[tokio::test]
    async fn test_load_json_seed_rejects_bad_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[{"lat": 95.0, "lng": 0.0, "type": "High Waves", "severity": "high", "time": "2024-01-15 10:00", "location": "x", "description": "y"}]"#,
        )
        .unwrap();
        let err = load_seed_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("Seed record 0"));
    }

    #[tokio::test]
    async fn test_missing_seed_file() {
        let err = load_seed_file(Path::new("/nonexistent/seed.yaml")).await.unwrap_err();
        assert!(matches!(err, CoastError::Config(_)));
    }
}
