use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::errors::CoastError;
use crate::models::{HazardReport, Position, ReportSubmission, Reporter, Severity};
use crate::utils::text::{sanitize_line, sanitize_text, MAX_LONG_TEXT, MAX_SHORT_TEXT};

/// Validate and sanitize a raw form record into a report. This is the only
/// way user input reaches the store.
pub fn validate_submission(submission: &ReportSubmission) -> Result<HazardReport, CoastError> {
    let hazard_type = required_line("hazardType", submission.hazard_type.as_deref())?;
    let severity_label = required_line("severity", submission.severity.as_deref())?;
    let severity = Severity::parse(&severity_label)?;
    let description = required_text("description", submission.description.as_deref())?;
    let location = required_line("location", submission.location.as_deref())?;

    let lat = parse_coordinate("latitude", submission.latitude.as_deref())?;
    let lng = parse_coordinate("longitude", submission.longitude.as_deref())?;
    let position = Position::new(lat, lng)?;

    let date = required_line("eventDate", submission.event_date.as_deref())?;
    let time = required_line("eventTime", submission.event_time.as_deref())?;
    let timestamp = parse_event_timestamp(&date, &time)?;

    let reporter = Reporter {
        name: optional_line(submission.reporter_name.as_deref()),
        contact: optional_line(submission.reporter_contact.as_deref()),
    };
    let reporter = (reporter.name.is_some() || reporter.contact.is_some()).then_some(reporter);

    let additional_info = submission
        .additional_info
        .as_deref()
        .map(|s| sanitize_text(s, MAX_LONG_TEXT))
        .filter(|s| !s.is_empty());

    debug!(hazard_type = %hazard_type, severity = %severity, "Submission validated");

    Ok(HazardReport::new(position, hazard_type, severity, timestamp, location, description)
        .with_reporter(reporter)
        .with_additional_info(additional_info))
}

/// Combine the form's `YYYY-MM-DD` date and `HH:MM[:SS]` time into a UTC instant.
pub fn parse_event_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>, CoastError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| CoastError::validation("eventDate", format!("'{}' is not a YYYY-MM-DD date", date)))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .map_err(|_| CoastError::validation("eventTime", format!("'{}' is not an HH:MM time", time)))?;
    Ok(NaiveDateTime::new(date, time).and_utc())
}

/// Parse a combined `YYYY-MM-DD HH:MM` stamp, as used by seed records.
pub fn parse_report_time(stamp: &str) -> Result<DateTime<Utc>, CoastError> {
    let trimmed = stamp.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(at.with_timezone(&Utc));
    }
    match trimmed.split_once([' ', 'T']) {
        Some((date, time)) => parse_event_timestamp(date, time),
        None => Err(CoastError::validation("time", format!("'{}' is not a date-time", stamp))),
    }
}

fn required_line(field: &'static str, value: Option<&str>) -> Result<String, CoastError> {
    let cleaned = value.map(|v| sanitize_line(v, MAX_SHORT_TEXT)).unwrap_or_default();
    if cleaned.is_empty() {
        return Err(CoastError::validation(field, "is required"));
    }
    Ok(cleaned)
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, CoastError> {
    let cleaned = value.map(|v| sanitize_text(v, MAX_LONG_TEXT)).unwrap_or_default();
    if cleaned.is_empty() {
        return Err(CoastError::validation(field, "is required"));
    }
    Ok(cleaned)
}

fn optional_line(value: Option<&str>) -> Option<String> {
    value
        .map(|v| sanitize_line(v, MAX_SHORT_TEXT))
        .filter(|v| !v.is_empty())
}

fn parse_coordinate(field: &'static str, value: Option<&str>) -> Result<f64, CoastError> {
    let raw = required_line(field, value)?;
    let parsed: f64 = raw
        .parse()
        .map_err(|_| CoastError::validation(field, format!("'{}' is not a number", raw)))?;
    if !parsed.is_finite() {
        return Err(CoastError::validation(field, "must be finite"));
    }
    Ok(parsed)
}
