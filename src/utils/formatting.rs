use chrono::{DateTime, Utc};

pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_report_time(at: &DateTime<Utc>) -> String {
    at.format(REPORT_TIME_FORMAT).to_string()
}

pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
