use crate::models::{AggregatedStats, HazardReport, Severity};

/// Count the subset by severity. Always a full recount.
pub fn summarize<'a, I>(reports: I) -> AggregatedStats
where
    I: IntoIterator<Item = &'a HazardReport>,
{
    reports.into_iter().fold(AggregatedStats::default(), |mut stats, report| {
        stats.total += 1;
        match report.severity {
            Severity::High => stats.high += 1,
            Severity::Medium => stats.medium += 1,
            Severity::Low => stats.low += 1,
        }
        stats
    })
}
