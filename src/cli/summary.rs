use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use console::style;
use serde_json::json;
use tracing::info;

use crate::api::models::FilterRequest;
use crate::cli::commands::SummaryArgs;
use crate::config::load_config;
use crate::errors::CoastError;
use crate::models::{AggregatedStats, HazardReport, Severity, StatField};
use crate::notify::{ConsoleNotifier, NotificationBoard, NotificationSurface};
use crate::platform::{CoastPlatform, FilterOutcome, PlatformPorts};
use crate::utils::formatting::{format_duration, format_report_time};

pub async fn handle_summary(args: SummaryArgs, quiet: bool) -> Result<(), CoastError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;
    let criteria = FilterRequest {
        hazard_type: args.hazard_type,
        severity: args.severity,
        location: args.location,
        time_range: args.since,
        ..Default::default()
    }
    .into_criteria(Utc::now())?;

    // Keep stdout clean for JSON and quiet runs
    let notifications: Arc<dyn NotificationSurface> = if args.json || quiet {
        Arc::new(NotificationBoard::new())
    } else {
        Arc::new(ConsoleNotifier)
    };
    let ports = PlatformPorts::headless(&config, notifications);
    let platform = CoastPlatform::new(config, ports);

    let started = Instant::now();
    platform.start().await?;
    if let FilterOutcome::Superseded = platform.apply_filters(criteria.clone()).await? {
        return Err(CoastError::Internal("filter request superseded".into()));
    }
    let snapshot = platform.snapshot().await;
    let reports = platform.reports(&criteria).await?;
    info!(
        matched = reports.len(),
        elapsed = %format_duration(started.elapsed().as_millis() as u64),
        "Summary computed"
    );

    if args.json {
        let reports: Vec<&HazardReport> = reports.iter().map(|r| r.as_ref()).collect();
        let out = json!({
            "criteria": snapshot.criteria,
            "stats": snapshot.stats,
            "reports": reports,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_stats(&snapshot.stats);
    if !reports.is_empty() {
        println!();
        println!("{}", style("Reports").bold());
        for report in &reports {
            println!(
                "  {} {} at {} ({})",
                severity_badge(report.severity),
                report.hazard_type,
                report.location,
                format_report_time(&report.timestamp)
            );
        }
    }
    Ok(())
}

fn print_stats(stats: &AggregatedStats) {
    println!("{}", style("Coastal hazard summary").bold());
    for field in StatField::ALL {
        let label = match field {
            StatField::TotalReports => "Total reports",
            StatField::HighSeverity => "High severity",
            StatField::MediumSeverity => "Medium severity",
            StatField::LowSeverity => "Low severity",
        };
        println!("  {:<16} {:>5}", label, stats.get(field));
    }
}

fn severity_badge(severity: Severity) -> console::StyledObject<String> {
    let label = format!("[{}]", severity.as_str().to_uppercase());
    match severity {
        Severity::High => style(label).red(),
        Severity::Medium => style(label).cyan(),
        Severity::Low => style(label).green(),
    }
}
