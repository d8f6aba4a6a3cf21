use crate::models::{HazardReport, MarkerDescriptor};
use crate::utils::formatting::format_report_time;
use crate::utils::markup::escape_html;

pub const MARKER_RADIUS: f64 = 10.0;
pub const MARKER_STROKE_COLOR: &str = "#fff";
pub const MARKER_STROKE_WIDTH: f64 = 3.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

const POPUP_STYLE: &str = "background: linear-gradient(135deg, #1dcdfe 0%, #34f5c5 100%); \
color: white; padding: 1rem; border-radius: 8px; box-shadow: 0 5px 15px rgba(0,0,0,0.2);";

/// Project a report into its circle-marker descriptor. Pure: the same report
/// always yields the same descriptor.
pub fn project(report: &HazardReport) -> MarkerDescriptor {
    MarkerDescriptor {
        position: report.position,
        radius: MARKER_RADIUS,
        stroke_color: MARKER_STROKE_COLOR.to_string(),
        stroke_width: MARKER_STROKE_WIDTH,
        stroke_opacity: 1.0,
        fill_color: report.severity.style().color.to_string(),
        fill_opacity: MARKER_FILL_OPACITY,
        popup_html: popup_html(report),
    }
}

pub fn project_all<'a, I>(reports: I) -> Vec<MarkerDescriptor>
where
    I: IntoIterator<Item = &'a HazardReport>,
{
    reports.into_iter().map(project).collect()
}

/// Popup markup. The template is fixed; every report field is escaped.
pub fn popup_html(report: &HazardReport) -> String {
    let mut html = String::new();
    html.push_str(&format!("<div class=\"popup-content\" style=\"{}\">", POPUP_STYLE));
    html.push_str(&format!(
        "<h4 style=\"margin: 0 0 0.5rem 0; font-weight: 700;\">{}</h4>",
        escape_html(&report.hazard_type)
    ));
    html.push_str(&field_row("Location", &report.location));
    html.push_str(&field_row("Severity", &report.severity.as_str().to_uppercase()));
    html.push_str(&field_row("Time", &format_report_time(&report.timestamp)));
    html.push_str(&format!(
        "<p style=\"margin: 0.5rem 0 0 0; font-size: 0.9rem;\">{}</p>",
        escape_html(&report.description)
    ));
    html.push_str("</div>");
    html
}

fn field_row(label: &str, value: &str) -> String {
    format!(
        "<p style=\"margin: 0.25rem 0;\"><strong>{}:</strong> {}</p>",
        label,
        escape_html(value)
    )
}
