use crate::config::HeatConfig;
use crate::models::{HazardReport, HeatLayer, HeatPoint, HEAT_GRADIENT};

/// One weighted point per report, in input order.
pub fn aggregate<'a, I>(reports: I) -> Vec<HeatPoint>
where
    I: IntoIterator<Item = &'a HazardReport>,
{
    reports
        .into_iter()
        .map(|r| HeatPoint(r.position.lat, r.position.lng, r.severity.style().weight))
        .collect()
}

/// Wrap the aggregated points with the renderer options and fixed gradient.
pub fn heat_layer<'a, I>(reports: I, config: &HeatConfig) -> HeatLayer
where
    I: IntoIterator<Item = &'a HazardReport>,
{
    HeatLayer {
        points: aggregate(reports),
        radius: config.radius,
        blur: config.blur,
        max_zoom: config.max_zoom,
        gradient: HEAT_GRADIENT.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weight_of;
    use crate::store::seed::sample_reports;

    #[test]
    fn test_one_point_per_report_with_severity_weight() {
        let reports = sample_reports();
        let points = aggregate(&reports);
        assert_eq!(points.len(), reports.len());
        for (point, report) in points.iter().zip(&reports) {
            assert_eq!(point.lat(), report.position.lat);
            assert_eq!(point.lng(), report.position.lng);
            assert_eq!(point.weight(), weight_of(report.severity.as_str()));
        }
    }

    #[test]
    fn test_empty_input() {
        let reports: Vec<HazardReport> = Vec::new();
        assert!(aggregate(&reports).is_empty());
    }

    #[test]
    fn test_layer_options_and_gradient() {
        let reports = sample_reports();
        let layer = heat_layer(&reports, &HeatConfig::default());
        assert_eq!((layer.radius, layer.blur, layer.max_zoom), (30, 20, 17));
        let thresholds: Vec<f64> = layer.gradient.iter().map(|s| s.threshold).collect();
        assert_eq!(thresholds, vec![0.2, 0.5, 0.8, 1.0]);
        assert_eq!(layer.gradient[2].color, "#f39c12");
    }
}
