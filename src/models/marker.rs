use serde::{Deserialize, Serialize};

use super::report::Position;

/// Circle-marker visual for one report, ready for the mapping provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDescriptor {
    pub position: Position,
    pub radius: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Escaped markup; safe to hand to the provider as-is.
    pub popup_html: String,
}

/// `(lat, lng, weight)` sample for the heat renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint(pub f64, pub f64, pub f64);

impl HeatPoint {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }

    pub fn weight(&self) -> f64 {
        self.2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Normalized intensity threshold in `(0, 1]`.
    pub threshold: f64,
    pub color: &'static str,
}

/// Low, medium, extreme, high. The extreme tier has no marker color of its own.
pub const HEAT_GRADIENT: [GradientStop; 4] = [
    GradientStop { threshold: 0.2, color: "#34f5c5" },
    GradientStop { threshold: 0.5, color: "#1dcdfe" },
    GradientStop { threshold: 0.8, color: "#f39c12" },
    GradientStop { threshold: 1.0, color: "#e74c3c" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayer {
    pub points: Vec<HeatPoint>,
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u32,
    pub gradient: Vec<GradientStop>,
}
