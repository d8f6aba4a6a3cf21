use serde::Serialize;

use crate::models::{AggregatedStats, FilterCriteria, HeatLayer, MarkerDescriptor};
use crate::surface::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderPhase {
    Idle,
    Computing,
    Rendering,
    AnimatingStats,
}

impl std::fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Computing => write!(f, "computing"),
            Self::Rendering => write!(f, "rendering"),
            Self::AnimatingStats => write!(f, "animating-stats"),
        }
    }
}

/// What a single render put on the surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutcome {
    pub generation: u64,
    pub markers: usize,
    pub heat_points: usize,
    pub heat_rendered: bool,
    /// Set when the heat layer was skipped because the map has no heat renderer.
    pub heat_unavailable: bool,
    pub stats: AggregatedStats,
}

/// Consistent view of one render generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub generation: u64,
    pub phase: RenderPhase,
    pub viewport: Option<Viewport>,
    pub criteria: FilterCriteria,
    pub markers: Vec<MarkerDescriptor>,
    pub heat: Option<HeatLayer>,
    pub heat_rendered: bool,
    /// Where the stats animation is heading.
    pub stats: AggregatedStats,
    /// What the stats display shows right now.
    pub displayed: AggregatedStats,
}
