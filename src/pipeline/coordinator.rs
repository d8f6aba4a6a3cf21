use std::sync::{Arc, Mutex, PoisonError};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::animation::{self, SharedAnimation, StatsAnimation};
use super::state::{RenderOutcome, RenderPhase, RenderSnapshot};
use super::{density, projector, stats};
use crate::config::{HeatConfig, StatsConfig};
use crate::errors::CoastError;
use crate::models::{AggregatedStats, FilterCriteria, HazardReport, HeatLayer, MarkerDescriptor};
use crate::store::ReportStore;
use crate::surface::{LayerId, MapSurface, StatsSurface, Viewport};

/// Owns the report store and everything currently drawn. Every render swaps
/// the full marker set and heat layer in one synchronous call, so holders of
/// `&self` never see two generations mixed.
pub struct RenderCoordinator {
    store: ReportStore,
    criteria: FilterCriteria,
    map: Box<dyn MapSurface>,
    stats_surface: Arc<dyn StatsSurface>,
    heat_config: HeatConfig,
    stats_config: StatsConfig,
    viewport: Option<Viewport>,
    markers: Vec<(LayerId, MarkerDescriptor)>,
    heat: Option<HeatLayer>,
    heat_layer_id: Option<LayerId>,
    generation: u64,
    target: AggregatedStats,
    animation: SharedAnimation,
    animation_cancel: Option<CancellationToken>,
    phase: RenderPhase,
}

impl RenderCoordinator {
    pub fn new(
        store: ReportStore,
        map: Box<dyn MapSurface>,
        stats_surface: Arc<dyn StatsSurface>,
        heat_config: HeatConfig,
        stats_config: StatsConfig,
    ) -> Self {
        let zero = AggregatedStats::default();
        Self {
            store,
            criteria: FilterCriteria::default(),
            map,
            stats_surface,
            heat_config,
            stats_config,
            viewport: None,
            markers: Vec::new(),
            heat: None,
            heat_layer_id: None,
            generation: 0,
            target: zero,
            animation: Arc::new(Mutex::new(StatsAnimation::settled(zero, Instant::now()))),
            animation_cancel: None,
            phase: RenderPhase::Idle,
        }
    }

    /// Point the map at its initial view.
    pub fn mount(&mut self, viewport: Viewport) {
        info!(
            lat = viewport.center.lat,
            lng = viewport.center.lng,
            zoom = viewport.zoom,
            "Mounting map"
        );
        self.map.set_view(&viewport);
        self.viewport = Some(viewport);
    }

    pub fn invalidate_size(&mut self) {
        debug!("Invalidating map size");
        self.map.invalidate_size();
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn insert(&mut self, report: HazardReport) -> Arc<HazardReport> {
        self.store.insert(report)
    }

    pub fn extend(&mut self, reports: impl IntoIterator<Item = HazardReport>) {
        self.store.extend(reports);
    }

    /// Criteria behind the current render.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> RenderPhase {
        match self.phase {
            RenderPhase::AnimatingStats
                if animation::current(&self.animation).is_finished(Instant::now()) =>
            {
                RenderPhase::Idle
            }
            phase => phase,
        }
    }

    /// Replace everything on the map with `subset` and retarget the stats.
    pub fn render(&mut self, criteria: FilterCriteria, subset: &[Arc<HazardReport>]) -> RenderOutcome {
        self.set_phase(RenderPhase::Computing);
        let reports: Vec<&HazardReport> = subset.iter().map(|r| r.as_ref()).collect();
        let markers = projector::project_all(reports.iter().copied());
        let heat = self
            .heat_config
            .enabled
            .then(|| density::heat_layer(reports.iter().copied(), &self.heat_config));
        let target = stats::summarize(reports.iter().copied());

        self.set_phase(RenderPhase::Rendering);
        for (id, _) in self.markers.drain(..) {
            self.map.remove_layer(id);
        }
        if let Some(id) = self.heat_layer_id.take() {
            self.map.remove_layer(id);
        }

        self.markers = markers
            .into_iter()
            .map(|marker| (self.map.add_marker(&marker), marker))
            .collect();

        let mut heat_unavailable = false;
        if let Some(layer) = &heat {
            match self.map.add_heat_layer(layer) {
                Ok(id) => self.heat_layer_id = Some(id),
                Err(CoastError::CapabilityUnavailable(reason)) => {
                    debug!(reason = %reason, "Heat layer skipped");
                    heat_unavailable = true;
                }
                Err(e) => warn!(error = %e, "Heat layer failed to render"),
            }
        }

        // Only keep the layer the map actually holds
        self.heat = heat.filter(|_| self.heat_layer_id.is_some());
        self.criteria = criteria;
        self.generation += 1;

        self.set_phase(RenderPhase::AnimatingStats);
        self.retarget_stats(target);

        let outcome = RenderOutcome {
            generation: self.generation,
            markers: self.markers.len(),
            heat_points: self.heat.as_ref().map_or(0, |h| h.points.len()),
            heat_rendered: self.heat_layer_id.is_some(),
            heat_unavailable,
            stats: target,
        };
        debug!(
            generation = outcome.generation,
            markers = outcome.markers,
            heat_rendered = outcome.heat_rendered,
            total = target.total,
            "Render complete"
        );
        outcome
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let now = Instant::now();
        RenderSnapshot {
            generation: self.generation,
            phase: self.phase(),
            viewport: self.viewport.clone(),
            criteria: self.criteria.clone(),
            markers: self.markers.iter().map(|(_, m)| m.clone()).collect(),
            heat: self.heat.clone(),
            heat_rendered: self.heat_layer_id.is_some(),
            stats: self.target,
            displayed: animation::current(&self.animation).sample(now),
        }
    }

    fn set_phase(&mut self, phase: RenderPhase) {
        debug!(generation = self.generation, from = %self.phase, to = %phase, "Render phase");
        self.phase = phase;
    }

    fn retarget_stats(&mut self, target: AggregatedStats) {
        self.target = target;
        if let Some(token) = self.animation_cancel.take() {
            token.cancel();
        }

        let now = Instant::now();
        let duration = self.stats_config.animation();
        let runtime = tokio::runtime::Handle::try_current();

        let mut trajectory = self.animation.lock().unwrap_or_else(PoisonError::into_inner);
        match runtime {
            Ok(runtime) if !duration.is_zero() => {
                *trajectory = trajectory.retarget(target, now, duration);
                drop(trajectory);

                let token = CancellationToken::new();
                runtime.spawn(animation::run_count_up(
                    self.animation.clone(),
                    self.stats_surface.clone(),
                    self.stats_config.frame(),
                    token.clone(),
                ));
                self.animation_cancel = Some(token);
            }
            _ => {
                *trajectory = StatsAnimation::settled(target, now);
                let settled = *trajectory;
                drop(trajectory);
                animation::paint(&settled, self.stats_surface.as_ref(), now);
            }
        }
    }
}

impl Drop for RenderCoordinator {
    fn drop(&mut self) {
        if let Some(token) = self.animation_cancel.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, StatField};
    use crate::pipeline::filter::apply;
    use crate::store::seed::sample_reports;
    use crate::surface::{LayerCanvas, StatsBoard};
    use std::time::Duration;

    fn stats(total: u64, high: u64, medium: u64, low: u64) -> AggregatedStats {
        AggregatedStats { total, high, medium, low }
    }

    fn coordinator(canvas: &LayerCanvas, board: &StatsBoard) -> RenderCoordinator {
        RenderCoordinator::new(
            ReportStore::with_reports(sample_reports()),
            Box::new(canvas.clone()),
            Arc::new(board.clone()),
            HeatConfig::default(),
            StatsConfig::default(),
        )
    }

    fn render_with(coord: &mut RenderCoordinator, criteria: FilterCriteria) -> RenderOutcome {
        let subset = apply(coord.store().all(), &criteria);
        coord.render(criteria, &subset)
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_render_draws_everything() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        let outcome = render_with(&mut coord, FilterCriteria::default());

        assert_eq!(outcome.generation, 1);
        assert_eq!(outcome.markers, 5);
        assert!(outcome.heat_rendered);
        assert_eq!(outcome.stats, stats(5, 3, 1, 1));
        assert_eq!(canvas.marker_count(), 5);
        assert_eq!(canvas.heat_point_count(), Some(5));
        assert_eq!(coord.phase(), RenderPhase::AnimatingStats);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(board.displayed(), stats(5, 3, 1, 1));
        assert_eq!(coord.phase(), RenderPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rerender_replaces_previous_layers() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        render_with(&mut coord, FilterCriteria::default());
        let outcome = render_with(&mut coord, FilterCriteria::default().with_severity(Severity::High));

        assert_eq!(outcome.generation, 2);
        assert_eq!(canvas.marker_count(), 3);
        assert_eq!(canvas.heat_point_count(), Some(3));
        assert_eq!(canvas.layer_count(), 4);
        assert!(canvas.markers().iter().all(|m| m.fill_color == "#e74c3c"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_subset_clears_map() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        render_with(&mut coord, FilterCriteria::default());
        let outcome = render_with(&mut coord, FilterCriteria::default().with_location("Atlantis"));

        assert_eq!(outcome.markers, 0);
        assert_eq!(canvas.marker_count(), 0);
        assert_eq!(canvas.heat_point_count(), Some(0));
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(board.displayed(), AggregatedStats::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_heat_renderer_degrades() {
        let (canvas, board) = (LayerCanvas::without_heat(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        let outcome = render_with(&mut coord, FilterCriteria::default());

        assert!(!outcome.heat_rendered);
        assert!(outcome.heat_unavailable);
        assert_eq!(canvas.marker_count(), 5);
        assert_eq!(canvas.heat_point_count(), None);
        assert_eq!(outcome.heat_points, 0);
        let snap = coord.snapshot();
        assert!(!snap.heat_rendered);
        assert!(snap.heat.is_none());
        assert_eq!(snap.markers.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_heat_disabled_in_config() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = RenderCoordinator::new(
            ReportStore::with_reports(sample_reports()),
            Box::new(canvas.clone()),
            Arc::new(board.clone()),
            HeatConfig { enabled: false, ..HeatConfig::default() },
            StatsConfig::default(),
        );
        let outcome = render_with(&mut coord, FilterCriteria::default());
        assert!(!outcome.heat_rendered);
        assert!(!outcome.heat_unavailable);
        assert!(coord.snapshot().heat.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retarget_mid_animation_lands_on_latest() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        render_with(&mut coord, FilterCriteria::default());

        tokio::time::sleep(Duration::from_millis(500)).await;
        let midway = coord.snapshot().displayed;
        assert!(midway.total > 0 && midway.total < 5);

        render_with(&mut coord, FilterCriteria::default().with_severity(Severity::High));
        assert_eq!(coord.snapshot().displayed.total, midway.total);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(board.displayed(), stats(3, 3, 0, 0));
    }

    #[test]
    fn test_without_runtime_stats_snap() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        render_with(&mut coord, FilterCriteria::default());
        assert_eq!(board.displayed(), stats(5, 3, 1, 1));
        assert_eq!(coord.phase(), RenderPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_is_one_generation() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        render_with(&mut coord, FilterCriteria::default());
        render_with(&mut coord, FilterCriteria::default().with_severity(Severity::Low));

        let snap = coord.snapshot();
        assert_eq!(snap.generation, 2);
        assert_eq!(snap.markers.len(), 1);
        assert_eq!(snap.heat.as_ref().map(|h| h.points.len()), Some(1));
        assert_eq!(snap.stats.get(StatField::LowSeverity), 1);
        assert_eq!(snap.criteria.severity, Some(Severity::Low));
    }

    #[tokio::test]
    async fn test_mount_and_invalidate() {
        let (canvas, board) = (LayerCanvas::new(), StatsBoard::new());
        let mut coord = coordinator(&canvas, &board);
        let viewport = crate::config::MapConfig::default().viewport();
        coord.mount(viewport.clone());
        coord.invalidate_size();
        assert_eq!(canvas.viewport(), Some(viewport));
        assert_eq!(canvas.invalidation_count(), 1);
    }
}
