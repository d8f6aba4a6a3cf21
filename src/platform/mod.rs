use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{CoastConfig, SeedConfig};
use crate::errors::CoastError;
use crate::geo::{GeolocationProvider, LocationOutcome, LocationRequester, StaticGeolocation};
use crate::intake::{attachments, validate_submission};
use crate::models::{FilterCriteria, HazardReport, Position, PreviewItem, ReportSubmission};
use crate::notify::{NotificationChannel, NotificationSurface, NotificationTiming};
use crate::pipeline::{InMemoryQuery, RenderCoordinator, RenderOutcome, RenderSnapshot, ReportQuery};
use crate::store::seed::{load_seed_file, sample_reports};
use crate::store::ReportStore;
use crate::surface::{LayerCanvas, MapSurface, StatsBoard, StatsSurface};

pub const APPLYING_FILTERS_MESSAGE: &str = "Applying filters...";
pub const FILTERS_APPLIED_MESSAGE: &str = "Filters applied successfully!";
pub const FILTERS_FAILED_MESSAGE: &str = "Unable to apply filters. Please try again.";
pub const REPORT_SUBMITTED_MESSAGE: &str =
    "Report submitted successfully! Thank you for contributing to coastal safety.";
pub const REDRAW_FAILED_MESSAGE: &str =
    "Report saved, but the map could not be updated. Please apply filters again.";
pub const HEAT_UNAVAILABLE_MESSAGE: &str = "Heat map unavailable; showing report markers only.";

/// External collaborators the platform renders to and reads from.
pub struct PlatformPorts {
    pub map: Box<dyn MapSurface>,
    pub stats: Arc<dyn StatsSurface>,
    pub notifications: Arc<dyn NotificationSurface>,
    pub geolocation: Option<Arc<dyn GeolocationProvider>>,
    pub query: Arc<dyn ReportQuery>,
}

impl PlatformPorts {
    /// Headless surfaces, the in-memory query, and the configured fixed
    /// geolocation if any.
    pub fn headless(config: &CoastConfig, notifications: Arc<dyn NotificationSurface>) -> Self {
        let geolocation = config
            .geolocation()
            .fixed_position
            .and_then(|[lat, lng]| Position::new(lat, lng).ok())
            .map(|pos| Arc::new(StaticGeolocation::new(pos)) as Arc<dyn GeolocationProvider>);
        Self {
            map: Box::new(LayerCanvas::new()),
            stats: Arc::new(StatsBoard::new()),
            notifications,
            geolocation,
            query: Arc::new(InMemoryQuery),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FilterOutcome {
    Applied(RenderOutcome),
    /// A newer filter request arrived first; this result was dropped.
    Superseded,
}

/// Everything one map page needs, wired together. Cheap to share behind an
/// `Arc`; all operations take `&self`.
pub struct CoastPlatform {
    config: CoastConfig,
    coordinator: Arc<Mutex<RenderCoordinator>>,
    query: Arc<dyn ReportQuery>,
    notifier: NotificationChannel,
    locator: LocationRequester,
    filter_seq: AtomicU64,
    seeded: AtomicBool,
    heat_notice_shown: AtomicBool,
}

impl CoastPlatform {
    pub fn new(config: CoastConfig, ports: PlatformPorts) -> Self {
        let notifier = NotificationChannel::new(
            ports.notifications,
            NotificationTiming::from(&config.notifications()),
        );
        let locator = LocationRequester::new(
            ports.geolocation,
            config.geolocation().timeout(),
            notifier.clone(),
        );
        let coordinator = RenderCoordinator::new(
            ReportStore::new(),
            ports.map,
            ports.stats,
            config.heat(),
            config.stats(),
        );
        Self {
            config,
            coordinator: Arc::new(Mutex::new(coordinator)),
            query: ports.query,
            notifier,
            locator,
            filter_seq: AtomicU64::new(0),
            seeded: AtomicBool::new(false),
            heat_notice_shown: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &CoastConfig {
        &self.config
    }

    pub fn notifier(&self) -> &NotificationChannel {
        &self.notifier
    }

    /// Seed the store, mount the map, draw everything, and schedule the
    /// post-layout size invalidation. Seeding happens once.
    pub async fn start(&self) -> Result<RenderOutcome, CoastError> {
        let seed = if self.seeded.load(Ordering::SeqCst) {
            Vec::new()
        } else {
            load_seed(&self.config.seed()).await?
        };

        let map = self.config.map();
        let outcome = {
            let mut coord = self.coordinator.lock().await;
            // Set only once a load has succeeded
            if !self.seeded.swap(true, Ordering::SeqCst) {
                coord.extend(seed);
            }
            coord.mount(map.viewport());
            let criteria = coord.criteria().clone();
            let subset = self.query.query(coord.store().all(), &criteria).await?;
            coord.render(criteria, &subset)
        };
        self.after_render(&outcome);

        let coordinator = self.coordinator.clone();
        let delay = map.invalidate_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            coordinator.lock().await.invalidate_size();
        });

        info!(
            reports = outcome.markers,
            heat = outcome.heat_rendered,
            query = self.query.name(),
            "Map started"
        );
        Ok(outcome)
    }

    /// Re-render with `criteria`. Only the latest request renders; older
    /// ones come back as [`FilterOutcome::Superseded`].
    pub async fn apply_filters(&self, criteria: FilterCriteria) -> Result<FilterOutcome, CoastError> {
        let criteria = criteria.normalized();
        let seq = self.filter_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, ?criteria, "Filter request");
        self.notifier.info(APPLYING_FILTERS_MESSAGE);

        let mut coord = self.coordinator.lock().await;
        if self.is_stale(seq) {
            debug!(seq, "Filter request superseded before query");
            return Ok(FilterOutcome::Superseded);
        }

        let subset = match self.query.query(coord.store().all(), &criteria).await {
            Ok(subset) => subset,
            Err(e) => {
                warn!(error = %e, query = self.query.name(), "Filter query failed");
                self.notifier.error(FILTERS_FAILED_MESSAGE);
                return Err(e);
            }
        };
        if self.is_stale(seq) {
            debug!(seq, "Filter result dropped; newer request pending");
            return Ok(FilterOutcome::Superseded);
        }

        let outcome = coord.render(criteria, &subset);
        drop(coord);

        self.after_render(&outcome);
        self.notifier.success(FILTERS_APPLIED_MESSAGE);
        Ok(FilterOutcome::Applied(outcome))
    }

    /// Validate and store a form submission, then redraw under the current
    /// filter.
    pub async fn submit_report(
        &self,
        submission: &ReportSubmission,
    ) -> Result<Arc<HazardReport>, CoastError> {
        let report = match validate_submission(submission) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Report submission rejected");
                self.notifier.notify(e.to_string(), e.notification_level());
                return Err(e);
            }
        };

        let (stored, outcome) = {
            let mut coord = self.coordinator.lock().await;
            let stored = coord.insert(report);
            let criteria = coord.criteria().clone();
            let queried = self.query.query(coord.store().all(), &criteria).await;
            match queried {
                Ok(subset) => (stored, Some(coord.render(criteria, &subset))),
                Err(e) => {
                    warn!(error = %e, query = self.query.name(), "Redraw after submission failed");
                    (stored, None)
                }
            }
        };

        info!(
            id = %stored.id,
            hazard_type = %stored.hazard_type,
            severity = %stored.severity,
            drawn = outcome.is_some(),
            "Report submitted"
        );
        match &outcome {
            Some(outcome) => {
                self.after_render(outcome);
                self.notifier.success(REPORT_SUBMITTED_MESSAGE);
            }
            // Stored, but the map still shows the previous render
            None => {
                self.notifier.error(REDRAW_FAILED_MESSAGE);
            }
        }
        Ok(stored)
    }

    pub async fn request_location(&self) -> LocationOutcome {
        self.locator.request().await
    }

    pub fn geolocation_supported(&self) -> bool {
        self.locator.is_supported()
    }

    pub fn preview_attachments<S: AsRef<str>>(&self, names: &[S]) -> Vec<PreviewItem> {
        attachments::preview(names)
    }

    /// Reports matching `criteria`, without touching the map.
    pub async fn reports(&self, criteria: &FilterCriteria) -> Result<Vec<Arc<HazardReport>>, CoastError> {
        let criteria = criteria.clone().normalized();
        let all = self.coordinator.lock().await.store().snapshot();
        self.query.query(&all, &criteria).await
    }

    pub async fn report(&self, id: &uuid::Uuid) -> Result<Arc<HazardReport>, CoastError> {
        self.coordinator
            .lock()
            .await
            .store()
            .get(id)
            .cloned()
            .ok_or_else(|| CoastError::NotFound(format!("report {}", id)))
    }

    pub async fn snapshot(&self) -> RenderSnapshot {
        self.coordinator.lock().await.snapshot()
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.filter_seq.load(Ordering::SeqCst) != seq
    }

    fn after_render(&self, outcome: &RenderOutcome) {
        if outcome.heat_unavailable && !self.heat_notice_shown.swap(true, Ordering::SeqCst) {
            self.notifier.info(HEAT_UNAVAILABLE_MESSAGE);
        }
    }
}

async fn load_seed(seed: &SeedConfig) -> Result<Vec<HazardReport>, CoastError> {
    let mut reports = if seed.include_samples { sample_reports() } else { Vec::new() };
    if let Some(path) = &seed.path {
        reports.extend(load_seed_file(Path::new(path)).await?);
    }
    Ok(reports)
}
