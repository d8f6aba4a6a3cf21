use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::provider::GeolocationProvider;
use crate::errors::CoastError;
use crate::models::{LocationFill, Position};
use crate::notify::NotificationChannel;

pub const LOCATED_MESSAGE: &str = "Location obtained successfully!";
pub const FAILED_MESSAGE: &str = "Unable to get location. Please enter manually.";
pub const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this device.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LocationOutcome {
    /// Form fields to fill in.
    Located(LocationFill),
    /// Denied, failed or timed out; the user enters coordinates by hand.
    Failed { reason: String },
    Unsupported,
    /// A newer request replaced this one; its result was dropped.
    Superseded,
}

/// Runs geolocation lookups one at a time. A new request cancels the one in
/// flight; every outcome is reported through the notification channel and
/// nothing is returned as an error.
pub struct LocationRequester {
    provider: Option<Arc<dyn GeolocationProvider>>,
    timeout: Duration,
    notifier: NotificationChannel,
    in_flight: Mutex<Option<(u64, CancellationToken)>>,
    seq: AtomicU64,
}

impl LocationRequester {
    pub fn new(
        provider: Option<Arc<dyn GeolocationProvider>>,
        timeout: Duration,
        notifier: NotificationChannel,
    ) -> Self {
        Self {
            provider,
            timeout,
            notifier,
            in_flight: Mutex::new(None),
            seq: AtomicU64::new(0),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn request(&self) -> LocationOutcome {
        let Some(provider) = self.provider.clone() else {
            self.notifier.error(UNSUPPORTED_MESSAGE);
            return LocationOutcome::Unsupported;
        };

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace((seq, token.clone()));
        if let Some((_, previous)) = previous {
            previous.cancel();
        }

        let result = tokio::select! {
            _ = token.cancelled() => {
                debug!(provider = provider.provider_name(), "Geolocation request superseded");
                return LocationOutcome::Superseded;
            }
            r = tokio::time::timeout(self.timeout, provider.current_position()) => r,
        };
        self.finish(seq);

        let coords = match result {
            Ok(Ok(coords)) => Position::new(coords.latitude, coords.longitude),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CoastError::Timeout(format!(
                "geolocation did not answer within {}ms",
                self.timeout.as_millis()
            ))),
        };

        match coords {
            Ok(position) => {
                info!(lat = position.lat, lng = position.lng, "Location obtained");
                self.notifier.success(LOCATED_MESSAGE);
                LocationOutcome::Located(LocationFill::from_coordinates(position.lat, position.lng))
            }
            Err(e) => {
                warn!(error = %e, provider = provider.provider_name(), "Geolocation failed");
                self.notifier.error(FAILED_MESSAGE);
                LocationOutcome::Failed { reason: e.to_string() }
            }
        }
    }

    fn finish(&self, seq: u64) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        // A newer request owns the slot once it has replaced us
        if slot.as_ref().is_some_and(|(current, _)| *current == seq) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::provider::{Coordinates, DeniedGeolocation, StaticGeolocation};
    use crate::notify::{NotificationBoard, NotificationLevel, NotificationTiming};
    use async_trait::async_trait;

    struct SlowGeolocation {
        delay: Duration,
        coords: Coordinates,
    }

    #[async_trait]
    impl GeolocationProvider for SlowGeolocation {
        async fn current_position(&self) -> Result<Coordinates, CoastError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.coords)
        }

        fn provider_name(&self) -> &str {
            "slow"
        }
    }

    struct HangingGeolocation;

    #[async_trait]
    impl GeolocationProvider for HangingGeolocation {
        async fn current_position(&self) -> Result<Coordinates, CoastError> {
            std::future::pending().await
        }

        fn provider_name(&self) -> &str {
            "hanging"
        }
    }

    fn requester(provider: Option<Arc<dyn GeolocationProvider>>) -> (LocationRequester, NotificationBoard) {
        let board = NotificationBoard::new();
        let channel = NotificationChannel::new(Arc::new(board.clone()), NotificationTiming::default());
        (LocationRequester::new(provider, Duration::from_secs(10), channel), board)
    }

    async fn levels(board: &NotificationBoard) -> Vec<NotificationLevel> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        board.list().into_iter().map(|n| n.level).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_fills_form() {
        let provider = StaticGeolocation::new(Position::new(15.4909, 73.8278).unwrap());
        let (req, board) = requester(Some(Arc::new(provider)));
        let outcome = req.request().await;
        assert_eq!(
            outcome,
            LocationOutcome::Located(LocationFill {
                latitude: "15.490900".into(),
                longitude: "73.827800".into(),
                location: "15.4909, 73.8278".into(),
            })
        );
        assert_eq!(levels(&board).await, vec![NotificationLevel::Success]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_notifies_error() {
        let (req, board) = requester(Some(Arc::new(DeniedGeolocation)));
        assert!(matches!(req.request().await, LocationOutcome::Failed { .. }));
        let shown = {
            tokio::time::sleep(Duration::from_millis(1)).await;
            board.list()
        };
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, NotificationLevel::Error);
        assert_eq!(shown[0].message, FAILED_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out() {
        let (req, board) = requester(Some(Arc::new(HangingGeolocation)));
        match req.request().await {
            LocationOutcome::Failed { reason } => assert!(reason.contains("10000ms")),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(levels(&board).await, vec![NotificationLevel::Error]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_without_provider() {
        let (req, board) = requester(None);
        assert!(!req.is_supported());
        assert_eq!(req.request().await, LocationOutcome::Unsupported);
        let shown = {
            tokio::time::sleep(Duration::from_millis(1)).await;
            board.list()
        };
        assert_eq!(shown[0].message, UNSUPPORTED_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_request_supersedes() {
        let provider = SlowGeolocation {
            delay: Duration::from_secs(2),
            coords: Coordinates { latitude: 8.5, longitude: 76.9 },
        };
        let (req, board) = requester(Some(Arc::new(provider)));
        let req = Arc::new(req);

        let first = tokio::spawn({
            let req = req.clone();
            async move { req.request().await }
        });
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = req.request().await;

        assert_eq!(first.await.unwrap(), LocationOutcome::Superseded);
        assert!(matches!(second, LocationOutcome::Located(_)));
        // Only the surviving request reports back
        assert_eq!(levels(&board).await, vec![NotificationLevel::Success]);
    }
}
