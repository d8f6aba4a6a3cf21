pub mod surfaces;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::NotificationConfig;

pub use surfaces::{ConsoleNotifier, NotificationBoard, NotificationPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Background treatment for toast-style renderers.
    pub fn background(&self) -> &'static str {
        match self {
            Self::Success => "linear-gradient(135deg, #34f5c5 0%, #1dcdfe 100%)",
            Self::Error => "linear-gradient(135deg, #e74c3c 0%, #c0392b 100%)",
            Self::Info => "linear-gradient(135deg, #1dcdfe 0%, #34f5c5 100%)",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: DateTime<Utc>,
}

/// Where notifications are rendered. Calls arrive from timer tasks, possibly
/// after the surface went away; implementations must tolerate that.
pub trait NotificationSurface: Send + Sync {
    fn show(&self, notification: &Notification);

    /// Start the exit transition.
    fn begin_exit(&self, id: Uuid);

    fn remove(&self, id: Uuid);

    /// False once the display is gone; pending lifecycle steps are dropped.
    fn is_attached(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub visible: Duration,
    pub exit: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(3000),
            exit: Duration::from_millis(300),
        }
    }
}

impl From<&NotificationConfig> for NotificationTiming {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            visible: Duration::from_millis(config.visible_ms),
            exit: Duration::from_millis(config.exit_ms),
        }
    }
}

/// Fire-and-forget user feedback. Each notification runs its own lifecycle
/// task; there is no queue and no dedup.
#[derive(Clone)]
pub struct NotificationChannel {
    surface: Arc<dyn NotificationSurface>,
    timing: NotificationTiming,
}

impl NotificationChannel {
    pub fn new(surface: Arc<dyn NotificationSurface>, timing: NotificationTiming) -> Self {
        Self { surface, timing }
    }

    pub fn timing(&self) -> NotificationTiming {
        self.timing
    }

    /// Show `message` and schedule its exit and removal. Never blocks. Outside
    /// a tokio runtime the notification is dropped.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            level,
            created_at: Utc::now(),
        };
        let id = notification.id;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(level = %level, message = %notification.message, "No runtime; notification dropped");
            return id;
        };

        let surface = self.surface.clone();
        let timing = self.timing;
        runtime.spawn(async move {
            if !surface.is_attached() {
                debug!(id = %id, "Notification surface gone; dropped");
                return;
            }
            surface.show(&notification);
            tokio::time::sleep(timing.visible).await;
            if !surface.is_attached() {
                return;
            }
            surface.begin_exit(id);
            tokio::time::sleep(timing.exit).await;
            surface.remove(id);
        });
        id
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationLevel::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationLevel::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationLevel::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    fn channel() -> (NotificationChannel, NotificationBoard) {
        let board = NotificationBoard::new();
        (NotificationChannel::new(Arc::new(board.clone()), NotificationTiming::default()), board)
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_lifecycle_timing() {
        let (channel, board) = channel();
        let start = Instant::now();
        let id = channel.error("Unable to get location. Please enter manually.");

        sleep(Duration::from_millis(10)).await;
        assert_eq!(board.phase(id), Some(NotificationPhase::Visible));

        sleep_until(start, 2990).await;
        assert_eq!(board.phase(id), Some(NotificationPhase::Visible));

        sleep_until(start, 3010).await;
        assert_eq!(board.phase(id), Some(NotificationPhase::Exiting));

        sleep_until(start, 3290).await;
        assert_eq!(board.phase(id), Some(NotificationPhase::Exiting));

        sleep_until(start, 3310).await;
        assert_eq!(board.phase(id), None);
    }

    async fn sleep_until(start: Instant, ms: u64) {
        tokio::time::sleep_until(start + Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_notifications_not_deduped() {
        let (channel, board) = channel();
        channel.info("Applying filters...");
        channel.info("Applying filters...");
        channel.success("Filters applied successfully!");
        sleep(Duration::from_millis(1)).await;
        let shown = board.list();
        assert_eq!(shown.len(), 3);
        assert_eq!(shown.iter().filter(|n| n.level == NotificationLevel::Info).count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_surface_drops_notifications() {
        let (channel, board) = channel();
        board.detach();
        let id = channel.error("nobody is watching");
        sleep(Duration::from_millis(10)).await;
        assert_eq!(board.phase(id), None);
    }

    #[test]
    fn test_no_runtime_does_not_panic() {
        let (channel, board) = channel();
        channel.info("dropped");
        assert!(board.list().is_empty());
    }

    #[test]
    fn test_levels_have_distinct_treatment() {
        let backgrounds = [
            NotificationLevel::Info.background(),
            NotificationLevel::Success.background(),
            NotificationLevel::Error.background(),
        ];
        assert_ne!(backgrounds[0], backgrounds[1]);
        assert_ne!(backgrounds[1], backgrounds[2]);
        assert_ne!(backgrounds[0], backgrounds[2]);
    }
}
