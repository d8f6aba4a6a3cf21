use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use console::style;
use dashmap::DashMap;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{Notification, NotificationLevel, NotificationSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    Visible,
    Exiting,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    #[serde(flatten)]
    pub notification: Notification,
    pub phase: NotificationPhase,
    pub background: &'static str,
}

/// In-memory notification display, read by the API. Every shown message is
/// also logged.
#[derive(Clone, Default)]
pub struct NotificationBoard {
    entries: Arc<DashMap<Uuid, BoardEntry>>,
    detached: Arc<AtomicBool>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, id: Uuid) -> Option<NotificationPhase> {
        self.entries.get(&id).map(|e| e.phase)
    }

    /// Currently displayed notifications, oldest first.
    pub fn entries(&self) -> Vec<BoardEntry> {
        let mut entries: Vec<BoardEntry> = self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.notification.created_at);
        entries
    }

    pub fn list(&self) -> Vec<Notification> {
        self.entries().into_iter().map(|e| e.notification).collect()
    }

    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
        self.entries.clear();
    }
}

impl NotificationSurface for NotificationBoard {
    fn show(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Error => warn!(message = %notification.message, "Notification"),
            level => info!(level = %level, message = %notification.message, "Notification"),
        }
        self.entries.insert(
            notification.id,
            BoardEntry {
                notification: notification.clone(),
                phase: NotificationPhase::Visible,
                background: notification.level.background(),
            },
        );
    }

    fn begin_exit(&self, id: Uuid) {
        if let Some(mut entry) = self.entries.get_mut(&id) {
            entry.phase = NotificationPhase::Exiting;
        }
    }

    fn remove(&self, id: Uuid) {
        self.entries.remove(&id);
    }

    fn is_attached(&self) -> bool {
        !self.detached.load(Ordering::SeqCst)
    }
}

/// Prints notifications to stderr, styled per level.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl NotificationSurface for ConsoleNotifier {
    fn show(&self, notification: &Notification) {
        let badge = match notification.level {
            NotificationLevel::Info => style("ℹ").cyan(),
            NotificationLevel::Success => style("✓").green(),
            NotificationLevel::Error => style("✗").red(),
        };
        eprintln!("  {} {}", badge, notification.message);
    }

    fn begin_exit(&self, _id: Uuid) {}

    fn remove(&self, _id: Uuid) {}
}
