use std::sync::{Arc, Mutex, PoisonError};

use crate::models::{AggregatedStats, StatField};

/// Output port for the numeric stats display.
pub trait StatsSurface: Send + Sync {
    fn display(&self, field: StatField, value: u64);
}

/// Headless stats display holding the last painted value of each field.
#[derive(Debug, Clone, Default)]
pub struct StatsBoard {
    shown: Arc<Mutex<AggregatedStats>>,
}

impl StatsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displayed(&self) -> AggregatedStats {
        *self.shown.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StatsSurface for StatsBoard {
    fn display(&self, field: StatField, value: u64) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set(field, value);
    }
}
