use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::models::{AggregatedStats, StatField};
use crate::surface::StatsSurface;

/// Linear count from `from` to `to`, sampled against the monotonic clock.
/// Frame-rate independent; any sample at or after `start + duration`
/// returns exactly `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub from: u64,
    pub to: u64,
    pub start: Instant,
    pub duration: Duration,
}

impl CountUp {
    pub fn value_at(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let value = self.from as f64 + (self.to as f64 - self.from as f64) * progress;
        let (lo, hi) = (self.from.min(self.to), self.from.max(self.to));
        (value.floor() as u64).clamp(lo, hi)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Count-up trajectory for all four stats fields, sharing one start instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsAnimation {
    pub from: AggregatedStats,
    pub to: AggregatedStats,
    pub start: Instant,
    pub duration: Duration,
}

impl StatsAnimation {
    /// An animation that is already settled on `stats`.
    pub fn settled(stats: AggregatedStats, now: Instant) -> Self {
        Self { from: stats, to: stats, start: now, duration: Duration::ZERO }
    }

    pub fn track(&self, field: StatField) -> CountUp {
        CountUp {
            from: self.from.get(field),
            to: self.to.get(field),
            start: self.start,
            duration: self.duration,
        }
    }

    pub fn sample(&self, now: Instant) -> AggregatedStats {
        let mut out = AggregatedStats::default();
        for field in StatField::ALL {
            out.set(field, self.track(field).value_at(now));
        }
        out
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// New trajectory toward `target`, starting from what is displayed now.
    /// The old trajectory is abandoned.
    pub fn retarget(&self, target: AggregatedStats, now: Instant, duration: Duration) -> Self {
        Self {
            from: self.sample(now),
            to: target,
            start: now,
            duration,
        }
    }
}

pub type SharedAnimation = Arc<Mutex<StatsAnimation>>;

pub(crate) fn current(animation: &SharedAnimation) -> StatsAnimation {
    *animation.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Push the current sample to `surface` once.
pub fn paint(animation: &StatsAnimation, surface: &dyn StatsSurface, now: Instant) {
    let frame = animation.sample(now);
    for field in StatField::ALL {
        surface.display(field, frame.get(field));
    }
}

/// Frame loop: paint every `frame` until the trajectory settles or `cancel`
/// fires. The final paint always shows the exact target.
pub async fn run_count_up(
    animation: SharedAnimation,
    surface: Arc<dyn StatsSurface>,
    frame: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(frame.max(Duration::from_millis(1)));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                trace!("Stats animation superseded");
                return;
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let snapshot = current(&animation);
                paint(&snapshot, surface.as_ref(), now);
                if snapshot.is_finished(now) {
                    trace!(total = snapshot.to.total, "Stats animation settled");
                    return;
                }
            }
        }
    }
}
