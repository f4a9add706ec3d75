//! Hero carousel: slide index plus the auto-advance timer.

use std::future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Default auto-advance period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(4);

/// Current slide position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
}

impl Carousel {
    /// Index of the slide to show for `len` slides, or `None` when empty.
    #[must_use]
    pub const fn current(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else if self.index < len {
            Some(self.index)
        } else {
            Some(0)
        }
    }

    /// Moves to the next slide, wrapping after the last one.
    pub const fn advance(&mut self, len: usize) {
        self.index = match self.current(len) {
            Some(i) if i.saturating_add(1) < len => i.saturating_add(1),
            _ => 0,
        };
    }

    /// Moves to the previous slide, wrapping before the first one.
    pub const fn back(&mut self, len: usize) {
        self.index = match self.current(len) {
            Some(0) => len.saturating_sub(1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
    }
}

/// Auto-advance timer.
///
/// Only runs while the carousel is visible and has slides. Dropping the
/// interval on [`CarouselTimer::sync`] releases the timer, so a hidden
/// carousel never ticks.
#[derive(Debug)]
pub struct CarouselTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl CarouselTimer {
    /// Creates a stopped timer.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Starts the timer when `active` and it is stopped; stops it when not.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn sync(&mut self, active: bool) {
        match (active, self.interval.is_some()) {
            (true, false) => {
                let start = Instant::now()
                    .checked_add(self.period)
                    .unwrap_or_else(Instant::now);
                let mut interval = tokio::time::interval_at(start, self.period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(interval);
                tracing::debug!(period_ms = self.period.as_millis(), "carousel timer started");
            }
            (false, true) => {
                self.interval = None;
                tracing::debug!("carousel timer stopped");
            }
            _ => {}
        }
    }

    /// Whether the timer is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Resolves on the next tick. Pends forever while stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for CarouselTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
