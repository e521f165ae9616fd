//! Timestamp sources.
//!
//! Values are stamped through a [`Clock`] passed in by the caller rather than a
//! process-wide global. [`MonotonicClock`] is the production source;
//! [`ManualClock`] gives deterministic ticks for tests and replays.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Opaque monotonic tick captured when a value is created.
///
/// Ticks are only comparable between values stamped by the same clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeStamp(pub u64);

impl TimeStamp {
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Source of capture timestamps.
pub trait Clock: Send + Sync {
    /// Current tick. Successive calls never go backwards.
    fn now(&self) -> TimeStamp;
}

/// Nanoseconds elapsed since the clock was created, from [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> TimeStamp {
        let nanos = self.origin.elapsed().as_nanos();
        TimeStamp(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Deterministic clock: returns its current tick, then advances by `step`.
#[derive(Debug)]
pub struct ManualClock {
    next: AtomicU64,
    step: u64,
}

impl ManualClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
            step,
        }
    }

    /// Tick the next call to [`Clock::now`] will return.
    pub fn peek(&self) -> TimeStamp {
        TimeStamp(self.next.load(Ordering::SeqCst))
    }

    /// Move the clock forward without stamping anything.
    pub fn advance(&self, ticks: u64) {
        self.next.fetch_add(ticks, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimeStamp {
        TimeStamp(self.next.fetch_add(self.step, Ordering::SeqCst))
    }
}
