//! Animation time sources.
//!
//! Every phase of a scroll is keyed to wall-clock milliseconds rather than to
//! tick counts, so a late or skipped frame simply lands further along the
//! curve. Scrollers read time through the [`Clock`] trait.

use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Instant,
};

/// Monotonic millisecond time source.
pub trait Clock {
    /// Current animation time in milliseconds. Must never decrease.
    fn now_millis(&self) -> i64;
}

/// Clock backed by [`Instant`], counting from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose zero is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Clock advanced by hand.
///
/// Clones share the same time, so a test or a replay tool can keep one handle
/// while the scroller owns another.
///
/// ```
/// use tessera_kinetics::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(16);
/// assert_eq!(clock.now_millis(), 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at the given time.
    pub fn starting_at(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// Moves time forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis.max(0), Ordering::SeqCst);
    }

    /// Jumps to `millis` if it is not earlier than the current time.
    pub fn set(&self, millis: i64) {
        self.millis.fetch_max(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::starting_at(100);
        clock.advance(20);
        assert_eq!(clock.now_millis(), 120);
        clock.set(50);
        assert_eq!(clock.now_millis(), 120);
        clock.advance(-10);
        assert_eq!(clock.now_millis(), 120);
        clock.set(500);
        assert_eq!(clock.now_millis(), 500);
    }

    #[test]
    fn test_system_clock_starts_near_zero() {
        let clock = SystemClock::new();
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(first >= 0);
        assert!(second >= first);
    }
}
