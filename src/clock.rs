//! Monotonic time source for step pacing and debouncing.

/// Nanoseconds per second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// A monotonic clock sampled in nanoseconds.
///
/// Only differences between samples are meaningful. Waiting is a busy poll:
/// nothing in this crate sleeps or yields.
pub trait Clock {
    /// Current time in nanoseconds. Never decreases.
    fn now_ns(&mut self) -> u64;

    /// Nanoseconds since `start`.
    #[inline]
    fn elapsed_since(&mut self, start: u64) -> u64 {
        self.now_ns().saturating_sub(start)
    }

    /// Whether at least `interval_ns` has passed since `start`.
    #[inline]
    fn has_elapsed(&mut self, start: u64, interval_ns: u64) -> bool {
        self.elapsed_since(start) >= interval_ns
    }

    /// Spin until `interval_ns` has passed since `start`.
    ///
    /// Returns the sample that satisfied the wait.
    fn wait_until(&mut self, start: u64, interval_ns: u64) -> u64 {
        loop {
            let now = self.now_ns();
            if now.saturating_sub(start) >= interval_ns {
                return now;
            }
            core::hint::spin_loop();
        }
    }
}

/// [`Clock`] backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose zero is now.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ns(&mut self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }
}
