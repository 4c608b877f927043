//! Logical time source
//!
//! The engine only ever consumes `now()` in whole seconds. Time must be
//! monotonic; the accrual engine treats a regression as fatal.

use std::sync::atomic::{AtomicU64, Ordering};

/// Supplies the current logical time in seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Unix time is non-negative for any date this engine will see
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Settable clock for tests - the equivalent of advancing block time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at `start` seconds
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Move time forward
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set time to an absolute value (may regress; used to test the
    /// fatal clock-regression path)
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
