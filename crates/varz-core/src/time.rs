//! Time source and helpers.
//!
//! Times are plain `u64` seconds. The engine never reads the wall clock
//! directly; it asks an injected [`Clock`], which tests replace with
//! [`StubClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the unix epoch (or any monotonic-ish origin).
pub type VarzTime = u64;

pub const SEC_IN_MIN: u64 = 60;
pub const MIN_IN_HOUR: u64 = 60;
pub const HOURS_IN_DAY: u64 = 24;

/// Current-time capability.
pub trait Clock: Send + Sync {
    fn now(&self) -> VarzTime;
}

/// Wall clock, seconds granularity.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> VarzTime {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Fixed, settable clock for deterministic tests.
#[derive(Debug, Default)]
pub struct StubClock {
    value: AtomicU64,
}

impl StubClock {
    pub fn new(value: VarzTime) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }

    pub fn set(&self, value: VarzTime) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.value.fetch_add(secs, Ordering::Relaxed);
    }
}

impl Clock for StubClock {
    fn now(&self) -> VarzTime {
        self.value.load(Ordering::Relaxed)
    }
}

/// Whole minutes elapsed since time zero. Leap seconds are ignored.
pub fn minutes_since_epoch(time: VarzTime) -> u64 {
    time / SEC_IN_MIN
}

/// Build a time value from a duration broken into parts.
///
/// Saturates at `u64::MAX` instead of wrapping.
pub fn make_time(days: u64, hours: u64, minutes: u64, seconds: u64) -> VarzTime {
    let hours = hours.saturating_add(days.saturating_mul(HOURS_IN_DAY));
    let minutes = minutes.saturating_add(hours.saturating_mul(MIN_IN_HOUR));
    seconds.saturating_add(minutes.saturating_mul(SEC_IN_MIN))
}
