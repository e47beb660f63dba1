//! Epoch-millisecond clock abstraction.
//!
//! Token expiry and rate-limit windows are all arithmetic on epoch
//! milliseconds; injecting the clock keeps that arithmetic testable
//! without sleeping through real windows.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" in epoch milliseconds
pub trait Clock: Send + Sync + std::fmt::Debug {
  fn now_ms(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_ms(&self) -> i64 {
    chrono::Utc::now().timestamp_millis()
  }
}

/// Manually-driven clock for tests
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
  pub fn new(now_ms: i64) -> Self {
    Self(AtomicI64::new(now_ms))
  }

  pub fn set(&self, now_ms: i64) {
    self.0.store(now_ms, Ordering::SeqCst);
  }

  pub fn advance(&self, delta_ms: i64) {
    self.0.fetch_add(delta_ms, Ordering::SeqCst);
  }
}

impl Clock for ManualClock {
  fn now_ms(&self) -> i64 {
    self.0.load(Ordering::SeqCst)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_system_clock_is_current() {
    let now = SystemClock.now_ms();
    // Sanity bound: after 2020-01-01, before 2100
    assert!(now > 1_577_836_800_000);
    assert!(now < 4_102_444_800_000);
  }

  #[test]
  fn test_manual_clock() {
    let clock = ManualClock::new(1_000);
    assert_eq!(clock.now_ms(), 1_000);
    clock.advance(500);
    assert_eq!(clock.now_ms(), 1_500);
    clock.set(0);
    assert_eq!(clock.now_ms(), 0);
  }
}
