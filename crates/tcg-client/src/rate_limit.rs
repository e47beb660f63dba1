//! Store-backed fixed-window rate limiter
//!
//! One window row per provider, shared by every concurrent invocation and
//! protected by the store's versioned writes. Two failure modes get two
//! different responses: quota exhaustion is expected backpressure and maps
//! to a deterministic wait until the window rolls over, while a write
//! conflict is accidental contention on the counter row and maps to a
//! short, capped exponential backoff.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tcg_core::{
  Clock, Error, Result, CONFLICT_BACKOFF_BASE_MS, CONFLICT_BACKOFF_CAP_MS, CONFLICT_MAX_ATTEMPTS,
};
use tcg_store::{RateLimitStore, RateLimitWindow, StoreError};
use tracing::{debug, instrument, warn};

/// Outcome of a single acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquire {
  pub ok: bool,
  /// Suggested wait before retrying, including jitter; 0 when `ok`
  pub wait_ms: i64,
}

/// Fixed-window limiter over a [`RateLimitStore`]
pub struct FixedWindowLimiter {
  store: Arc<dyn RateLimitStore>,
  clock: Arc<dyn Clock>,
}

impl FixedWindowLimiter {
  pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
    Self { store, clock }
  }

  /// Try to take one slot in the current window. Non-throwing with respect
  /// to quota: exhaustion is reported as `ok: false` with a wait hint.
  /// Store conflicts surface as [`StoreError::WriteConflict`] for the
  /// caller to retry.
  pub async fn try_acquire(
    &self,
    provider: &str,
    rate: u32,
    window_ms: i64,
  ) -> std::result::Result<Acquire, StoreError> {
    let now = self.clock.now_ms();
    let window_start = now - now.rem_euclid(window_ms);

    match self.store.read_window(provider).await? {
      Some((window, version))
        if window.window_start == window_start && window.window_ms == window_ms =>
      {
        if window.count >= rate {
          // Jitter spreads out synchronized retries across callers
          let jitter_cap = (window_ms / i64::from(rate.max(1))).max(1);
          let jitter = rand::thread_rng().gen_range(0..=jitter_cap);
          let wait_ms = (window.window_start + window.window_ms - now) + jitter;
          return Ok(Acquire { ok: false, wait_ms });
        }
        let next = RateLimitWindow { count: window.count + 1, ..window };
        self.store.write_window(provider, Some(version), next).await?;
        Ok(Acquire { ok: true, wait_ms: 0 })
      }
      stale => {
        // No row yet, or the stored window no longer matches: reset
        let expected = stale.map(|(_, version)| version);
        let fresh = RateLimitWindow { window_start, window_ms, count: 1 };
        self.store.write_window(provider, expected, fresh).await?;
        Ok(Acquire { ok: true, wait_ms: 0 })
      }
    }
  }

  /// Block until a slot is granted or `deadline` would be exceeded.
  ///
  /// Quota waits sleep the suggested `wait_ms` and loop. Write conflicts
  /// back off exponentially with jitter, capped at
  /// [`CONFLICT_BACKOFF_CAP_MS`], for at most [`CONFLICT_MAX_ATTEMPTS`]
  /// consecutive attempts before the conflict is surfaced as fatal.
  #[instrument(skip(self), fields(provider = %provider))]
  pub async fn acquire_with_retry(
    &self,
    provider: &str,
    rate: u32,
    window_ms: i64,
    deadline: Duration,
  ) -> Result<()> {
    let started = Instant::now();
    let mut conflicts: u32 = 0;

    loop {
      match self.try_acquire(provider, rate, window_ms).await {
        Ok(Acquire { ok: true, .. }) => return Ok(()),
        Ok(Acquire { wait_ms, .. }) => {
          conflicts = 0;
          let wait = Duration::from_millis(wait_ms.max(0) as u64);
          if started.elapsed() + wait > deadline {
            return Err(Error::RateLimit(provider.to_string()));
          }
          debug!("rate window full, waiting {}ms", wait_ms);
          tokio::time::sleep(wait).await;
        }
        Err(StoreError::WriteConflict) => {
          conflicts += 1;
          if conflicts > CONFLICT_MAX_ATTEMPTS {
            return Err(Error::Store(format!(
              "rate-limit window for {} still conflicted after {} attempts",
              provider, CONFLICT_MAX_ATTEMPTS
            )));
          }
          let base = CONFLICT_BACKOFF_BASE_MS
            .saturating_mul(1 << (conflicts - 1).min(16))
            .min(CONFLICT_BACKOFF_CAP_MS);
          let jitter = rand::thread_rng().gen_range(0..=base / 2 + 1);
          let wait = Duration::from_millis(base + jitter);
          if started.elapsed() + wait > deadline {
            return Err(Error::RateLimit(provider.to_string()));
          }
          warn!("window row conflict (attempt {}), backing off {:?}", conflicts, wait);
          tokio::time::sleep(wait).await;
        }
        Err(other) => return Err(other.into()),
      }
    }
  }
}

impl std::fmt::Debug for FixedWindowLimiter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FixedWindowLimiter").finish()
  }
}
