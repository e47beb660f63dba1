//! Storage traits with optimistic-concurrency write semantics

use crate::types::{PriceCacheEntry, ProviderToken, RateLimitWindow};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a backing store
#[derive(Error, Debug, Clone)]
pub enum StoreError {
  /// A versioned write observed a stale version and was rejected.
  /// The caller decides whether to retry.
  #[error("Write conflict: concurrent writer won")]
  WriteConflict,

  /// Any other backend failure
  #[error("Storage backend error: {0}")]
  Backend(String),
}

impl From<StoreError> for tcg_core::Error {
  fn from(err: StoreError) -> Self {
    tcg_core::Error::Store(err.to_string())
  }
}

/// Persistence for provider bearer tokens
#[async_trait]
pub trait TokenStore: Send + Sync {
  async fn get_token(&self, provider: &str) -> Result<Option<ProviderToken>, StoreError>;

  /// Insert-or-overwrite. Token refresh is safe to perform redundantly,
  /// so this write is last-writer-wins, not versioned.
  async fn put_token(&self, token: ProviderToken) -> Result<(), StoreError>;
}

/// Persistence for the per-provider rate-limit window row.
///
/// Writes are versioned: `expected_version` of `None` asserts the row does
/// not exist yet, `Some(v)` asserts the row is still at version `v`.
/// A mismatch returns [`StoreError::WriteConflict`].
#[async_trait]
pub trait RateLimitStore: Send + Sync {
  async fn read_window(
    &self,
    provider: &str,
  ) -> Result<Option<(RateLimitWindow, u64)>, StoreError>;

  async fn write_window(
    &self,
    provider: &str,
    expected_version: Option<u64>,
    window: RateLimitWindow,
  ) -> Result<(), StoreError>;
}

/// Persistence for cached pricing rows
#[async_trait]
pub trait PriceCache: Send + Sync {
  /// Insert-or-overwrite by the exact (product_id, sku_id-or-absent) key
  async fn upsert(&self, entry: PriceCacheEntry) -> Result<(), StoreError>;

  /// Exact-key point lookup
  async fn get(
    &self,
    product_id: i64,
    sku_id: Option<i64>,
  ) -> Result<Option<PriceCacheEntry>, StoreError>;
}
