//! In-memory store implementation
//!
//! Backs all three repositories with mutex-guarded maps. Window writes are
//! compare-and-swap on a version counter so the limiter's conflict path is
//! exercised the same way it would be against a real document store.

use crate::repository::{PriceCache, RateLimitStore, StoreError, TokenStore};
use crate::types::{PriceCacheEntry, ProviderToken, RateLimitWindow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
  tokens: HashMap<String, ProviderToken>,
  windows: HashMap<String, (RateLimitWindow, u64)>,
  prices: HashMap<(i64, Option<i64>), PriceCacheEntry>,
}

/// Shared in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
    self.inner.lock().map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
  }

  /// Number of pricing rows currently held (test helper)
  pub fn price_row_count(&self) -> usize {
    self.inner.lock().map(|g| g.prices.len()).unwrap_or(0)
  }
}

#[async_trait]
impl TokenStore for MemoryStore {
  async fn get_token(&self, provider: &str) -> Result<Option<ProviderToken>, StoreError> {
    Ok(self.lock()?.tokens.get(provider).cloned())
  }

  async fn put_token(&self, token: ProviderToken) -> Result<(), StoreError> {
    self.lock()?.tokens.insert(token.provider.clone(), token);
    Ok(())
  }
}

#[async_trait]
impl RateLimitStore for MemoryStore {
  async fn read_window(
    &self,
    provider: &str,
  ) -> Result<Option<(RateLimitWindow, u64)>, StoreError> {
    Ok(self.lock()?.windows.get(provider).copied())
  }

  async fn write_window(
    &self,
    provider: &str,
    expected_version: Option<u64>,
    window: RateLimitWindow,
  ) -> Result<(), StoreError> {
    let mut inner = self.lock()?;
    let current = inner.windows.get(provider).map(|(_, v)| *v);
    if current != expected_version {
      return Err(StoreError::WriteConflict);
    }
    let next_version = current.map_or(0, |v| v + 1);
    inner.windows.insert(provider.to_string(), (window, next_version));
    Ok(())
  }
}

#[async_trait]
impl PriceCache for MemoryStore {
  async fn upsert(&self, entry: PriceCacheEntry) -> Result<(), StoreError> {
    self.lock()?.prices.insert((entry.product_id, entry.sku_id), entry);
    Ok(())
  }

  async fn get(
    &self,
    product_id: i64,
    sku_id: Option<i64>,
  ) -> Result<Option<PriceCacheEntry>, StoreError> {
    Ok(self.lock()?.prices.get(&(product_id, sku_id)).cloned())
  }
}
