//! Stored record types, exclusively owned by the gateway

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One OAuth2 bearer token per provider. Overwritten on each grant,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderToken {
  pub provider: String,
  pub access_token: String,
  pub token_type: String,
  /// Epoch ms past which the token must not be reused
  pub expires_at: i64,
}

/// Fixed-window request counter row, one per provider.
///
/// `window_start` is aligned to a `window_ms` boundary; the row is reset
/// whenever "now" crosses into a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitWindow {
  pub window_start: i64,
  pub window_ms: i64,
  pub count: u32,
}

/// Cached pricing row, uniquely keyed by (product_id, sku_id-or-absent).
/// Never expires on its own; staleness is the reader's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCacheEntry {
  pub product_id: i64,
  pub sku_id: Option<i64>,
  pub category_id: i64,
  pub currency: String,
  /// Raw provider payload, kept opaque
  pub data: Value,
  pub last_fetched_at: i64,
}

/// Input to a pricing-cache upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpsert {
  pub product_id: i64,
  pub sku_id: Option<i64>,
  pub category_id: i64,
  /// Defaults to "USD" when absent
  pub currency: Option<String>,
  pub data: Value,
}
