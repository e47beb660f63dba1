//! Catalog and pricing operations over the client and the cache

use crate::chunk::{clean_ids, fetch_in_chunks};
use crate::error::{GatewayError, GatewayResult};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tcg_client::{PageSet, TcgClient};
use tcg_core::{
  Clock, SystemClock, CHUNK_DELAY_MS, PRODUCT_DETAIL_CHUNK_SIZE, PRODUCT_PRICE_CHUNK_SIZE,
  SKU_CHUNK_SIZE, SKU_PRICE_CHUNK_SIZE,
};
use tcg_models::record_product_id;
use tcg_store::{PriceCache, PriceCacheEntry, PriceUpsert};
use tracing::{info, instrument, warn};

/// Result of a best-effort price refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
  /// Distinct valid product ids the caller asked for
  pub requested: usize,
  /// Price rows actually written to the cache
  pub upserted: usize,
}

/// Catalog and pricing gateway.
///
/// Bundles the upstream [`TcgClient`] with the pricing cache and handles
/// the chunking, partial-failure and cache-stamping rules so callers work
/// in whole id lists.
#[derive(Clone)]
pub struct Gateway {
  client: TcgClient,
  cache: Arc<dyn PriceCache>,
  clock: Arc<dyn Clock>,
}

impl Gateway {
  pub fn new(client: TcgClient, cache: Arc<dyn PriceCache>) -> Self {
    Self::with_clock(client, cache, Arc::new(SystemClock))
  }

  /// Create a gateway with an injected clock (used by tests)
  pub fn with_clock(client: TcgClient, cache: Arc<dyn PriceCache>, clock: Arc<dyn Clock>) -> Self {
    Self { client, cache, clock }
  }

  /// All provider categories, paginated to the hard cap
  pub async fn get_categories(&self) -> GatewayResult<PageSet> {
    Ok(self.client.catalog().categories().await?)
  }

  /// All groups (sets) within a category, paginated to the hard cap
  pub async fn get_all_groups(&self, category_id: i64) -> GatewayResult<PageSet> {
    Ok(self.client.catalog().all_groups(category_id).await?)
  }

  /// A single group by id
  pub async fn get_group(&self, group_id: i64) -> GatewayResult<Value> {
    Ok(self.client.catalog().group(group_id).await?)
  }

  /// Product search by name, optionally narrowed to a category or group
  pub async fn search_products(
    &self,
    name: &str,
    category_id: Option<i64>,
    group_id: Option<i64>,
    limit: usize,
    offset: usize,
  ) -> GatewayResult<Vec<Value>> {
    if name.trim().is_empty() {
      return Err(GatewayError::InvalidInput("Empty product name".to_string()));
    }
    Ok(self.client.catalog().search_products(name, category_id, group_id, limit, offset).await?)
  }

  /// Detail records for a list of products, fetched in chunks
  #[instrument(skip(self), fields(count = ids.len()))]
  pub async fn get_product_details(&self, ids: &[i64]) -> GatewayResult<Vec<Value>> {
    let catalog = self.client.catalog();
    Ok(
      fetch_in_chunks(ids, PRODUCT_DETAIL_CHUNK_SIZE, |chunk| {
        let catalog = catalog.clone();
        async move { catalog.product_details(&chunk).await }
      })
      .await?,
    )
  }

  /// Media (images) for one product
  pub async fn get_product_media(&self, product_id: i64) -> GatewayResult<Value> {
    Ok(self.client.catalog().product_media(product_id).await?)
  }

  /// Media for one category
  pub async fn get_category_media(&self, category_id: i64) -> GatewayResult<Value> {
    Ok(self.client.catalog().category_media(category_id).await?)
  }

  /// SKU records for a list of products.
  ///
  /// Small chunks; within a chunk, a product the provider rejects with a
  /// 400 is skipped rather than failing the batch.
  #[instrument(skip(self), fields(count = product_ids.len()))]
  pub async fn get_skus(&self, product_ids: &[i64]) -> GatewayResult<Vec<Value>> {
    let catalog = self.client.catalog();
    Ok(
      fetch_in_chunks(product_ids, SKU_CHUNK_SIZE, |chunk| {
        let catalog = catalog.clone();
        async move { catalog.product_skus(&chunk).await }
      })
      .await?,
    )
  }

  /// Current market prices for a list of products, fetched in chunks
  #[instrument(skip(self), fields(count = product_ids.len()))]
  pub async fn get_product_prices(&self, product_ids: &[i64]) -> GatewayResult<Vec<Value>> {
    let pricing = self.client.pricing();
    Ok(
      fetch_in_chunks(product_ids, PRODUCT_PRICE_CHUNK_SIZE, |chunk| {
        let pricing = pricing.clone();
        async move { pricing.product_prices(&chunk).await }
      })
      .await?,
    )
  }

  /// Current market prices for a list of SKUs, fetched in chunks
  #[instrument(skip(self), fields(count = sku_ids.len()))]
  pub async fn get_sku_prices(&self, sku_ids: &[i64]) -> GatewayResult<Vec<Value>> {
    let pricing = self.client.pricing();
    Ok(
      fetch_in_chunks(sku_ids, SKU_PRICE_CHUNK_SIZE, |chunk| {
        let pricing = pricing.clone();
        async move { pricing.sku_prices(&chunk).await }
      })
      .await?,
    )
  }

  /// Refresh cached prices for a list of products, best effort.
  ///
  /// Each chunk is fetched and upserted independently; a failed chunk is
  /// logged and skipped so one bad batch cannot stall a whole refresh.
  #[instrument(skip(self), fields(count = product_ids.len()))]
  pub async fn refresh_product_prices(
    &self,
    product_ids: &[i64],
    category_id: i64,
  ) -> GatewayResult<RefreshOutcome> {
    let ids = clean_ids(product_ids);
    let mut upserted = 0;
    let pricing = self.client.pricing();

    for (index, chunk) in ids.chunks(PRODUCT_PRICE_CHUNK_SIZE).enumerate() {
      if index > 0 {
        tokio::time::sleep(Duration::from_millis(CHUNK_DELAY_MS)).await;
      }
      let records = match pricing.product_prices(chunk).await {
        Ok(records) => records,
        Err(err) => {
          warn!(chunk = index + 1, error = %err, "Price chunk failed, skipping");
          continue;
        }
      };

      let entries: Vec<PriceUpsert> = records
        .into_iter()
        .filter_map(|record| {
          let product_id = record_product_id(&record)?;
          Some(PriceUpsert {
            product_id,
            sku_id: None,
            category_id,
            currency: None,
            data: record,
          })
        })
        .collect();
      upserted += self.upsert_prices(entries).await?;
    }

    info!(requested = ids.len(), upserted, "Price refresh complete");
    Ok(RefreshOutcome { requested: ids.len(), upserted })
  }

  /// Write price rows to the cache, stamping fetch time and defaulting
  /// the currency to USD. Returns the number of rows written.
  pub async fn upsert_prices(&self, entries: Vec<PriceUpsert>) -> GatewayResult<usize> {
    let now = self.clock.now_ms();
    let count = entries.len();
    for entry in entries {
      self
        .cache
        .upsert(PriceCacheEntry {
          product_id: entry.product_id,
          sku_id: entry.sku_id,
          category_id: entry.category_id,
          currency: entry.currency.unwrap_or_else(|| "USD".to_string()),
          data: entry.data,
          last_fetched_at: now,
        })
        .await?;
    }
    Ok(count)
  }

  /// Cached price for a product, preferring the exact SKU row and falling
  /// back to the product-level row
  pub async fn get_cached_price(
    &self,
    product_id: i64,
    sku_id: Option<i64>,
  ) -> GatewayResult<Option<PriceCacheEntry>> {
    if let Some(entry) = self.cache.get(product_id, sku_id).await? {
      return Ok(Some(entry));
    }
    if sku_id.is_some() {
      return Ok(self.cache.get(product_id, None).await?);
    }
    Ok(None)
  }

  /// Product-level cached prices for a list of products; misses are
  /// silently absent from the result
  pub async fn get_cached_prices(
    &self,
    product_ids: &[i64],
  ) -> GatewayResult<Vec<PriceCacheEntry>> {
    let mut out = Vec::new();
    for product_id in clean_ids(product_ids) {
      if let Some(entry) = self.cache.get(product_id, None).await? {
        out.push(entry);
      }
    }
    Ok(out)
  }
}

impl std::fmt::Debug for Gateway {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Gateway").field("client", &self.client).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tcg_core::{Config, ManualClock};
  use tcg_store::MemoryStore;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn gateway_for(server: &MockServer, store: Arc<MemoryStore>) -> Gateway {
    let config = Config::with_base_url(server.uri());
    let client = TcgClient::new(&config, store.clone(), store.clone()).unwrap();
    Gateway::with_clock(client, store, Arc::new(ManualClock::new(1_000)))
  }

  async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
      .and(path("/token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "tok", "token_type": "bearer", "expires_in": 3600
      })))
      .mount(server)
      .await;
  }

  #[tokio::test]
  async fn test_get_skus_survives_one_bad_product() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
      .and(path("/v1.39.0/catalog/products/1/skus"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "results": [{"skuId": 101, "productId": 1}]
      })))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/v1.39.0/catalog/products/2/skus"))
      .respond_with(ResponseTemplate::new(400).set_body_string("unknown product"))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/v1.39.0/catalog/products/3/skus"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "results": [{"skuId": 103, "productId": 3}]
      })))
      .mount(&server)
      .await;

    let store = Arc::new(MemoryStore::new());
    let gateway = gateway_for(&server, store);
    let skus = gateway.get_skus(&[1, 2, 3]).await.unwrap();
    assert_eq!(skus.len(), 2);
  }

  #[tokio::test]
  async fn test_refresh_upserts_and_counts() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
      .and(path("/v1.39.0/pricing/product/5,6"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "results": [
          {"productId": 5, "marketPrice": 1.25},
          {"productId": 6, "marketPrice": 0.5},
          {"note": "no product id, dropped"}
        ]
      })))
      .mount(&server)
      .await;

    let store = Arc::new(MemoryStore::new());
    let gateway = gateway_for(&server, store.clone());
    let outcome = gateway.refresh_product_prices(&[5, 6, 5], 1).await.unwrap();

    assert_eq!(outcome, RefreshOutcome { requested: 2, upserted: 2 });
    assert_eq!(store.price_row_count(), 2);

    let cached = gateway.get_cached_price(5, None).await.unwrap().unwrap();
    assert_eq!(cached.currency, "USD");
    assert_eq!(cached.category_id, 1);
    assert_eq!(cached.last_fetched_at, 1_000);
    assert_eq!(tcg_models::market_price(&cached.data), 1.25);
  }

  #[tokio::test]
  async fn test_refresh_skips_failed_chunk() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // Whole pricing surface down; refresh still finishes
    Mock::given(method("GET"))
      .and(path("/v1.39.0/pricing/product/9"))
      .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
      .mount(&server)
      .await;

    let store = Arc::new(MemoryStore::new());
    let gateway = gateway_for(&server, store.clone());
    let outcome = gateway.refresh_product_prices(&[9], 1).await.unwrap();

    assert_eq!(outcome, RefreshOutcome { requested: 1, upserted: 0 });
    assert_eq!(store.price_row_count(), 0);
  }

  #[tokio::test]
  async fn test_cached_price_falls_back_to_product_row() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let gateway = gateway_for(&server, store);

    gateway
      .upsert_prices(vec![PriceUpsert {
        product_id: 7,
        sku_id: None,
        category_id: 1,
        currency: None,
        data: json!({"marketPrice": 3.0}),
      }])
      .await
      .unwrap();

    // No SKU row exists, so the product row answers
    let hit = gateway.get_cached_price(7, Some(701)).await.unwrap().unwrap();
    assert_eq!(hit.product_id, 7);
    assert_eq!(hit.sku_id, None);

    assert!(gateway.get_cached_price(8, Some(801)).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_cached_prices_skips_misses() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let gateway = gateway_for(&server, store);

    gateway
      .upsert_prices(vec![
        PriceUpsert {
          product_id: 1,
          sku_id: None,
          category_id: 1,
          currency: Some("EUR".to_string()),
          data: json!({"marketPrice": 9.0}),
        },
        PriceUpsert {
          product_id: 3,
          sku_id: None,
          category_id: 1,
          currency: None,
          data: json!({"marketPrice": 2.0}),
        },
      ])
      .await
      .unwrap();

    let hits = gateway.get_cached_prices(&[1, 2, 3]).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].currency, "EUR");
  }

  #[tokio::test]
  async fn test_search_rejects_blank_name() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let gateway = gateway_for(&server, store);

    let err = gateway.search_products("  ", None, None, 10, 0).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidInput(_)));
  }
}
