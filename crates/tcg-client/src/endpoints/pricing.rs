//! Pricing endpoints: product and SKU market prices

use super::{join_ids, query_string};
use crate::client::TcgClient;
use serde_json::Value;
use tcg_core::Result;
use tcg_models::result_list;
use tracing::{debug, instrument};

/// Pricing endpoint group
#[derive(Clone)]
pub struct PricingEndpoints {
  client: TcgClient,
}

impl PricingEndpoints {
  pub fn new(client: TcgClient) -> Self {
    Self { client }
  }

  /// Market prices for a batch of product ids (one request; the gateway
  /// chunks). Each product yields one row per sub-type (Normal, Foil, ...).
  #[instrument(skip(self), fields(count = product_ids.len()))]
  pub async fn product_prices(&self, product_ids: &[i64]) -> Result<Vec<Value>> {
    if product_ids.is_empty() {
      return Ok(Vec::new());
    }
    let joined = join_ids(product_ids);
    let payload = self
      .client
      .get(
        &format!("pricing/product/{}", joined),
        &format!("/pricing/products?{}", query_string(&[("ids", joined.clone())])),
      )
      .await?;
    Ok(result_list(&payload))
  }

  /// Market prices for a batch of SKU ids (one request; the gateway
  /// chunks). Falls back to the legacy endpoint shape when the primary
  /// route rejects the call.
  #[instrument(skip(self), fields(count = sku_ids.len()))]
  pub async fn sku_prices(&self, sku_ids: &[i64]) -> Result<Vec<Value>> {
    if sku_ids.is_empty() {
      return Ok(Vec::new());
    }
    let joined = join_ids(sku_ids);
    let proxy_path = format!("/pricing/skus?{}", query_string(&[("ids", joined.clone())]));

    let primary = self
      .client
      .get(&format!("pricing/marketprices/skus?skuIds={}", joined), &proxy_path)
      .await;

    let payload = match primary {
      Ok(payload) => payload,
      Err(err) => {
        debug!("primary SKU pricing route failed ({}), trying legacy route", err);
        self.client.get(&format!("pricing/sku/{}", joined), &proxy_path).await?
      }
    };
    Ok(result_list(&payload))
  }
}
