//! Catalog endpoints: categories, groups, products, SKUs and media

use super::{join_ids, query_string};
use crate::client::TcgClient;
use crate::pagination::{fetch_all_pages, PageSet};
use serde_json::Value;
use std::time::Duration;
use tcg_core::{
  Result, CATEGORIES_HARD_CAP_OFFSET, GROUPS_HARD_CAP_OFFSET, ITEM_DELAY_MS, PAGE_SIZE,
};
use tcg_models::result_list;
use tracing::{instrument, warn};

/// Catalog endpoint group
#[derive(Clone)]
pub struct CatalogEndpoints {
  client: TcgClient,
}

impl CatalogEndpoints {
  pub fn new(client: TcgClient) -> Self {
    Self { client }
  }

  /// All catalog categories.
  ///
  /// The proxy front-end's `/categories` route takes no paging params and
  /// answers with the full list in one response, so proxy mode makes a
  /// single call. Direct mode pages to completion.
  #[instrument(skip(self))]
  pub async fn categories(&self) -> Result<PageSet> {
    if self.client.uses_proxy() {
      let payload = self.client.get("", "/categories").await?;
      return Ok(PageSet { items: result_list(&payload), truncated: false });
    }
    fetch_all_pages(
      |offset| {
        let q = query_string(&[
          ("limit", PAGE_SIZE.to_string()),
          ("offset", offset.to_string()),
        ]);
        let client = self.client.clone();
        async move { client.get(&format!("catalog/categories?{}", q), "").await }
      },
      PAGE_SIZE,
      CATEGORIES_HARD_CAP_OFFSET,
    )
    .await
  }

  /// All groups (sets) in a category, paged to completion
  #[instrument(skip(self))]
  pub async fn all_groups(&self, category_id: i64) -> Result<PageSet> {
    fetch_all_pages(
      |offset| {
        let q = query_string(&[
          ("categoryId", category_id.to_string()),
          ("limit", PAGE_SIZE.to_string()),
          ("offset", offset.to_string()),
        ]);
        let client = self.client.clone();
        async move { client.get(&format!("catalog/groups?{}", q), &format!("/groups?{}", q)).await }
      },
      PAGE_SIZE,
      GROUPS_HARD_CAP_OFFSET,
    )
    .await
  }

  /// A single group by id.
  ///
  /// The proxy front-end's `/groups` route filters by category and name
  /// only, so proxy mode fetches the list and matches the id client-side,
  /// returning the same single-result envelope shape as the direct route.
  #[instrument(skip(self))]
  pub async fn group(&self, group_id: i64) -> Result<Value> {
    if self.client.uses_proxy() {
      let payload = self.client.get("", "/groups").await?;
      let matched: Vec<Value> = result_list(&payload)
        .into_iter()
        .filter(|g| g.get("groupId").and_then(Value::as_i64) == Some(group_id))
        .collect();
      return Ok(serde_json::json!({ "results": matched }));
    }
    self.client.get(&format!("catalog/groups/{}", group_id), "").await
  }

  /// Search products by name, optionally scoped to a category and group
  #[instrument(skip(self), fields(name = %name))]
  pub async fn search_products(
    &self,
    name: &str,
    category_id: Option<i64>,
    group_id: Option<i64>,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<Value>> {
    let mut pairs = vec![
      ("productName", name.to_string()),
      ("limit", limit.to_string()),
      ("offset", offset.to_string()),
    ];
    if let Some(cid) = category_id {
      pairs.push(("categoryId", cid.to_string()));
    }
    if let Some(gid) = group_id {
      pairs.push(("groupId", gid.to_string()));
    }
    let q = query_string(&pairs);
    let payload =
      self.client.get(&format!("catalog/products?{}", q), &format!("/products?{}", q)).await?;
    Ok(result_list(&payload))
  }

  /// Details for a batch of product ids (one request; the gateway chunks)
  #[instrument(skip(self), fields(count = ids.len()))]
  pub async fn product_details(&self, ids: &[i64]) -> Result<Vec<Value>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let joined = join_ids(ids);
    let payload = self
      .client
      .get(
        &format!("catalog/products/{}", joined),
        &format!("/product-details?{}", query_string(&[("ids", joined.clone())])),
      )
      .await?;
    Ok(result_list(&payload))
  }

  /// SKUs for a batch of product ids.
  ///
  /// The direct API does not support bulk SKU-by-product lookups, so in
  /// direct mode this degrades to one request per id: a 400 for an
  /// individual id is logged and that id dropped, while 5xx and network
  /// failures propagate. The proxy front-end accepts the bulk form.
  #[instrument(skip(self), fields(count = product_ids.len()))]
  pub async fn product_skus(&self, product_ids: &[i64]) -> Result<Vec<Value>> {
    if product_ids.is_empty() {
      return Ok(Vec::new());
    }

    if self.client.uses_proxy() {
      let q = query_string(&[("productIds", join_ids(product_ids))]);
      let payload = self.client.get("", &format!("/skus?{}", q)).await?;
      return Ok(result_list(&payload));
    }

    let mut all = Vec::new();
    for product_id in product_ids {
      match self.client.get(&format!("catalog/products/{}/skus", product_id), "").await {
        Ok(payload) => all.extend(result_list(&payload)),
        Err(err) if err.is_bad_request() => {
          warn!("invalid productId={} for SKU lookup, skipping", product_id);
        }
        Err(err) => return Err(err),
      }
      tokio::time::sleep(Duration::from_millis(ITEM_DELAY_MS)).await;
    }
    Ok(all)
  }

  /// Media (images) for a product
  #[instrument(skip(self))]
  pub async fn product_media(&self, product_id: i64) -> Result<Value> {
    self
      .client
      .get(
        &format!("catalog/products/{}/media", product_id),
        &format!("/media?{}", query_string(&[("productId", product_id.to_string())])),
      )
      .await
  }

  /// Media (icon/banner) for a category
  #[instrument(skip(self))]
  pub async fn category_media(&self, category_id: i64) -> Result<Value> {
    self
      .client
      .get(
        &format!("catalog/categories/{}/media", category_id),
        &format!("/category-media?{}", query_string(&[("categoryId", category_id.to_string())])),
      )
      .await
  }
}
