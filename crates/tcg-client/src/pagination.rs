//! Pagination engine for provider list endpoints

use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tcg_core::{Result, PAGE_DELAY_MS};
use tcg_models::result_list;
use tracing::{debug, warn};

/// Accumulated pages of a list endpoint.
///
/// `truncated` is set when the hard offset cap stopped the walk before a
/// natural short page; callers treating partial catalog data as acceptable
/// can ignore it, but the signal is never silent.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
  pub items: Vec<Value>,
  pub truncated: bool,
}

/// Drive a list endpoint to completion.
///
/// Calls `request_page(offset)` starting at 0 and advancing by
/// `page_size`, extracting each page's list through the shared payload
/// normalizer. Terminates on a page shorter than `page_size` (natural
/// end) or once the next offset would pass `hard_cap_offset` (defensive
/// end against a misbehaving provider). A short pacing delay runs between
/// pages to avoid bursts even while under the nominal quota.
pub async fn fetch_all_pages<F, Fut>(
  mut request_page: F,
  page_size: usize,
  hard_cap_offset: usize,
) -> Result<PageSet>
where
  F: FnMut(usize) -> Fut,
  Fut: Future<Output = Result<Value>>,
{
  let mut items = Vec::new();
  let mut offset = 0;

  loop {
    let page = request_page(offset).await?;
    let list = result_list(&page);
    let fetched = list.len();
    items.extend(list);
    debug!("page at offset {}: {} items", offset, fetched);

    if fetched < page_size {
      return Ok(PageSet { items, truncated: false });
    }

    offset += page_size;
    if offset > hard_cap_offset {
      warn!("hard cap {} reached, returning truncated list", hard_cap_offset);
      return Ok(PageSet { items, truncated: true });
    }

    tokio::time::sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
  }
}
