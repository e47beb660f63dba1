//! Sequential chunked fetching over id lists
//!
//! Batch endpoints cap how many ids fit in one request, so callers hand a
//! full id list to [`fetch_in_chunks`] and a closure that fetches one
//! chunk. Chunks run one at a time with a pacing delay between them; a
//! chunk error aborts the whole batch and surfaces to the caller.

use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tcg_core::{Result, CHUNK_DELAY_MS};
use tracing::debug;

/// Dedupe an id list, preserving first-seen order and dropping
/// non-positive ids.
pub fn clean_ids(ids: &[i64]) -> Vec<i64> {
  let mut seen = std::collections::HashSet::new();
  ids.iter().copied().filter(|id| *id > 0 && seen.insert(*id)).collect()
}

/// Fetch records for `ids` in sequential chunks of `chunk_size`.
///
/// Ids are cleaned first, so duplicates and junk ids never reach the
/// provider. Results from all chunks are concatenated in input order.
pub async fn fetch_in_chunks<F, Fut>(
  ids: &[i64],
  chunk_size: usize,
  mut fetch_chunk: F,
) -> Result<Vec<Value>>
where
  F: FnMut(Vec<i64>) -> Fut,
  Fut: Future<Output = Result<Vec<Value>>>,
{
  let ids = clean_ids(ids);
  if ids.is_empty() {
    return Ok(Vec::new());
  }

  let mut out = Vec::with_capacity(ids.len());
  let chunk_count = ids.len().div_ceil(chunk_size);

  for (index, chunk) in ids.chunks(chunk_size).enumerate() {
    if index > 0 {
      tokio::time::sleep(Duration::from_millis(CHUNK_DELAY_MS)).await;
    }
    debug!(chunk = index + 1, of = chunk_count, len = chunk.len(), "Fetching chunk");
    out.extend(fetch_chunk(chunk.to_vec()).await?);
  }

  Ok(out)
}
