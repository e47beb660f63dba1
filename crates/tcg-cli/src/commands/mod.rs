pub mod catalog;
pub mod pricing;

use anyhow::Result;
use std::sync::Arc;
use tcg_client::TcgClient;
use tcg_core::Config;
use tcg_gateway::Gateway;
use tcg_store::MemoryStore;

/// Wire a gateway over an in-process store. Tokens, rate windows and
/// cached prices live for the duration of one CLI invocation.
pub fn build_gateway(config: &Config) -> Result<Gateway> {
  let store = Arc::new(MemoryStore::new());
  let client = TcgClient::new(config, store.clone(), store.clone())?;
  Ok(Gateway::new(client, store))
}

/// Parse "1,2,3" into ids, tolerating whitespace
pub fn parse_ids(raw: &str) -> Result<Vec<i64>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| s.parse::<i64>().map_err(|_| anyhow::anyhow!("Invalid id: {s}")))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_ids() {
    assert_eq!(parse_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
    assert_eq!(parse_ids("42").unwrap(), vec![42]);
    assert!(parse_ids("1,x").is_err());
  }
}
