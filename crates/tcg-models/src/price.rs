//! Canonical market-price resolution
//!
//! Provider pricing responses come in two layouts: a flat record (SKU
//! pricing) and a variant array under `results`/`Results` (product pricing
//! with Normal/Foil/etc. sub-types). This resolves both to one number.

use serde_json::Value;

/// Price fields in priority order. `marketPrice` is the provider's own
/// aggregate; the rest are progressively weaker signals.
const PRICE_FIELDS: [&str; 5] =
  ["marketPrice", "midPrice", "lowPrice", "directLowPrice", "highPrice"];

/// Base printing sub-type, preferred over Foil and other variants.
const BASE_SUBTYPE: &str = "Normal";

fn pick(record: &Value) -> f64 {
  for field in PRICE_FIELDS {
    if let Some(v) = record.get(field).and_then(Value::as_f64) {
      if v > 0.0 {
        return v;
      }
    }
  }
  0.0
}

/// Extract the canonical market price from a pricing record or cache row.
///
/// Pure and infallible: returns 0.0 when no positive price is present,
/// since a missing price is a displayable state, not a fault. Accepts
/// either a raw provider record or a cache row wrapping one under `data`.
pub fn market_price(record: &Value) -> f64 {
  let data = record.get("data").unwrap_or(record);

  let direct = pick(data);
  if direct > 0.0 {
    return direct;
  }

  let variants = data
    .get("results")
    .or_else(|| data.get("Results"))
    .and_then(Value::as_array);

  if let Some(list) = variants {
    if let Some(normal) = list
      .iter()
      .find(|r| r.get("subTypeName").and_then(Value::as_str) == Some(BASE_SUBTYPE))
    {
      let v = pick(normal);
      if v > 0.0 {
        return v;
      }
    }
    for entry in list {
      let v = pick(entry);
      if v > 0.0 {
        return v;
      }
    }
  }

  0.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_flat_market_price() {
    assert_eq!(market_price(&json!({"marketPrice": 5})), 5.0);
  }

  #[test]
  fn test_flat_field_priority() {
    let rec = json!({"lowPrice": 1.5, "midPrice": 2.5, "highPrice": 9.0});
    assert_eq!(market_price(&rec), 2.5);
  }

  #[test]
  fn test_zero_field_falls_through() {
    // A present-but-zero marketPrice is not a valid price
    let rec = json!({"marketPrice": 0, "midPrice": 3.0});
    assert_eq!(market_price(&rec), 3.0);
  }

  #[test]
  fn test_normal_subtype_wins_over_foil() {
    let rec = json!({"results": [
      {"subTypeName": "Foil", "marketPrice": 25},
      {"subTypeName": "Normal", "midPrice": 12}
    ]});
    assert_eq!(market_price(&rec), 12.0);
  }

  #[test]
  fn test_fallback_scans_all_variants() {
    // No Normal entry with a price: first positive entry wins
    let rec = json!({"Results": [
      {"subTypeName": "Normal"},
      {"subTypeName": "Foil", "marketPrice": 4.2}
    ]});
    assert_eq!(market_price(&rec), 4.2);
  }

  #[test]
  fn test_empty_record() {
    assert_eq!(market_price(&json!({})), 0.0);
  }

  #[test]
  fn test_empty_variant_list() {
    assert_eq!(market_price(&json!({"results": []})), 0.0);
  }

  #[test]
  fn test_cache_row_with_data_wrapper() {
    let row = json!({"productId": 121, "data": {"marketPrice": 7.75}});
    assert_eq!(market_price(&row), 7.75);
  }

  #[test]
  fn test_non_numeric_fields_ignored() {
    let rec = json!({"marketPrice": "5.00", "midPrice": 2.0});
    assert_eq!(market_price(&rec), 2.0);
  }
}
