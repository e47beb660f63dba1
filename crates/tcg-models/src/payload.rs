//! Normalization of duck-typed provider payloads

use serde::Deserialize;
use serde_json::Value;

/// Response body of the OAuth2 client-credentials grant
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
  pub access_token: String,
  #[serde(default)]
  pub token_type: Option<String>,
  /// Lifetime in seconds; absent on some proxy responses
  #[serde(default)]
  pub expires_in: Option<i64>,
}

/// Keys under which the provider nests result lists, in observed
/// precedence order.
const LIST_KEYS: [&str; 3] = ["results", "Results", "data"];

/// Extract the result list from a provider payload, tolerating the three
/// field-name conventions. Returns an empty list when no array is present.
pub fn result_list(payload: &Value) -> Vec<Value> {
  for key in LIST_KEYS {
    if let Some(list) = payload.get(key).and_then(Value::as_array) {
      return list.clone();
    }
  }
  Vec::new()
}

fn numeric_id(record: &Value, keys: &[&str]) -> Option<i64> {
  for key in keys {
    match record.get(key) {
      Some(Value::Number(n)) => {
        if let Some(id) = n.as_i64().filter(|v| *v > 0) {
          return Some(id);
        }
      }
      // Some pricing rows carry ids as strings
      Some(Value::String(s)) => {
        if let Some(id) = s.parse::<i64>().ok().filter(|v| *v > 0) {
          return Some(id);
        }
      }
      _ => {}
    }
  }
  None
}

/// Product id of a catalog or pricing record, tolerating casing variants.
pub fn record_product_id(record: &Value) -> Option<i64> {
  numeric_id(record, &["productId", "ProductId"])
}

/// SKU id of a pricing record. `productConditionId` is the legacy
/// pricing endpoint's name for the same id.
pub fn record_sku_id(record: &Value) -> Option<i64> {
  numeric_id(record, &["skuId", "SkuId", "productConditionId"])
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_result_list_lowercase() {
    let payload = json!({"success": true, "results": [{"productId": 1}, {"productId": 2}]});
    assert_eq!(result_list(&payload).len(), 2);
  }

  #[test]
  fn test_result_list_uppercase() {
    let payload = json!({"Success": true, "Results": [{"productId": 7}]});
    assert_eq!(result_list(&payload).len(), 1);
  }

  #[test]
  fn test_result_list_data_key() {
    let payload = json!({"data": [1, 2, 3]});
    assert_eq!(result_list(&payload).len(), 3);
  }

  #[test]
  fn test_result_list_precedence() {
    // lowercase wins when multiple keys are present
    let payload = json!({"results": [1], "Results": [1, 2], "data": [1, 2, 3]});
    assert_eq!(result_list(&payload).len(), 1);
  }

  #[test]
  fn test_result_list_absent_or_not_array() {
    assert!(result_list(&json!({})).is_empty());
    assert!(result_list(&json!({"results": "nope"})).is_empty());
    assert!(result_list(&json!([1, 2])).is_empty());
  }

  #[test]
  fn test_record_product_id() {
    assert_eq!(record_product_id(&json!({"productId": 121})), Some(121));
    assert_eq!(record_product_id(&json!({"ProductId": 9})), Some(9));
    assert_eq!(record_product_id(&json!({"productId": "42"})), Some(42));
    assert_eq!(record_product_id(&json!({"productId": 0})), None);
    assert_eq!(record_product_id(&json!({})), None);
  }

  #[test]
  fn test_record_sku_id() {
    assert_eq!(record_sku_id(&json!({"skuId": 5})), Some(5));
    assert_eq!(record_sku_id(&json!({"productConditionId": 88})), Some(88));
    assert_eq!(record_sku_id(&json!({"productId": 5})), None);
  }

  #[test]
  fn test_token_grant_deserialization() {
    let grant: TokenGrant = serde_json::from_str(
      r#"{"access_token": "abc", "token_type": "bearer", "expires_in": 1209599}"#,
    )
    .unwrap();
    assert_eq!(grant.access_token, "abc");
    assert_eq!(grant.token_type.as_deref(), Some("bearer"));
    assert_eq!(grant.expires_in, Some(1_209_599));

    let sparse: TokenGrant = serde_json::from_str(r#"{"access_token": "xyz"}"#).unwrap();
    assert!(sparse.token_type.is_none());
    assert!(sparse.expires_in.is_none());
  }
}
