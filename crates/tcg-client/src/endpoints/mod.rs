//! Endpoint groups over the shared client core
//!
//! Each group borrows the client's transport, limiter and token manager
//! through a cloned [`crate::TcgClient`]; every direct-mode request takes
//! a rate slot and a valid token before going out.

pub mod catalog;
pub mod pricing;

use url::form_urlencoded::Serializer;

/// Build a query string (without leading '?') from key/value pairs
pub(crate) fn query_string(pairs: &[(&str, String)]) -> String {
  let mut ser = Serializer::new(String::new());
  for (key, value) in pairs {
    ser.append_pair(key, value);
  }
  ser.finish()
}

/// Join ids for a path segment like `catalog/products/{ids}`
pub(crate) fn join_ids(ids: &[i64]) -> String {
  ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_query_string() {
    let q = query_string(&[
      ("productName", "Black Lotus".to_string()),
      ("limit", "30".to_string()),
    ]);
    assert_eq!(q, "productName=Black+Lotus&limit=30");
  }

  #[test]
  fn test_join_ids() {
    assert_eq!(join_ids(&[1, 2, 3]), "1,2,3");
    assert_eq!(join_ids(&[]), "");
  }
}
