//! HTTP transport layer for provider requests

use crate::auth::BearerAuth;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Thin request/response wrapper. Normalizes failures into the gateway's
/// error taxonomy and nothing more: retry policy belongs to callers,
/// because pagination and single calls want different ones.
#[derive(Debug)]
pub struct Transport {
  client: Client,
}

impl Transport {
  /// Create a new transport with the given request timeout
  pub fn new(timeout_secs: u64) -> tcg_core::Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .user_agent("tcg-client/0.1.0")
      .build()
      .map_err(|e| tcg_core::Error::Network(format!("failed to create HTTP client: {}", e)))?;
    Ok(Self { client })
  }

  /// GET a JSON payload, optionally bearer-authenticated.
  ///
  /// Non-2xx responses become `Error::Http {status, body}`; transport
  /// failures become `Error::Network`.
  #[instrument(skip(self, auth), fields(url = %url))]
  pub async fn fetch_json(&self, url: &str, auth: Option<&BearerAuth>) -> tcg_core::Result<Value> {
    let mut request = self.client.get(url).header(ACCEPT, "application/json");
    if let Some(auth) = auth {
      request = request.header(AUTHORIZATION, format!("{} {}", auth.token_type, auth.token));
    }
    let response = request
      .send()
      .await
      .map_err(|e| tcg_core::Error::Network(format!("request failed: {}", e)))?;

    Self::read_json(response).await
  }

  /// POST a form-encoded body (the OAuth2 grant) and parse the JSON reply
  #[instrument(skip(self, params), fields(url = %url))]
  pub async fn post_form(
    &self,
    url: &str,
    params: &[(&str, &str)],
  ) -> tcg_core::Result<Value> {
    let response = self
      .client
      .post(url)
      .header(ACCEPT, "application/json")
      .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
      .form(params)
      .send()
      .await
      .map_err(|e| tcg_core::Error::Network(format!("request failed: {}", e)))?;

    Self::read_json(response).await
  }

  async fn read_json(response: reqwest::Response) -> tcg_core::Result<Value> {
    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| tcg_core::Error::Network(format!("failed to read response body: {}", e)))?;

    if !status.is_success() {
      warn!("provider returned {}: {}", status, truncate(&body, 200));
      return Err(tcg_core::Error::Http { status: status.as_u16(), body });
    }

    debug!("response body: {} bytes", body.len());
    serde_json::from_str(&body).map_err(|e| {
      tcg_core::Error::Parse(format!("invalid JSON: {}. Body: {}", e, truncate(&body, 200)))
    })
  }
}

fn truncate(s: &str, max: usize) -> &str {
  match s.char_indices().nth(max) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_fetch_json_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/catalog/categories"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "results": [{"categoryId": 3, "name": "Magic"}]
      })))
      .mount(&server)
      .await;

    let transport = Transport::new(5).unwrap();
    let payload =
      transport.fetch_json(&format!("{}/catalog/categories", server.uri()), None).await.unwrap();
    assert_eq!(payload["results"][0]["categoryId"], 3);
  }

  #[tokio::test]
  async fn test_fetch_json_sends_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/secure"))
      .and(header("authorization", "bearer tok123"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
      .expect(1)
      .mount(&server)
      .await;

    let transport = Transport::new(5).unwrap();
    let auth = BearerAuth { token: "tok123".to_string(), token_type: "bearer".to_string() };
    transport.fetch_json(&format!("{}/secure", server.uri()), Some(&auth)).await.unwrap();
  }

  #[tokio::test]
  async fn test_fetch_json_http_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/missing"))
      .respond_with(ResponseTemplate::new(404).set_body_string("no such product"))
      .mount(&server)
      .await;

    let transport = Transport::new(5).unwrap();
    let err = transport.fetch_json(&format!("{}/missing", server.uri()), None).await.unwrap_err();
    match err {
      tcg_core::Error::Http { status, body } => {
        assert_eq!(status, 404);
        assert_eq!(body, "no such product");
      }
      other => panic!("expected Http error, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_fetch_json_network_error() {
    // Nothing is listening on this port
    let transport = Transport::new(1).unwrap();
    let err = transport.fetch_json("http://127.0.0.1:1/none", None).await.unwrap_err();
    assert!(matches!(err, tcg_core::Error::Network(_)));
  }

  #[tokio::test]
  async fn test_fetch_json_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/garbled"))
      .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
      .mount(&server)
      .await;

    let transport = Transport::new(5).unwrap();
    let err = transport.fetch_json(&format!("{}/garbled", server.uri()), None).await.unwrap_err();
    assert!(matches!(err, tcg_core::Error::Parse(_)));
  }

  #[tokio::test]
  async fn test_post_form_encodes_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/token"))
      .and(wiremock::matchers::body_string_contains("grant_type=client_credentials"))
      .and(wiremock::matchers::body_string_contains("client_id=abc"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": "t", "token_type": "bearer", "expires_in": 100
      })))
      .expect(1)
      .mount(&server)
      .await;

    let transport = Transport::new(5).unwrap();
    let payload = transport
      .post_form(
        &format!("{}/token", server.uri()),
        &[("grant_type", "client_credentials"), ("client_id", "abc"), ("client_secret", "s")],
      )
      .await
      .unwrap();
    assert_eq!(payload["access_token"], "t");
  }

  #[test]
  fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 3), "hel");
  }
}
