//! Configuration for the TCGplayer gateway

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Gateway configuration, loaded from the environment.
///
/// Credentials are optional at load time: proxy mode needs none, and
/// direct mode fails with a `Config` error at the first call that needs
/// them rather than at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// OAuth2 client id (TCGPLAYER_CLIENT_ID)
  pub client_id: Option<String>,

  /// OAuth2 client secret (TCGPLAYER_CLIENT_SECRET)
  pub client_secret: Option<String>,

  /// Pinned provider API version string
  pub api_version: String,

  /// Alternate HTTP front-end with identical response shapes; when set,
  /// all calls route through it and skip local auth and pacing.
  pub proxy_service_url: Option<String>,

  /// Provider API base URL
  pub api_base_url: String,

  /// OAuth2 token grant URL
  pub token_url: String,

  /// Requests per fixed window
  pub rate_limit: u32,

  /// Fixed-window length in milliseconds
  pub rate_window_ms: i64,

  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let client_id = env::var("TCGPLAYER_CLIENT_ID").ok().filter(|s| !s.is_empty());
    let client_secret = env::var("TCGPLAYER_CLIENT_SECRET").ok().filter(|s| !s.is_empty());

    let api_version =
      env::var("TCGPLAYER_API_VERSION").unwrap_or_else(|_| crate::DEFAULT_API_VERSION.to_string());

    let proxy_service_url = env::var("PROXY_SERVICE_URL")
      .ok()
      .filter(|s| !s.is_empty())
      .map(|s| s.trim_end_matches('/').to_string());

    let api_base_url =
      env::var("TCG_API_BASE_URL").unwrap_or_else(|_| crate::TCGPLAYER_API_BASE.to_string());

    let token_url =
      env::var("TCG_TOKEN_URL").unwrap_or_else(|_| crate::TCGPLAYER_TOKEN_URL.to_string());

    let rate_limit = env::var("TCG_RATE_LIMIT")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid TCG_RATE_LIMIT".to_string()))?;

    let rate_window_ms: i64 = env::var("TCG_RATE_WINDOW_MS")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_WINDOW_MS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid TCG_RATE_WINDOW_MS".to_string()))?;
    // Window arithmetic divides by the window length
    if rate_window_ms <= 0 {
      return Err(Error::Config("TCG_RATE_WINDOW_MS must be positive".to_string()));
    }

    let timeout_secs = env::var("TCG_TIMEOUT_SECS")
      .unwrap_or_else(|_| "30".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid TCG_TIMEOUT_SECS".to_string()))?;

    Ok(Config {
      client_id,
      client_secret,
      api_version,
      proxy_service_url,
      api_base_url,
      token_url,
      rate_limit,
      rate_window_ms,
      timeout_secs,
    })
  }

  /// Create a config pointed at an arbitrary base URL (for testing)
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into();
    Config {
      client_id: Some("test_client".to_string()),
      client_secret: Some("test_secret".to_string()),
      api_version: crate::DEFAULT_API_VERSION.to_string(),
      proxy_service_url: None,
      token_url: format!("{}/token", base_url),
      api_base_url: base_url,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      rate_window_ms: crate::DEFAULT_RATE_WINDOW_MS,
      timeout_secs: 30,
    }
  }

  /// True when calls should route through the proxy front-end
  pub fn uses_proxy(&self) -> bool {
    self.proxy_service_url.is_some()
  }
}
