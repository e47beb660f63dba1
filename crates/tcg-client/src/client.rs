//! Main TCGplayer API client

use crate::auth::{Credentials, TokenManager};
use crate::endpoints::{catalog::CatalogEndpoints, pricing::PricingEndpoints};
use crate::rate_limit::FixedWindowLimiter;
use crate::transport::Transport;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tcg_core::{Clock, Config, Result, SystemClock, PROVIDER};
use tcg_store::{RateLimitStore, TokenStore};

/// Where requests go: the provider API directly (authenticated, paced
/// locally) or an alternate front-end with identical response shapes
/// (which fronts credentials and pacing itself).
#[derive(Debug, Clone)]
enum Upstream {
  Direct { base: String, version: String },
  Proxy { base: String },
}

/// TCGplayer API client
///
/// Cheap to clone; all heavy state is behind `Arc`. Endpoint groups are
/// obtained through [`TcgClient::catalog`] and [`TcgClient::pricing`].
#[derive(Clone)]
pub struct TcgClient {
  transport: Arc<Transport>,
  limiter: Arc<FixedWindowLimiter>,
  tokens: Arc<TokenManager>,
  upstream: Upstream,
  rate: u32,
  window_ms: i64,
  /// Bound on how long one request may wait for a rate slot
  acquire_deadline: Duration,
}

impl TcgClient {
  /// Create a client from configuration and store handles
  pub fn new(
    config: &Config,
    tokens: Arc<dyn TokenStore>,
    windows: Arc<dyn RateLimitStore>,
  ) -> Result<Self> {
    Self::with_clock(config, tokens, windows, Arc::new(SystemClock))
  }

  /// Create a client with an injected clock (used by tests)
  pub fn with_clock(
    config: &Config,
    tokens: Arc<dyn TokenStore>,
    windows: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
  ) -> Result<Self> {
    let transport = Arc::new(Transport::new(config.timeout_secs)?);

    let credentials = match (&config.client_id, &config.client_secret) {
      (Some(id), Some(secret)) => {
        Some(Credentials { client_id: id.clone(), client_secret: secret.clone() })
      }
      _ => None,
    };

    let token_manager = TokenManager::new(
      transport.clone(),
      tokens,
      clock.clone(),
      config.token_url.clone(),
      credentials,
    );

    let upstream = match &config.proxy_service_url {
      Some(proxy) => Upstream::Proxy { base: proxy.clone() },
      None => Upstream::Direct {
        base: config.api_base_url.trim_end_matches('/').to_string(),
        version: config.api_version.clone(),
      },
    };

    Ok(Self {
      limiter: Arc::new(FixedWindowLimiter::new(windows, clock)),
      tokens: Arc::new(token_manager),
      transport,
      upstream,
      rate: config.rate_limit,
      window_ms: config.rate_window_ms,
      acquire_deadline: Duration::from_secs(config.timeout_secs),
    })
  }

  /// Catalog endpoints: categories, groups, products, SKUs, media
  pub fn catalog(&self) -> CatalogEndpoints {
    CatalogEndpoints::new(self.clone())
  }

  /// Pricing endpoints: product and SKU market prices
  pub fn pricing(&self) -> PricingEndpoints {
    PricingEndpoints::new(self.clone())
  }

  /// Perform one GET against the upstream.
  ///
  /// `direct_path` is the versioned provider route; `proxy_path` is the
  /// front-end's flattened route for the same data. Direct mode acquires
  /// a rate slot and a bearer token first; proxy mode sends the request
  /// as-is.
  pub(crate) async fn get(&self, direct_path: &str, proxy_path: &str) -> Result<Value> {
    match &self.upstream {
      Upstream::Proxy { base } => {
        self.transport.fetch_json(&format!("{}{}", base, proxy_path), None).await
      }
      Upstream::Direct { base, version } => {
        self
          .limiter
          .acquire_with_retry(PROVIDER, self.rate, self.window_ms, self.acquire_deadline)
          .await?;
        let auth = self.tokens.ensure_token(PROVIDER).await?;
        self
          .transport
          .fetch_json(&format!("{}/{}/{}", base, version, direct_path), Some(&auth))
          .await
      }
    }
  }

  /// True when requests route through the proxy front-end
  pub fn uses_proxy(&self) -> bool {
    matches!(self.upstream, Upstream::Proxy { .. })
  }
}

impl std::fmt::Debug for TcgClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TcgClient")
      .field("upstream", &self.upstream)
      .field("rate", &self.rate)
      .field("window_ms", &self.window_ms)
      .finish()
  }
}
