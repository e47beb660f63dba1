//! OAuth2 client-credentials token management
//!
//! One bearer token per provider lives in the token store. A cached token
//! is reused while `now + refresh margin < expires_at`; otherwise a new
//! grant is performed and the row overwritten. Refreshing redundantly
//! under concurrency wastes a grant call but corrupts nothing, so no lock
//! is taken around the refresh.

use crate::transport::Transport;
use std::sync::Arc;
use tcg_core::{Clock, Error, Result, DEFAULT_TOKEN_TTL_SECS, TOKEN_REFRESH_MARGIN_MS};
use tcg_models::TokenGrant;
use tcg_store::{ProviderToken, TokenStore};
use tracing::{debug, instrument};

/// Credential pair for the client-credentials grant
#[derive(Debug, Clone)]
pub struct Credentials {
  pub client_id: String,
  pub client_secret: String,
}

/// A usable bearer token plus its scheme, ready for the Authorization header
#[derive(Debug, Clone)]
pub struct BearerAuth {
  pub token: String,
  pub token_type: String,
}

/// Token manager backed by a [`TokenStore`]
pub struct TokenManager {
  transport: Arc<Transport>,
  store: Arc<dyn TokenStore>,
  clock: Arc<dyn Clock>,
  token_url: String,
  credentials: Option<Credentials>,
}

impl TokenManager {
  pub fn new(
    transport: Arc<Transport>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    token_url: String,
    credentials: Option<Credentials>,
  ) -> Self {
    Self { transport, store, clock, token_url, credentials }
  }

  /// Return a valid bearer token for `provider`, refreshing if needed.
  ///
  /// Fails with `Error::Config` when credentials are unset and with
  /// `Error::Auth` when the grant endpoint rejects them; neither is
  /// retried within this call.
  #[instrument(skip(self), fields(provider = %provider))]
  pub async fn ensure_token(&self, provider: &str) -> Result<BearerAuth> {
    let now = self.clock.now_ms();
    if let Some(cached) = self.store.get_token(provider).await? {
      if cached.expires_at > now + TOKEN_REFRESH_MARGIN_MS {
        debug!("reusing cached token");
        return Ok(BearerAuth { token: cached.access_token, token_type: cached.token_type });
      }
    }

    let creds = self.credentials.as_ref().ok_or_else(|| {
      Error::Config("TCGPLAYER_CLIENT_ID and TCGPLAYER_CLIENT_SECRET must be set".to_string())
    })?;

    debug!("requesting new bearer token");
    let payload = self
      .transport
      .post_form(
        &self.token_url,
        &[
          ("grant_type", "client_credentials"),
          ("client_id", &creds.client_id),
          ("client_secret", &creds.client_secret),
        ],
      )
      .await
      .map_err(|e| match e {
        Error::Http { status, body } => {
          Error::Auth(format!("token grant failed: {} {}", status, body))
        }
        other => other,
      })?;

    let grant: TokenGrant = serde_json::from_value(payload)
      .map_err(|e| Error::Parse(format!("malformed token grant response: {}", e)))?;

    let expires_in = grant.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
    let token = ProviderToken {
      provider: provider.to_string(),
      access_token: grant.access_token,
      token_type: grant.token_type.unwrap_or_else(|| "bearer".to_string()),
      // refresh one margin early
      expires_at: now + expires_in * 1_000 - TOKEN_REFRESH_MARGIN_MS,
    };
    self.store.put_token(token.clone()).await?;

    Ok(BearerAuth { token: token.access_token, token_type: token.token_type })
  }
}

impl std::fmt::Debug for TokenManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenManager")
      .field("token_url", &self.token_url)
      .field("has_credentials", &self.credentials.is_some())
      .finish()
  }
}
