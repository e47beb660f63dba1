//! Error types for gateway operations

use tcg_store::StoreError;
use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
  /// Upstream API failure (auth, rate limiting, HTTP, parsing)
  #[error("API error: {0}")]
  Api(#[from] tcg_core::Error),

  /// Pricing cache read or write failure
  #[error("Cache error: {0}")]
  Cache(#[from] StoreError),

  /// Caller passed ids or parameters that cannot be used
  #[error("Invalid input: {0}")]
  InvalidInput(String),
}
