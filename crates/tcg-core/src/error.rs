use thiserror::Error;

/// The main error type for tcg-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Missing or invalid configuration (fatal, never retried)
  #[error("Configuration error: {0}")]
  Config(String),

  /// OAuth2 grant failure (fatal for the current call)
  #[error("Authentication error: {0}")]
  Auth(String),

  /// Non-2xx response from the provider
  #[error("HTTP {status}: {body}")]
  Http { status: u16, body: String },

  /// Transport-level failure (connect, timeout, body read)
  #[error("Network error: {0}")]
  Network(String),

  /// Response body did not parse as the expected JSON
  #[error("Parse error: {0}")]
  Parse(String),

  /// Rate-limit wait would exceed the caller's deadline
  #[error("Rate limit wait exceeded deadline for provider {0}")]
  RateLimit(String),

  /// Underlying store failure surfaced through the gateway
  #[error("Store error: {0}")]
  Store(String),
}

impl Error {
  /// True for a 400 response, which batch callers skip per item
  /// instead of aborting the whole lookup.
  pub fn is_bad_request(&self) -> bool {
    matches!(self, Error::Http { status: 400, .. })
  }

  /// True for 5xx responses, which propagate to the chunk caller.
  pub fn is_server_error(&self) -> bool {
    matches!(self, Error::Http { status, .. } if *status >= 500)
  }
}

/// Result type alias for tcg-* crates
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display() {
    let err = Error::Http { status: 404, body: "not found".to_string() };
    assert_eq!(err.to_string(), "HTTP 404: not found");

    let err = Error::Config("TCGPLAYER_CLIENT_ID not set".to_string());
    assert!(err.to_string().contains("Configuration error"));
  }

  #[test]
  fn test_is_bad_request() {
    assert!(Error::Http { status: 400, body: String::new() }.is_bad_request());
    assert!(!Error::Http { status: 404, body: String::new() }.is_bad_request());
    assert!(!Error::Network("reset".to_string()).is_bad_request());
  }

  #[test]
  fn test_is_server_error() {
    assert!(Error::Http { status: 500, body: String::new() }.is_server_error());
    assert!(Error::Http { status: 503, body: String::new() }.is_server_error());
    assert!(!Error::Http { status: 400, body: String::new() }.is_server_error());
  }
}
