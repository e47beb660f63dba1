//! # tcg-client
//!
//! TCGplayer API client: HTTP transport, OAuth2 token management,
//! store-backed fixed-window rate limiting and list pagination.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tcg_client::TcgClient;
//! use tcg_core::Config;
//! use tcg_store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(MemoryStore::new());
//!     let client = TcgClient::new(&config, store.clone(), store)?;
//!
//!     let categories = client.catalog().categories().await?;
//!     println!("{} categories", categories.items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Pacing
//!
//! Every direct-mode request acquires a fixed-window rate-limit slot and a
//! valid bearer token before going out. Proxy-mode requests skip both; the
//! proxy front-end owns credentials and pacing.
//!
//! ## Error handling
//!
//! All methods return `Result<T, tcg_core::Error>`. The transport performs
//! no retries; callers choose their own policy.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod pagination;
pub mod rate_limit;
pub mod transport;

pub use auth::{BearerAuth, TokenManager};
pub use client::TcgClient;
pub use pagination::{fetch_all_pages, PageSet};
pub use rate_limit::{Acquire, FixedWindowLimiter};
pub use tcg_core::{Config, Error, Result};
pub use transport::Transport;
