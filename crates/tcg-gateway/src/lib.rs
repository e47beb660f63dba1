//! # tcg-gateway
//!
//! The operation layer of the TCGplayer gateway. Sits on top of the
//! `tcg-client` HTTP client and the `tcg-store` pricing cache and owns
//! everything batch-shaped: chunking id lists to endpoint limits, pacing
//! between chunks, best-effort price refreshes and cache-backed price
//! reads.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tcg_client::TcgClient;
//! use tcg_core::Config;
//! use tcg_gateway::Gateway;
//! use tcg_store::MemoryStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let store = Arc::new(MemoryStore::new());
//! let client = TcgClient::new(&config, store.clone(), store.clone())?;
//! let gateway = Gateway::new(client, store);
//!
//! let outcome = gateway.refresh_product_prices(&[12345, 67890], 1).await?;
//! println!("refreshed {} of {}", outcome.upserted, outcome.requested);
//! # Ok(())
//! # }
//! ```

pub mod chunk;
pub mod error;
pub mod gateway;

pub use chunk::{clean_ids, fetch_in_chunks};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{Gateway, RefreshOutcome};
