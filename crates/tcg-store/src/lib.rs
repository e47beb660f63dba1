//! # tcg-store
//!
//! Storage seams for the gateway's three shared records: provider tokens,
//! rate-limit windows and the pricing cache. The backing store is an
//! external collaborator; the gateway only assumes indexed point lookups
//! and optimistic-concurrency writes, expressed here as traits plus an
//! in-memory implementation used by tests and single-process deployments.

pub mod memory;
pub mod repository;
pub mod types;

pub use memory::MemoryStore;
pub use repository::{PriceCache, RateLimitStore, StoreError, TokenStore};
pub use types::{PriceCacheEntry, PriceUpsert, ProviderToken, RateLimitWindow};
