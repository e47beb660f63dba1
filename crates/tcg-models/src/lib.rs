//! # tcg-models
//!
//! Shapes of TCGplayer provider responses and the logic that makes them
//! uniform. The provider mixes list-key conventions (`results`, `Results`,
//! `data`) and price-record layouts (flat SKU pricing vs. variant arrays);
//! everything downstream of the HTTP boundary goes through this crate so
//! field lookups are derived exactly once.

pub mod payload;
pub mod price;

pub use payload::{record_product_id, record_sku_id, result_list, TokenGrant};
pub use price::market_price;
