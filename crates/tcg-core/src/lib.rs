pub mod clock;
pub mod config;
pub mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};

/// Provider key under which tokens, rate windows and cache rows are stored.
pub const PROVIDER: &str = "tcgplayer";

/// Base URL for the TCGplayer API
pub const TCGPLAYER_API_BASE: &str = "https://api.tcgplayer.com";

/// OAuth2 token grant endpoint
pub const TCGPLAYER_TOKEN_URL: &str = "https://api.tcgplayer.com/token";

/// Pinned API version used when TCGPLAYER_API_VERSION is unset
pub const DEFAULT_API_VERSION: &str = "v1.39.0";

/// A token is reusable only while `now + margin < expires_at`.
pub const TOKEN_REFRESH_MARGIN_MS: i64 = 60_000;

/// Fallback token lifetime (seconds) when the grant omits `expires_in`
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 1_209_599;

/// Provider quota: requests per fixed window
pub const DEFAULT_RATE_LIMIT: u32 = 10;
/// Fixed-window length in milliseconds
pub const DEFAULT_RATE_WINDOW_MS: i64 = 1_000;

/// Chunk sizes. SKU-by-product lookups hit a tighter provider limit than
/// pricing lookups, which only need to keep URLs short.
pub const SKU_CHUNK_SIZE: usize = 10;
pub const SKU_PRICE_CHUNK_SIZE: usize = 50;
pub const PRODUCT_PRICE_CHUNK_SIZE: usize = 100;
pub const PRODUCT_DETAIL_CHUNK_SIZE: usize = 100;

/// List-endpoint page size
pub const PAGE_SIZE: usize = 200;
/// Offset ceilings that stop a runaway provider from paging forever
pub const GROUPS_HARD_CAP_OFFSET: usize = 5_000;
pub const CATEGORIES_HARD_CAP_OFFSET: usize = 2_000;

/// Pacing delays, to avoid bursts even while under the nominal quota
pub const PAGE_DELAY_MS: u64 = 50;
pub const CHUNK_DELAY_MS: u64 = 100;
pub const ITEM_DELAY_MS: u64 = 50;

/// Write-conflict backoff for the shared rate-limit row
pub const CONFLICT_BACKOFF_BASE_MS: u64 = 5;
pub const CONFLICT_BACKOFF_CAP_MS: u64 = 300;
pub const CONFLICT_MAX_ATTEMPTS: u32 = 8;
