//! Feed Module - Upstream Earthquake Feed
//!
//! - `types` - Event model and feed errors
//! - `source` - `FeedSource` trait + HTTP implementation
//! - `cache` - TTL cache with retry and stale fallback

pub mod cache;
pub mod source;
pub mod types;

pub use cache::FeedCache;
pub use source::{FeedSource, HttpFeedSource};
pub use types::{FeedError, SeismicEvent};
