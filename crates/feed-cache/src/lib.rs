//! Query cache for the personalized feed client.
//!
//! This crate provides:
//! - `QueryCache` - Keyed result cache with in-flight request de-duplication
//! - `CachePolicy` - Per-domain staleness window
//! - `Placeholder` - Explicit keep-previous / clear-on-new-key policy
//! - `QueryState` - Snapshot handed to callers (data, loading, fetching, error)
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use feed_cache::{CachePolicy, Placeholder, QueryCache};
//!
//! let cache = QueryCache::new("feed", CachePolicy::new(Duration::from_secs(30)));
//! let resolution = cache.resolve(&key, || gateway_call(), Placeholder::ClearOnNewKey);
//! if let Some(fetch) = resolution.fetch {
//!     let _ = fetch.await;
//! }
//! ```

mod entry;
mod policy;
mod query;

pub use entry::*;
pub use policy::*;
pub use query::*;
