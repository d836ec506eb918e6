//! Cache policies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Staleness policy for one cache domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// How long a resolved entry is served without refetching.
    pub stale_time: Duration,
}

impl CachePolicy {
    /// Create a policy with the given staleness window.
    pub fn new(stale_time: Duration) -> Self {
        Self { stale_time }
    }

    /// Entries are stale as soon as they resolve; every resolve refetches.
    pub fn always_stale() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::always_stale()
    }
}

/// What to show for a key that has no resolved data yet.
#[derive(Debug, PartialEq, Eq)]
pub enum Placeholder<'a, K> {
    /// Show the last resolved value of the given key while the new key loads.
    KeepPrevious(&'a K),
    /// Show nothing until the new key resolves.
    ClearOnNewKey,
}

impl<K> Clone for Placeholder<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Placeholder<'_, K> {}

impl<'a, K> Placeholder<'a, K> {
    /// Keep-previous when a previous key exists, clear otherwise.
    pub fn keep_previous(previous: Option<&'a K>) -> Self {
        match previous {
            Some(key) => Self::KeepPrevious(key),
            None => Self::ClearOnNewKey,
        }
    }
}
