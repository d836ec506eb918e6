//! Cache entries and the state snapshots built from them.

use std::fmt;
use std::time::Duration;

use feed_core::FeedError;
use futures::future::{BoxFuture, Shared};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Result of one fetch.
pub type FetchResult<V> = Result<V, FeedError>;

/// Handle to a running fetch. Cloning joins the same request.
pub type InFlight<V> = Shared<BoxFuture<'static, FetchResult<V>>>;

/// Fetch status of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Never resolved.
    Pending,
    /// Holds data from a successful fetch.
    Resolved,
    /// The last fetch failed.
    Errored,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// A cached query result.
pub struct CacheEntry<V> {
    pub(crate) last_resolved: Option<V>,
    pub(crate) status: FetchStatus,
    pub(crate) error: Option<FeedError>,
    pub(crate) resolved_at: Option<Instant>,
    pub(crate) in_flight: Option<(u64, InFlight<V>)>,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new() -> Self {
        Self {
            last_resolved: None,
            status: FetchStatus::Pending,
            error: None,
            resolved_at: None,
            in_flight: None,
        }
    }

    /// Most recent successfully fetched value for this key.
    pub fn last_resolved(&self) -> Option<&V> {
        self.last_resolved.as_ref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Resolved and younger than `stale_time`.
    pub fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        self.status == FetchStatus::Resolved
            && self
                .resolved_at
                .is_some_and(|at| now.saturating_duration_since(at) < stale_time)
    }
}

impl<V: Clone> CacheEntry<V> {
    pub(crate) fn state(&self) -> QueryState<V> {
        QueryState {
            data: self.last_resolved.clone(),
            is_placeholder: false,
            status: self.status,
            is_fetching: self.is_fetching(),
            error: self.error.clone(),
        }
    }
}

impl<V: Clone> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            last_resolved: self.last_resolved.clone(),
            status: self.status,
            error: self.error.clone(),
            resolved_at: self.resolved_at,
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("last_resolved", &self.last_resolved)
            .field("status", &self.status)
            .field("error", &self.error)
            .field("resolved_at", &self.resolved_at)
            .field("fetching", &self.is_fetching())
            .finish()
    }
}

/// What a caller sees for one key at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<V> {
    /// Resolved data for the key, or placeholder data when `is_placeholder`.
    pub data: Option<V>,
    /// `data` belongs to a previous key.
    pub is_placeholder: bool,
    pub status: FetchStatus,
    /// A fetch for this key is running.
    pub is_fetching: bool,
    pub error: Option<FeedError>,
}

impl<V> QueryState<V> {
    /// Nothing to show at all (not even placeholder data) and a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.is_fetching
    }

    /// Idle state used when a query is disabled.
    pub fn idle() -> Self {
        Self {
            data: None,
            is_placeholder: false,
            status: FetchStatus::Pending,
            is_fetching: false,
            error: None,
        }
    }
}

impl<V> Default for QueryState<V> {
    fn default() -> Self {
        Self::idle()
    }
}
