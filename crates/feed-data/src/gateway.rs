//! Gateway contract.

use std::sync::Arc;

use async_trait::async_trait;
use feed_core::{FeedError, FeedResponse, QueryKey, Report, User};

/// Read-only access to the remote feed API.
///
/// Ranking happens behind this trait; callers treat responses as opaque.
#[async_trait]
pub trait FeedGateway: Send + Sync {
    /// `GET /api/users`
    async fn users(&self) -> Result<Vec<User>, FeedError>;

    /// `GET /api/reports`
    async fn reports(&self) -> Result<Vec<Report>, FeedError>;

    /// `GET /api/feed` for one query key.
    async fn feed(&self, key: &QueryKey) -> Result<FeedResponse, FeedError>;
}

/// Convenient alias used by callers.
pub type SharedGateway = Arc<dyn FeedGateway>;
