//! Per-session query client.

use std::sync::Arc;

use feed_cache::{CachePolicy, Placeholder, QueryCache, Resolution};
use feed_core::{ClientConfig, FeedPage, QueryKey, User, UsersKey};
use feed_data::SharedGateway;

/// Cached user list.
pub type UserList = Arc<Vec<User>>;

/// The query caches of one application session.
///
/// Created once per session; `clear` resets it. Cloning shares the caches.
#[derive(Clone)]
pub struct QueryClient {
    gateway: SharedGateway,
    users: QueryCache<UsersKey, UserList>,
    feed: QueryCache<QueryKey, FeedPage>,
}

impl QueryClient {
    /// Create a client with explicit cache policies.
    pub fn new(gateway: SharedGateway, users_policy: CachePolicy, feed_policy: CachePolicy) -> Self {
        Self {
            gateway,
            users: QueryCache::new("users", users_policy),
            feed: QueryCache::new("feed", feed_policy),
        }
    }

    /// Create a client using the staleness windows from `config`.
    pub fn from_config(gateway: SharedGateway, config: &ClientConfig) -> Self {
        Self::new(
            gateway,
            CachePolicy::new(config.users_stale_time()),
            CachePolicy::new(config.feed_stale_time()),
        )
    }

    pub fn gateway(&self) -> &SharedGateway {
        &self.gateway
    }

    pub fn users_cache(&self) -> &QueryCache<UsersKey, UserList> {
        &self.users
    }

    pub fn feed_cache(&self) -> &QueryCache<QueryKey, FeedPage> {
        &self.feed
    }

    /// Resolve the user list.
    pub fn resolve_users(&self) -> Resolution<UserList> {
        let gateway = Arc::clone(&self.gateway);
        self.users.resolve(
            &UsersKey,
            move || async move { gateway.users().await.map(Arc::new) },
            Placeholder::ClearOnNewKey,
        )
    }

    /// Resolve one feed page.
    pub fn resolve_feed(&self, key: &QueryKey, placeholder: Placeholder<'_, QueryKey>) -> Resolution<FeedPage> {
        let gateway = Arc::clone(&self.gateway);
        let request = key.clone();
        self.feed.resolve(
            key,
            move || async move { gateway.feed(&request).await.map(FeedPage::from) },
            placeholder,
        )
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.users.clear();
        self.feed.clear();
    }
}
