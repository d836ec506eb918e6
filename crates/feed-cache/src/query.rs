//! Keyed query cache with in-flight de-duplication.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use serde::Serialize;
use tokio::time::Instant;

use crate::entry::{CacheEntry, FetchResult, FetchStatus, InFlight, QueryState};
use crate::policy::{CachePolicy, Placeholder};

/// How a resolve call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveOutcome {
    /// Fresh cached data; the fetcher was not called.
    Fresh,
    /// Joined a fetch already running for the same key.
    Joined,
    /// Started a new fetch.
    Fetched,
}

impl fmt::Display for ResolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Joined => write!(f, "joined"),
            Self::Fetched => write!(f, "fetched"),
        }
    }
}

/// Result of [`QueryCache::resolve`].
pub struct Resolution<V> {
    /// State of the key right now, placeholder applied.
    pub state: QueryState<V>,
    /// Running fetch for the key, if any. Awaiting it settles the cache entry.
    pub fetch: Option<InFlight<V>>,
    pub outcome: ResolveOutcome,
}

/// Counters for cache decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub fresh_hits: u64,
    pub joins: u64,
    pub fetches: u64,
    pub errors: u64,
}

struct CacheInner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    next_fetch_id: u64,
    stats: CacheStats,
}

/// Query cache for one data domain.
///
/// Cloning yields another handle to the same entries. Locks are only held
/// for short synchronous sections, never across an await.
pub struct QueryCache<K, V> {
    name: &'static str,
    policy: CachePolicy,
    inner: Arc<Mutex<CacheInner<K, V>>>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            policy: self.policy,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache.
    pub fn new(name: &'static str, policy: CachePolicy) -> Self {
        Self {
            name,
            policy,
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                next_fetch_id: 0,
                stats: CacheStats::default(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Resolve `key`.
    ///
    /// A fresh entry is returned without calling `fetcher`. A running fetch
    /// for the same key is joined. Otherwise `fetcher` is called once and the
    /// returned handle settles the entry when awaited.
    pub fn resolve<F, Fut>(
        &self,
        key: &K,
        fetcher: F,
        placeholder: Placeholder<'_, K>,
    ) -> Resolution<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult<V>> + Send + 'static,
    {
        let mut guard = self.lock();
        let CacheInner {
            entries,
            next_fetch_id,
            stats,
        } = &mut *guard;
        let now = Instant::now();

        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);

        let (fetch, outcome) = if entry.is_fresh(now, self.policy.stale_time) {
            stats.fresh_hits += 1;
            (None, ResolveOutcome::Fresh)
        } else if let Some((_, running)) = &entry.in_flight {
            stats.joins += 1;
            (Some(running.clone()), ResolveOutcome::Joined)
        } else {
            let fetch_id = *next_fetch_id;
            *next_fetch_id += 1;
            stats.fetches += 1;

            let running = self.spawn_settle(key.clone(), fetch_id, fetcher());
            entry.in_flight = Some((fetch_id, running.clone()));
            entry.error = None;
            entry.status = if entry.last_resolved.is_some() {
                FetchStatus::Resolved
            } else {
                FetchStatus::Pending
            };
            (Some(running), ResolveOutcome::Fetched)
        };

        let mut state = entry.state();

        if state.data.is_none() {
            if let Placeholder::KeepPrevious(previous) = placeholder {
                if previous != key {
                    if let Some(data) = entries
                        .get(previous)
                        .and_then(|prev| prev.last_resolved.clone())
                    {
                        state.data = Some(data);
                        state.is_placeholder = true;
                    }
                }
            }
        }

        tracing::debug!(
            cache = self.name,
            key = %key,
            outcome = %outcome,
            placeholder = state.is_placeholder,
            "query resolved"
        );

        Resolution {
            state,
            fetch,
            outcome,
        }
    }

    /// Current state of `key` without triggering a fetch.
    pub fn state(&self, key: &K) -> QueryState<V> {
        self.lock()
            .entries
            .get(key)
            .map(CacheEntry::state)
            .unwrap_or_default()
    }

    /// Copy of the entry for `key`.
    pub fn peek(&self, key: &K) -> Option<CacheEntry<V>> {
        self.lock().entries.get(key).cloned()
    }

    /// Mark `key` stale so the next resolve refetches. Data is kept.
    pub fn invalidate(&self, key: &K) {
        if let Some(entry) = self.lock().entries.get_mut(key) {
            entry.resolved_at = None;
        }
    }

    /// Drop the entry for `key`. A fetch still running for it is not applied.
    pub fn remove(&self, key: &K) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Drop every entry and reset counters.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wrap a fetch so that completing it writes the result into the entry.
    fn spawn_settle<Fut>(&self, key: K, fetch_id: u64, fetch: Fut) -> InFlight<V>
    where
        Fut: Future<Output = FetchResult<V>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let name = self.name;

        async move {
            let result = fetch.await;
            settle(&inner, name, &key, fetch_id, &result);
            result
        }
        .boxed()
        .shared()
    }
}

fn settle<K, V>(
    inner: &Mutex<CacheInner<K, V>>,
    name: &'static str,
    key: &K,
    fetch_id: u64,
    result: &FetchResult<V>,
) where
    K: Eq + Hash + fmt::Display,
    V: Clone,
{
    let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
    let CacheInner { entries, stats, .. } = &mut *guard;

    let Some(entry) = entries.get_mut(key) else {
        tracing::debug!(cache = name, key = %key, "entry removed while fetching, result dropped");
        return;
    };
    if !matches!(&entry.in_flight, Some((id, _)) if *id == fetch_id) {
        tracing::debug!(cache = name, key = %key, "superseded fetch settled, result dropped");
        return;
    }

    entry.in_flight = None;
    match result {
        Ok(value) => {
            entry.last_resolved = Some(value.clone());
            entry.status = FetchStatus::Resolved;
            entry.error = None;
            entry.resolved_at = Some(Instant::now());
        }
        Err(e) => {
            stats.errors += 1;
            entry.status = FetchStatus::Errored;
            entry.error = Some(e.clone());
            tracing::warn!(cache = name, key = %key, error = %e, "fetch failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use feed_core::FeedError;
    use tokio::sync::oneshot;

    use super::*;

    fn counting_fetcher(
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> impl FnOnce() -> futures::future::Ready<FetchResult<u32>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(Ok(value))
        }
    }

    fn cache(stale_secs: u64) -> QueryCache<String, u32> {
        QueryCache::new("test", CachePolicy::new(Duration::from_secs(stale_secs)))
    }

    #[tokio::test]
    async fn test_fresh_entry_skips_fetcher() {
        let cache = cache(60);
        let calls = Arc::new(AtomicUsize::new(0));
        let key = "a".to_string();

        let first = cache.resolve(&key, counting_fetcher(&calls, 1), Placeholder::ClearOnNewKey);
        assert_eq!(first.outcome, ResolveOutcome::Fetched);
        assert!(first.state.is_loading());
        assert_eq!(first.fetch.unwrap().await, Ok(1));

        let second = cache.resolve(&key, counting_fetcher(&calls, 2), Placeholder::ClearOnNewKey);
        assert_eq!(second.outcome, ResolveOutcome::Fresh);
        assert!(second.fetch.is_none());
        assert_eq!(second.state.data, Some(1));
        assert!(!second.state.is_fetching);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_join_one_fetch() {
        let cache = cache(60);
        let calls = Arc::new(AtomicUsize::new(0));
        let key = "a".to_string();
        let (tx, rx) = oneshot::channel::<u32>();

        let first = cache.resolve(
            &key,
            {
                let calls = Arc::clone(&calls);
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { rx.await.map_err(|_| FeedError::transport("dropped")) }
                }
            },
            Placeholder::ClearOnNewKey,
        );
        let second = cache.resolve(&key, counting_fetcher(&calls, 99), Placeholder::ClearOnNewKey);

        assert_eq!(second.outcome, ResolveOutcome::Joined);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tx.send(7).unwrap();
        let (a, b) = futures::join!(first.fetch.unwrap(), second.fetch.unwrap());
        assert_eq!(a, Ok(7));
        assert_eq!(b, Ok(7));
        assert_eq!(cache.state(&key).data, Some(7));
        assert_eq!(cache.stats().joins, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_refetches_and_keeps_data() {
        let cache = cache(30);
        let calls = Arc::new(AtomicUsize::new(0));
        let key = "a".to_string();

        let first = cache.resolve(&key, counting_fetcher(&calls, 1), Placeholder::ClearOnNewKey);
        first.fetch.unwrap().await.unwrap();

        tokio::time::advance(Duration::from_secs(29)).await;
        let fresh = cache.resolve(&key, counting_fetcher(&calls, 2), Placeholder::ClearOnNewKey);
        assert_eq!(fresh.outcome, ResolveOutcome::Fresh);

        tokio::time::advance(Duration::from_secs(2)).await;
        let stale = cache.resolve(&key, counting_fetcher(&calls, 2), Placeholder::ClearOnNewKey);
        assert_eq!(stale.outcome, ResolveOutcome::Fetched);
        // Previous value stays visible while revalidating.
        assert_eq!(stale.state.data, Some(1));
        assert!(stale.state.is_fetching);
        assert!(!stale.state.is_loading());

        stale.fetch.unwrap().await.unwrap();
        assert_eq!(cache.state(&key).data, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_keys_are_independent() {
        let cache = cache(60);
        let calls = Arc::new(AtomicUsize::new(0));
        let a = "a".to_string();
        let b = "b".to_string();

        cache
            .resolve(&a, counting_fetcher(&calls, 1), Placeholder::ClearOnNewKey)
            .fetch
            .unwrap()
            .await
            .unwrap();
        let before = cache.peek(&a).unwrap();

        let failing = cache.resolve(
            &b,
            || async { Err::<u32, _>(FeedError::from_response(500, "boom")) },
            Placeholder::ClearOnNewKey,
        );
        assert!(failing.fetch.unwrap().await.is_err());

        let after = cache.peek(&a).unwrap();
        assert_eq!(after.last_resolved(), before.last_resolved());
        assert_eq!(after.status(), FetchStatus::Resolved);
        assert_eq!(cache.state(&b).status, FetchStatus::Errored);
        assert_eq!(
            cache.state(&b).error.map(|e| e.to_string()),
            Some("boom".to_string())
        );
    }

    #[tokio::test]
    async fn test_keep_previous_placeholder() {
        let cache = cache(60);
        let calls = Arc::new(AtomicUsize::new(0));
        let a = "a".to_string();
        let b = "b".to_string();

        cache
            .resolve(&a, counting_fetcher(&calls, 1), Placeholder::ClearOnNewKey)
            .fetch
            .unwrap()
            .await
            .unwrap();

        let kept = cache.resolve(&b, counting_fetcher(&calls, 2), Placeholder::KeepPrevious(&a));
        assert_eq!(kept.state.data, Some(1));
        assert!(kept.state.is_placeholder);
        assert!(!kept.state.is_loading());
        kept.fetch.unwrap().await.unwrap();

        let c = "c".to_string();
        let cleared = cache.resolve(&c, counting_fetcher(&calls, 3), Placeholder::ClearOnNewKey);
        assert!(cleared.state.data.is_none());
        assert!(cleared.state.is_loading());
    }

    #[tokio::test]
    async fn test_error_then_refetch_on_next_resolve() {
        let cache = cache(60);
        let key = "a".to_string();

        let failed = cache.resolve(
            &key,
            || async { Err::<u32, _>(FeedError::transport("offline")) },
            Placeholder::ClearOnNewKey,
        );
        let _ = failed.fetch.unwrap().await;
        assert_eq!(cache.state(&key).status, FetchStatus::Errored);

        let retry = cache.resolve(&key, || async { Ok(5) }, Placeholder::ClearOnNewKey);
        assert_eq!(retry.outcome, ResolveOutcome::Fetched);
        assert!(retry.state.error.is_none());
        retry.fetch.unwrap().await.unwrap();
        assert_eq!(cache.state(&key).data, Some(5));
        assert_eq!(cache.stats().errors, 1);
    }

    #[tokio::test]
    async fn test_removed_entry_ignores_late_result() {
        let cache = cache(60);
        let key = "a".to_string();
        let (tx, rx) = oneshot::channel::<u32>();

        let pending = cache.resolve(
            &key,
            move || async move { rx.await.map_err(|_| FeedError::transport("dropped")) },
            Placeholder::ClearOnNewKey,
        );
        assert!(cache.remove(&key));

        tx.send(3).unwrap();
        assert_eq!(pending.fetch.unwrap().await, Ok(3));
        assert!(cache.peek(&key).is_none());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = cache(60);
        let calls = Arc::new(AtomicUsize::new(0));
        let key = "a".to_string();

        cache
            .resolve(&key, counting_fetcher(&calls, 1), Placeholder::ClearOnNewKey)
            .fetch
            .unwrap()
            .await
            .unwrap();
        cache.invalidate(&key);

        let again = cache.resolve(&key, counting_fetcher(&calls, 2), Placeholder::ClearOnNewKey);
        assert_eq!(again.outcome, ResolveOutcome::Fetched);
        assert_eq!(again.state.data, Some(1));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
