//! Query cache counters for one session.

use std::fmt;

use feed_cache::CacheStats;
use serde::Serialize;

/// Counters of one query cache.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryMetrics {
    pub cache: String,
    pub fresh_hits: u64,
    pub joins: u64,
    pub fetches: u64,
    pub errors: u64,
}

impl QueryMetrics {
    pub fn new(cache: impl Into<String>, stats: CacheStats) -> Self {
        Self {
            cache: cache.into(),
            fresh_hits: stats.fresh_hits,
            joins: stats.joins,
            fetches: stats.fetches,
            errors: stats.errors,
        }
    }

    /// Resolves answered without a new fetch.
    pub fn hit_rate(&self) -> f64 {
        let served = self.fresh_hits + self.joins;
        let total = served + self.fetches;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }
}

impl fmt::Display for QueryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} fetches, {} fresh hits, {} joins, {} errors ({:.0}% served from cache)",
            self.cache,
            self.fetches,
            self.fresh_hits,
            self.joins,
            self.errors,
            self.hit_rate() * 100.0
        )
    }
}

/// Metrics for every cache of a session.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionMetrics {
    pub queries: Vec<QueryMetrics>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(mut self, cache: impl Into<String>, stats: CacheStats) -> Self {
        self.queries.push(QueryMetrics::new(cache, stats));
        self
    }

    pub fn total_fetches(&self) -> u64 {
        self.queries.iter().map(|q| q.fetches).sum()
    }

    /// Emit one `info` event per cache.
    pub fn log(&self) {
        for q in &self.queries {
            tracing::info!(
                cache = %q.cache,
                fetches = q.fetches,
                fresh_hits = q.fresh_hits,
                joins = q.joins,
                errors = q.errors,
                "query cache summary"
            );
        }
    }

    pub fn to_human(&self) -> String {
        self.queries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(fresh_hits: u64, joins: u64, fetches: u64, errors: u64) -> CacheStats {
        CacheStats {
            fresh_hits,
            joins,
            fetches,
            errors,
        }
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(QueryMetrics::new("feed", stats(0, 0, 0, 0)).hit_rate(), 0.0);
        assert_eq!(QueryMetrics::new("feed", stats(2, 1, 1, 0)).hit_rate(), 0.75);
    }

    #[test]
    fn test_session_summary() {
        let metrics = SessionMetrics::new()
            .with_cache("users", stats(3, 0, 1, 0))
            .with_cache("feed", stats(1, 1, 2, 1));
        assert_eq!(metrics.total_fetches(), 3);

        let human = metrics.to_human();
        assert!(human.starts_with("users: 1 fetches, 3 fresh hits"));
        assert!(human.contains("feed: 2 fetches, 1 fresh hits, 1 joins, 1 errors (50% served from cache)"));

        let json: serde_json::Value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["queries"][1]["cache"], "feed");
    }
}
