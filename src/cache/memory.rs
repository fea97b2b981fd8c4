//! Built-in cache backends.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rustc_hash::FxHashMap;

use super::{AnalyticsCache, CacheError};
use crate::analytics::AnalyticsReport;

/// The default backend: caches nothing, so every analysis recomputes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCache;

#[async_trait]
impl AnalyticsCache for NoopCache {
    async fn get(&self, _cache_key: &str) -> Result<Option<AnalyticsReport>, CacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _cache_key: &str,
        _report: AnalyticsReport,
        _ttl: TimeDelta,
    ) -> Result<(), CacheError> {
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct Entry {
    report: AnalyticsReport,
    expires_at: DateTime<Utc>,
}

/// Process-local cache with per-entry time-to-live.
///
/// Expired entries are dropped lazily: a `get` that finds a stale entry
/// removes it and reports a miss. The mutex is only held for map access,
/// never across an await point.
///
/// # Examples
///
/// ```rust
/// use chrono::TimeDelta;
/// use flowlens::cache::{AnalyticsCache, InMemoryCache};
/// # use flowlens::analytics::analyze;
/// # use flowlens::config::AnalyzerConfig;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = InMemoryCache::new();
/// let report = analyze(&[], &[], &AnalyzerConfig::default());
///
/// cache.set("k", report.clone(), TimeDelta::hours(1)).await.unwrap();
/// assert_eq!(cache.get("k").await.unwrap(), Some(report));
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<FxHashMap<String, Entry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }
}

#[async_trait]
impl AnalyticsCache for InMemoryCache {
    async fn get(&self, cache_key: &str) -> Result<Option<AnalyticsReport>, CacheError> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(cache_key) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(Some(entry.report.clone())),
            Some(_) => {
                entries.remove(cache_key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        cache_key: &str,
        report: AnalyticsReport,
        ttl: TimeDelta,
    ) -> Result<(), CacheError> {
        let entry = Entry {
            report,
            expires_at: Utc::now() + ttl,
        };
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(cache_key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::analyze;
    use crate::config::AnalyzerConfig;

    fn sample_report() -> AnalyticsReport {
        analyze(&[], &[], &AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn stores_and_returns_within_ttl() {
        let cache = InMemoryCache::new();
        cache
            .set("k", sample_report(), TimeDelta::hours(1))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(sample_report()));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_misses() {
        let cache = InMemoryCache::new();
        cache
            .set("k", sample_report(), TimeDelta::seconds(-1))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn noop_cache_never_hits() {
        let cache = NoopCache;
        cache
            .set("k", sample_report(), TimeDelta::hours(1))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }
}
