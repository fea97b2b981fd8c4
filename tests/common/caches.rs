use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::TimeDelta;
use flowlens::analytics::AnalyticsReport;
use flowlens::cache::{AnalyticsCache, CacheError, InMemoryCache};

/// Wraps an [`InMemoryCache`] and counts gets, hits, and sets, so tests
/// can prove whether the pipeline recomputed.
#[derive(Default)]
pub struct CountingCache {
    inner: InMemoryCache,
    pub gets: AtomicUsize,
    pub hits: AtomicUsize,
    pub sets: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalyticsCache for CountingCache {
    async fn get(&self, cache_key: &str) -> Result<Option<AnalyticsReport>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let found = self.inner.get(cache_key).await?;
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(found)
    }

    async fn set(
        &self,
        cache_key: &str,
        report: AnalyticsReport,
        ttl: TimeDelta,
    ) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(cache_key, report, ttl).await
    }
}

/// A backend that fails every call, for exercising the cache-is-optional
/// guarantee.
pub struct BrokenCache;

#[async_trait]
impl AnalyticsCache for BrokenCache {
    async fn get(&self, _cache_key: &str) -> Result<Option<AnalyticsReport>, CacheError> {
        Err(CacheError::Unavailable {
            reason: "backend down".to_string(),
        })
    }

    async fn set(
        &self,
        _cache_key: &str,
        _report: AnalyticsReport,
        _ttl: TimeDelta,
    ) -> Result<(), CacheError> {
        Err(CacheError::Unavailable {
            reason: "backend down".to_string(),
        })
    }
}
