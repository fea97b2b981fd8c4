//! High-level entry point combining configuration, the analytics
//! pipeline, and the optional result cache.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::analytics::{self, AnalyticsReport};
use crate::cache::{AnalyticsCache, NoopCache, cache_key};
use crate::config::AnalyzerConfig;
use crate::definition::{EdgeSpec, NodeSpec};

/// Analyzes workflow graphs, optionally memoizing reports in an injected
/// cache backend.
///
/// The analyzer itself is stateless between calls: every analysis builds
/// its own indexed graph and derived structures, so one instance can be
/// shared freely across threads and concurrent requests.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use flowlens::cache::InMemoryCache;
/// use flowlens::definition::{EdgeSpec, NodeSpec};
/// use flowlens::engine::WorkflowAnalyzer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let analyzer = WorkflowAnalyzer::new().with_cache(Arc::new(InMemoryCache::new()));
///
/// let nodes = vec![NodeSpec::new("s", "start"), NodeSpec::new("m", "model")];
/// let edges = vec![EdgeSpec::new("e1", "s", "m")];
///
/// let report = analyzer.analyze_cached(&nodes, &edges).await;
/// assert_eq!(report.complexity.depth, 2);
///
/// // Identical graph, second call served from the cache.
/// let again = analyzer.analyze_cached(&nodes, &edges).await;
/// assert_eq!(again, report);
/// # }
/// ```
pub struct WorkflowAnalyzer {
    config: AnalyzerConfig,
    cache: Arc<dyn AnalyticsCache>,
}

impl Default for WorkflowAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowAnalyzer {
    /// Create an analyzer with default configuration and no caching.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            cache: Arc::new(NoopCache),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a cache backend.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn AnalyticsCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The cache key this analyzer would use for a graph.
    pub fn fingerprint(&self, nodes: &[NodeSpec], edges: &[EdgeSpec]) -> String {
        cache_key(&self.config.cache_namespace, nodes, edges)
    }

    /// Run the analytics pipeline, bypassing the cache entirely.
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn analyze(&self, nodes: &[NodeSpec], edges: &[EdgeSpec]) -> AnalyticsReport {
        analytics::analyze(nodes, edges, &self.config)
    }

    /// Run the analytics pipeline behind the cache.
    ///
    /// A backend failure on either `get` or `set` is logged and otherwise
    /// ignored: the caller always receives a correct, freshly computed
    /// report on any cache trouble. Concurrent calls for the same cold
    /// key may each compute; last write wins.
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub async fn analyze_cached(&self, nodes: &[NodeSpec], edges: &[EdgeSpec]) -> AnalyticsReport {
        let key = self.fingerprint(nodes, edges);

        match self.cache.get(&key).await {
            Ok(Some(report)) => {
                debug!(%key, "analytics cache hit");
                return report;
            }
            Ok(None) => debug!(%key, "analytics cache miss"),
            Err(error) => warn!(%key, %error, "cache lookup failed; recomputing"),
        }

        let report = analytics::analyze(nodes, edges, &self.config);

        if let Err(error) = self
            .cache
            .set(&key, report.clone(), self.config.cache_ttl)
            .await
        {
            warn!(%key, %error, "failed to store analytics report in cache");
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;

    #[test]
    fn fingerprint_is_namespaced() {
        let analyzer = WorkflowAnalyzer::new();
        let key = analyzer.fingerprint(&[], &[]);
        assert!(key.starts_with("workflow-analytics:"));
    }

    #[tokio::test]
    async fn cached_and_uncached_reports_agree() {
        let analyzer = WorkflowAnalyzer::new().with_cache(Arc::new(InMemoryCache::new()));
        let nodes = vec![NodeSpec::new("s", "start"), NodeSpec::new("t", "tool")];
        let edges = vec![EdgeSpec::new("e", "s", "t")];

        let direct = analyzer.analyze(&nodes, &edges);
        let cached = analyzer.analyze_cached(&nodes, &edges).await;
        assert_eq!(direct, cached);
    }
}
