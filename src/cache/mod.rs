//! Result caching for the analytics pipeline.
//!
//! The cache is an injected capability, never a correctness dependency:
//! the engine treats every backend failure as a miss, recomputes, and
//! keeps going. Backends may be remote (the trait is async), so the
//! built-in implementations are a process-local [`InMemoryCache`] and the
//! default do-nothing [`NoopCache`].
//!
//! Keys are content-addressed: see [`graph_fingerprint`] for the
//! canonicalization rules.

mod key;
mod memory;

pub use key::{cache_key, graph_fingerprint};
pub use memory::{InMemoryCache, NoopCache};

use async_trait::async_trait;
use chrono::TimeDelta;
use miette::Diagnostic;
use thiserror::Error;

use crate::analytics::AnalyticsReport;

/// Failure talking to a cache backend.
///
/// These never propagate out of the engine; they are logged and treated
/// as a miss.
#[derive(Debug, Error, Diagnostic)]
pub enum CacheError {
    /// The backend could not be reached or answered with a transport
    /// failure.
    #[error("cache backend unavailable: {reason}")]
    #[diagnostic(code(flowlens::cache::unavailable))]
    Unavailable { reason: String },

    /// A stored entry could not be decoded as an analytics report.
    #[error("cache entry could not be decoded: {source}")]
    #[diagnostic(code(flowlens::cache::decode))]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

/// Storage for previously computed analytics reports.
///
/// Implementations only need blind `get`/`set` semantics; key derivation
/// and TTL policy belong to the caller. No at-most-one-computation
/// guarantee is expected of implementations: two concurrent analyses of
/// the same cold graph may both compute and both store.
#[async_trait]
pub trait AnalyticsCache: Send + Sync {
    /// Look up a report. `Ok(None)` means absent or expired.
    async fn get(&self, cache_key: &str) -> Result<Option<AnalyticsReport>, CacheError>;

    /// Store a report under `cache_key` for `ttl`.
    async fn set(
        &self,
        cache_key: &str,
        report: AnalyticsReport,
        ttl: TimeDelta,
    ) -> Result<(), CacheError>;
}
