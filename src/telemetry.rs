//! Tracing subscriber setup for binaries and tests embedding the engine.
//!
//! The library itself only emits `tracing` events; installing a
//! subscriber is the embedding application's choice. This helper wires up
//! the common case: a formatted stderr subscriber filtered through
//! `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install a formatted stderr subscriber honoring `RUST_LOG`.
///
/// Falls back to the provided default filter when `RUST_LOG` is unset.
/// Safe to call more than once; later calls are no-ops.
///
/// # Examples
///
/// ```rust
/// flowlens::telemetry::init("flowlens=debug");
/// ```
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
