mod common;

use std::sync::Arc;

use common::*;
use flowlens::cache::{InMemoryCache, graph_fingerprint};
use flowlens::definition::{EdgeSpec, NodeSpec};
use flowlens::engine::WorkflowAnalyzer;

fn sample_graph() -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
    let nodes = vec![
        NodeSpec::new("s", "start"),
        NodeSpec::new("m", "model"),
        NodeSpec::new("t", "tool"),
    ];
    let edges = vec![EdgeSpec::new("e1", "s", "m"), EdgeSpec::new("e2", "m", "t")];
    (nodes, edges)
}

#[tokio::test]
async fn second_identical_analysis_is_served_from_cache() {
    let cache = CountingCache::new();
    let analyzer = WorkflowAnalyzer::new().with_cache(cache.clone());
    let (nodes, edges) = sample_graph();

    let first = analyzer.analyze_cached(&nodes, &edges).await;
    assert_eq!(cache.get_count(), 1);
    assert_eq!(cache.hit_count(), 0);
    assert_eq!(cache.set_count(), 1);

    let second = analyzer.analyze_cached(&nodes, &edges).await;
    assert_eq!(second, first);
    assert_eq!(cache.get_count(), 2);
    assert_eq!(cache.hit_count(), 1);
    // No recomputation: the report was never stored a second time.
    assert_eq!(cache.set_count(), 1);
}

#[tokio::test]
async fn reordered_graph_hits_the_same_entry() {
    let cache = CountingCache::new();
    let analyzer = WorkflowAnalyzer::new().with_cache(cache.clone());
    let (nodes, edges) = sample_graph();

    analyzer.analyze_cached(&nodes, &edges).await;

    let mut shuffled_nodes = nodes.clone();
    shuffled_nodes.reverse();
    let mut shuffled_edges = edges.clone();
    shuffled_edges.reverse();

    analyzer.analyze_cached(&shuffled_nodes, &shuffled_edges).await;
    assert_eq!(cache.hit_count(), 1);
    assert_eq!(cache.set_count(), 1);
}

#[tokio::test]
async fn different_graphs_use_different_entries() {
    let cache = CountingCache::new();
    let analyzer = WorkflowAnalyzer::new().with_cache(cache.clone());
    let (nodes, edges) = sample_graph();

    analyzer.analyze_cached(&nodes, &edges).await;

    let mut altered = nodes.clone();
    altered.push(NodeSpec::new("extra", "variable"));
    analyzer.analyze_cached(&altered, &edges).await;

    assert_eq!(cache.hit_count(), 0);
    assert_eq!(cache.set_count(), 2);
}

#[tokio::test]
async fn broken_cache_never_breaks_analysis() {
    let analyzer = WorkflowAnalyzer::new().with_cache(Arc::new(BrokenCache));
    let plain = WorkflowAnalyzer::new();
    let (nodes, edges) = sample_graph();

    let report = analyzer.analyze_cached(&nodes, &edges).await;
    assert_eq!(report, plain.analyze(&nodes, &edges));
}

#[tokio::test]
async fn noop_default_recomputes_every_time() {
    let uncached = WorkflowAnalyzer::new();
    let (nodes, edges) = sample_graph();
    let a = uncached.analyze_cached(&nodes, &edges).await;
    let b = uncached.analyze_cached(&nodes, &edges).await;
    assert_eq!(a, b);
}

#[test]
fn fingerprint_is_stable_across_list_orderings() {
    let (nodes, edges) = sample_graph();
    let mut shuffled_nodes = nodes.clone();
    shuffled_nodes.swap(0, 2);
    let mut shuffled_edges = edges.clone();
    shuffled_edges.swap(0, 1);

    assert_eq!(
        graph_fingerprint(&nodes, &edges),
        graph_fingerprint(&shuffled_nodes, &shuffled_edges)
    );
}

#[test]
fn fingerprint_reflects_content() {
    let (nodes, edges) = sample_graph();
    let mut altered = nodes.clone();
    altered[1] = NodeSpec::new("m", "retrieval");
    assert_ne!(
        graph_fingerprint(&nodes, &edges),
        graph_fingerprint(&altered, &edges)
    );
}

#[tokio::test]
async fn expired_entry_forces_recomputation() {
    use chrono::TimeDelta;
    use flowlens::cache::AnalyticsCache;

    let backing = InMemoryCache::new();
    let analyzer = WorkflowAnalyzer::new();
    let (nodes, edges) = sample_graph();
    let key = analyzer.fingerprint(&nodes, &edges);

    let report = analyzer.analyze(&nodes, &edges);
    backing
        .set(&key, report, TimeDelta::seconds(-1))
        .await
        .unwrap();
    assert_eq!(backing.get(&key).await.unwrap(), None);
}
