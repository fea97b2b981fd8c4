//! Content-addressed cache keys for workflow graphs.
//!
//! Two graphs that differ only in list ordering or presentational fields
//! (labels, positions) must hash identically, so the graph is first
//! reduced to a canonical structure: nodes sorted by id and stripped to
//! `(id, type, config)`, edges sorted by `(source, target)` and stripped
//! to `(source, target)`. `serde_json` keeps object keys sorted, which
//! makes the serialized form, and therefore the SHA-256 digest, stable.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::definition::{EdgeSpec, NodeSpec};

#[derive(Serialize)]
struct CanonicalNode<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: Option<&'a str>,
    config: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct CanonicalEdge<'a> {
    source: &'a str,
    target: &'a str,
}

#[derive(Serialize)]
struct CanonicalGraph<'a> {
    nodes: Vec<CanonicalNode<'a>>,
    edges: Vec<CanonicalEdge<'a>>,
}

/// Hex SHA-256 digest of the canonical form of a graph.
///
/// # Examples
///
/// ```rust
/// use flowlens::cache::graph_fingerprint;
/// use flowlens::definition::{EdgeSpec, NodeSpec};
///
/// let a = [NodeSpec::new("a", "start"), NodeSpec::new("b", "model")];
/// let b = [NodeSpec::new("b", "model"), NodeSpec::new("a", "start")];
/// let edges = [EdgeSpec::new("e1", "a", "b")];
///
/// // Node order does not affect the fingerprint.
/// assert_eq!(graph_fingerprint(&a, &edges), graph_fingerprint(&b, &edges));
/// ```
pub fn graph_fingerprint(nodes: &[NodeSpec], edges: &[EdgeSpec]) -> String {
    let mut canonical_nodes: Vec<CanonicalNode<'_>> = nodes
        .iter()
        .map(|n| CanonicalNode {
            id: &n.id,
            kind: n.node_type().map(|k| k.as_str()),
            config: &n.config,
        })
        .collect();
    canonical_nodes.sort_by(|a, b| a.id.cmp(b.id));

    let mut canonical_edges: Vec<CanonicalEdge<'_>> = edges
        .iter()
        .map(|e| CanonicalEdge {
            source: &e.source,
            target: &e.target,
        })
        .collect();
    canonical_edges.sort_by(|a, b| (a.source, a.target).cmp(&(b.source, b.target)));

    let canonical = CanonicalGraph {
        nodes: canonical_nodes,
        edges: canonical_edges,
    };
    // Serialization of in-memory structs cannot fail here; the canonical
    // types contain no non-string map keys or non-finite floats.
    let bytes = serde_json::to_vec(&canonical).expect("canonical graph serializes");

    let digest = Sha256::digest(&bytes);
    format!("{digest:x}")
}

/// Namespaced cache key for a graph: `"{namespace}:{fingerprint}"`.
pub fn cache_key(namespace: &str, nodes: &[NodeSpec], edges: &[EdgeSpec]) -> String {
    format!("{namespace}:{}", graph_fingerprint(nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edge_order_is_irrelevant() {
        let nodes = [NodeSpec::new("a", "start"), NodeSpec::new("b", "model")];
        let fwd = [EdgeSpec::new("e1", "a", "b"), EdgeSpec::new("e2", "b", "a")];
        let rev = [EdgeSpec::new("e2", "b", "a"), EdgeSpec::new("e1", "a", "b")];
        assert_eq!(graph_fingerprint(&nodes, &fwd), graph_fingerprint(&nodes, &rev));
    }

    #[test]
    fn presentational_fields_do_not_change_the_key() {
        let plain = [NodeSpec::new("a", "start")];
        let labeled = [NodeSpec::new("a", "start").with_label("Entry")];
        assert_eq!(graph_fingerprint(&plain, &[]), graph_fingerprint(&labeled, &[]));
    }

    #[test]
    fn config_changes_change_the_key() {
        let plain = [NodeSpec::new("m", "model")];
        let tuned = [NodeSpec::new("m", "model").with_config("temperature", json!(0.7))];
        assert_ne!(graph_fingerprint(&plain, &[]), graph_fingerprint(&tuned, &[]));
    }

    #[test]
    fn edge_ids_are_not_part_of_the_identity() {
        let nodes = [NodeSpec::new("a", "start"), NodeSpec::new("b", "model")];
        let e1 = [EdgeSpec::new("first", "a", "b")];
        let e2 = [EdgeSpec::new("second", "a", "b")];
        assert_eq!(graph_fingerprint(&nodes, &e1), graph_fingerprint(&nodes, &e2));
    }

    #[test]
    fn key_carries_namespace() {
        let key = cache_key("workflow-analytics", &[], &[]);
        assert!(key.starts_with("workflow-analytics:"));
        assert_eq!(key.len(), "workflow-analytics:".len() + 64);
    }
}
