//! Indexed, read-only view of a workflow graph.
//!
//! [`WorkflowGraph`] is built once per request from the raw node and edge
//! lists and borrowed by every validation and analytics pass. Construction
//! is O(N+E) and never fails: dangling edge endpoints are recorded in the
//! adjacency maps as-is so the validators can report precise referential
//! errors instead of this layer failing fast.
//!
//! The model is owned exclusively by the call that built it and is
//! immutable after construction; concurrent requests never share one.
//!
//! # Examples
//!
//! ```rust
//! use flowlens::definition::{EdgeSpec, NodeSpec};
//! use flowlens::graph::WorkflowGraph;
//!
//! let nodes = vec![NodeSpec::new("a", "start"), NodeSpec::new("b", "model")];
//! let edges = vec![EdgeSpec::new("e1", "a", "b")];
//! let graph = WorkflowGraph::build(&nodes, &edges);
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.outgoing("a"), ["b"]);
//! assert_eq!(graph.in_degree("b"), 1);
//! assert_eq!(graph.start_ids().collect::<Vec<_>>(), ["a"]);
//! ```

use rustc_hash::FxHashMap;

use crate::definition::{EdgeSpec, NodeSpec};
use crate::types::NodeType;

/// Indexed representation of a workflow graph.
///
/// Holds a node-by-id map, insertion-ordered node ids, and forward/reverse
/// adjacency. Borrows the caller's node and edge slices for its lifetime.
#[derive(Debug)]
pub struct WorkflowGraph<'a> {
    nodes_by_id: FxHashMap<&'a str, &'a NodeSpec>,
    /// Node ids in first-appearance order, one entry per distinct id.
    node_order: Vec<&'a str>,
    outgoing: FxHashMap<&'a str, Vec<&'a str>>,
    incoming: FxHashMap<&'a str, Vec<&'a str>>,
    edges: &'a [EdgeSpec],
}

impl<'a> WorkflowGraph<'a> {
    /// Build the indexed model from raw node and edge lists.
    ///
    /// Duplicate node ids keep the first occurrence (the validators flag
    /// the duplication itself). Edges referencing unknown ids still get
    /// adjacency entries; referential integrity is not checked here.
    pub fn build(nodes: &'a [NodeSpec], edges: &'a [EdgeSpec]) -> Self {
        let mut nodes_by_id: FxHashMap<&str, &NodeSpec> = FxHashMap::default();
        let mut node_order = Vec::with_capacity(nodes.len());
        for node in nodes {
            nodes_by_id.entry(node.id.as_str()).or_insert_with(|| {
                node_order.push(node.id.as_str());
                node
            });
        }

        let mut outgoing: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        let mut incoming: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for edge in edges {
            outgoing
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
            incoming
                .entry(edge.target.as_str())
                .or_default()
                .push(edge.source.as_str());
        }

        Self {
            nodes_by_id,
            node_order,
            outgoing,
            incoming,
            edges,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&'a NodeSpec> {
        self.nodes_by_id.get(id).copied()
    }

    /// Returns `true` if `id` names a node in this graph.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes_by_id.contains_key(id)
    }

    /// Nodes in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a NodeSpec> + '_ {
        self.node_order.iter().map(|id| self.nodes_by_id[id])
    }

    /// Node ids in first-appearance order.
    pub fn node_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.node_order.iter().copied()
    }

    /// The raw edge records this graph was built from.
    pub fn edges(&self) -> &'a [EdgeSpec] {
        self.edges
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    /// Number of edge records.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Targets of edges leaving `id`, in edge-list order.
    pub fn outgoing(&self, id: &str) -> &[&'a str] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources of edges entering `id`, in edge-list order.
    pub fn incoming(&self, id: &str) -> &[&'a str] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Out-degree of `id`.
    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing(id).len()
    }

    /// In-degree of `id`.
    pub fn in_degree(&self, id: &str) -> usize {
        self.incoming(id).len()
    }

    /// Ids of `start`-typed nodes, in first-appearance order.
    pub fn start_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.nodes()
            .filter(|n| n.is(&NodeType::Start))
            .map(|n| n.id.as_str())
    }

    /// Nodes of the given type, in first-appearance order.
    pub fn nodes_of_type(&self, kind: &NodeType) -> impl Iterator<Item = &'a NodeSpec> + '_ {
        let kind = kind.clone();
        self.nodes().filter(move |n| n.is(&kind))
    }

    /// Count of nodes of the given type.
    pub fn count_of_type(&self, kind: &NodeType) -> usize {
        self.nodes_of_type(kind).count()
    }
}
