//! Structural complexity metrics.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::ComplexityWeights;
use crate::graph::WorkflowGraph;
use crate::types::NodeType;

/// Structural complexity measurements for a workflow graph.
///
/// `score` folds the other fields together with the weights in
/// [`ComplexityWeights`]; it is a heuristic ranking signal, not a formal
/// complexity measure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub score: u64,
    pub node_count: u64,
    pub edge_count: u64,
    /// Longest node count along any path from a start node. A linear
    /// chain of five nodes has depth 5; a graph with no start node has
    /// depth 0.
    pub depth: u64,
    /// Mean out-degree over nodes that have at least one outgoing edge;
    /// 0.0 when no node does.
    pub branching_factor: f64,
    pub loop_complexity: u64,
    pub conditional_complexity: u64,
}

/// Compute complexity metrics for a graph.
pub fn analyze_complexity(
    graph: &WorkflowGraph<'_>,
    weights: &ComplexityWeights,
) -> ComplexityMetrics {
    let node_count = graph.node_count() as u64;
    let edge_count = graph.edge_count() as u64;
    let depth = max_depth(graph);
    let branching_factor = branching_factor(graph);
    let loop_complexity = graph.count_of_type(&NodeType::Loop) as u64;
    let conditional_complexity = graph.count_of_type(&NodeType::Conditional) as u64;

    let score = node_count
        + edge_count
        + depth * weights.depth_weight
        + (branching_factor * weights.branching_weight as f64).floor() as u64
        + loop_complexity * weights.loop_weight
        + conditional_complexity * weights.conditional_weight;

    ComplexityMetrics {
        score,
        node_count,
        edge_count,
        depth,
        branching_factor,
        loop_complexity,
        conditional_complexity,
    }
}

/// Maximum path length (in nodes) from any start node.
///
/// Each stack frame carries its own copy of the path's visited set, so a
/// node revisited along a *different* branch still extends that branch,
/// while a revisit along the *same* path (a true cycle) terminates it.
/// An explicit stack keeps pathological graphs from exhausting the host
/// call stack.
fn max_depth(graph: &WorkflowGraph<'_>) -> u64 {
    let mut max = 0u64;
    let mut stack: Vec<(&str, FxHashSet<&str>)> = graph
        .start_ids()
        .map(|id| (id, FxHashSet::default()))
        .collect();

    while let Some((node, path)) = stack.pop() {
        let depth_here = path.len() as u64 + 1;
        max = max.max(depth_here);

        for &next in graph.outgoing(node) {
            if next == node || path.contains(next) {
                continue;
            }
            let mut extended = path.clone();
            extended.insert(node);
            stack.push((next, extended));
        }
    }

    max
}

fn branching_factor(graph: &WorkflowGraph<'_>) -> f64 {
    let mut branching_nodes = 0usize;
    let mut total_out = 0usize;
    for id in graph.node_ids() {
        let out = graph.out_degree(id);
        if out > 0 {
            branching_nodes += 1;
            total_out += out;
        }
    }
    if branching_nodes == 0 {
        0.0
    } else {
        total_out as f64 / branching_nodes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{EdgeSpec, NodeSpec};

    fn chain(len: usize) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
        let mut nodes = vec![NodeSpec::new("n0", "start")];
        let mut edges = Vec::new();
        for i in 1..len {
            nodes.push(NodeSpec::new(format!("n{i}"), "model"));
            edges.push(EdgeSpec::new(
                format!("e{i}"),
                format!("n{}", i - 1),
                format!("n{i}"),
            ));
        }
        (nodes, edges)
    }

    #[test]
    fn linear_chain_metrics() {
        let (nodes, edges) = chain(5);
        let graph = WorkflowGraph::build(&nodes, &edges);
        let metrics = analyze_complexity(&graph, &ComplexityWeights::default());
        assert_eq!(metrics.depth, 5);
        assert_eq!(metrics.branching_factor, 1.0);
        assert_eq!(metrics.node_count, 5);
        assert_eq!(metrics.edge_count, 4);
        // 5 + 4 + 5*2 + floor(1.0*10) + 0 + 0
        assert_eq!(metrics.score, 29);
    }

    #[test]
    fn no_start_means_zero_depth() {
        let nodes = vec![NodeSpec::new("a", "model"), NodeSpec::new("b", "tool")];
        let edges = vec![EdgeSpec::new("e", "a", "b")];
        let graph = WorkflowGraph::build(&nodes, &edges);
        let metrics = analyze_complexity(&graph, &ComplexityWeights::default());
        assert_eq!(metrics.depth, 0);
    }

    #[test]
    fn shared_descendant_does_not_truncate_depth() {
        // s -> a -> c -> d and s -> b -> c -> d: depth must reach 4 via
        // both branches even though c is shared.
        let nodes = vec![
            NodeSpec::new("s", "start"),
            NodeSpec::new("a", "model"),
            NodeSpec::new("b", "model"),
            NodeSpec::new("c", "tool"),
            NodeSpec::new("d", "tool"),
        ];
        let edges = vec![
            EdgeSpec::new("e1", "s", "a"),
            EdgeSpec::new("e2", "s", "b"),
            EdgeSpec::new("e3", "a", "c"),
            EdgeSpec::new("e4", "b", "c"),
            EdgeSpec::new("e5", "c", "d"),
        ];
        let graph = WorkflowGraph::build(&nodes, &edges);
        let metrics = analyze_complexity(&graph, &ComplexityWeights::default());
        assert_eq!(metrics.depth, 4);
    }

    #[test]
    fn cycle_terminates_depth_traversal() {
        let nodes = vec![NodeSpec::new("s", "start"), NodeSpec::new("a", "model")];
        let edges = vec![EdgeSpec::new("e1", "s", "a"), EdgeSpec::new("e2", "a", "s")];
        let graph = WorkflowGraph::build(&nodes, &edges);
        let metrics = analyze_complexity(&graph, &ComplexityWeights::default());
        assert_eq!(metrics.depth, 2);
    }

    #[test]
    fn branching_factor_ignores_sinks() {
        // s fans out to three sinks: only s has outgoing edges.
        let nodes = vec![
            NodeSpec::new("s", "start"),
            NodeSpec::new("a", "model"),
            NodeSpec::new("b", "model"),
            NodeSpec::new("c", "model"),
        ];
        let edges = vec![
            EdgeSpec::new("e1", "s", "a"),
            EdgeSpec::new("e2", "s", "b"),
            EdgeSpec::new("e3", "s", "c"),
        ];
        let graph = WorkflowGraph::build(&nodes, &edges);
        let metrics = analyze_complexity(&graph, &ComplexityWeights::default());
        assert_eq!(metrics.branching_factor, 3.0);
    }
}
