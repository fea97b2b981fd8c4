//! Strict execution-readiness checking.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::{ExecutionReadiness, Findings, loop_lacks_bounds};
use crate::definition::{EdgeSpec, NodeSpec};
use crate::graph::WorkflowGraph;
use crate::types::NodeType;

/// Node count beyond which decomposition is suggested.
const DECOMPOSE_THRESHOLD: usize = 20;

/// Gate a workflow for execution.
///
/// Unlike [`validate_definition`](super::validate_definition), this
/// contract is strict: the graph must be non-empty and have exactly one
/// start node, and every edge endpoint must resolve. Orphaned nodes and
/// unbounded loops are surfaced as warnings, and oversized workflows get a
/// decomposition suggestion.
///
/// # Examples
///
/// ```rust
/// use flowlens::definition::{EdgeSpec, NodeSpec};
/// use flowlens::validate_for_execution;
///
/// let nodes = vec![
///     NodeSpec::new("s", "start"),
///     NodeSpec::new("m", "model"),
/// ];
/// let edges = vec![EdgeSpec::new("e1", "s", "m")];
/// let readiness = validate_for_execution(&nodes, &edges);
/// assert!(readiness.is_executable());
/// ```
pub fn validate_for_execution(nodes: &[NodeSpec], edges: &[EdgeSpec]) -> ExecutionReadiness {
    let mut findings = Findings::default();
    let graph = WorkflowGraph::build(nodes, edges);

    if nodes.is_empty() {
        findings.error("Workflow must have at least one node");
    }

    check_start_cardinality(nodes, &mut findings);
    check_edge_endpoints(edges, &graph, &mut findings);
    check_orphans(&graph, &mut findings);
    check_loop_bounds(&graph, &mut findings);

    if nodes.len() > DECOMPOSE_THRESHOLD {
        findings.suggestion(format!(
            "Workflow has {} nodes; consider decomposing it into smaller workflows",
            nodes.len()
        ));
    }

    debug!(
        errors = findings.errors.len(),
        warnings = findings.warnings.len(),
        suggestions = findings.suggestions.len(),
        "execution-readiness validation complete"
    );
    ExecutionReadiness {
        errors: findings.errors,
        warnings: findings.warnings,
        suggestions: findings.suggestions,
    }
}

fn check_start_cardinality(nodes: &[NodeSpec], findings: &mut Findings) {
    let start_count = nodes
        .iter()
        .filter(|n| n.node_type().is_some_and(|k| k.is_start()))
        .count();
    match start_count {
        0 if !nodes.is_empty() => findings.error("Workflow must have a start node"),
        0 | 1 => {}
        n => findings.error(format!(
            "Workflow has {n} start nodes; exactly one is required"
        )),
    }
}

fn check_edge_endpoints(edges: &[EdgeSpec], graph: &WorkflowGraph<'_>, findings: &mut Findings) {
    for (index, edge) in edges.iter().enumerate() {
        if edge.source.is_empty() {
            findings.error(format!(
                "Edge {} is missing a source",
                describe_edge(index, edge)
            ));
        } else if !graph.contains(&edge.source) {
            findings.error(format!(
                "Edge {} references unknown source node '{}'",
                describe_edge(index, edge),
                edge.source
            ));
        }

        if edge.target.is_empty() {
            findings.error(format!(
                "Edge {} is missing a target",
                describe_edge(index, edge)
            ));
        } else if !graph.contains(&edge.target) {
            findings.error(format!(
                "Edge {} references unknown target node '{}'",
                describe_edge(index, edge),
                edge.target
            ));
        }
    }
}

fn check_orphans(graph: &WorkflowGraph<'_>, findings: &mut Findings) {
    // An id can appear in adjacency through a dangling edge, so check
    // membership in the edge lists rather than degree on the graph alone.
    let mut connected: FxHashSet<&str> = FxHashSet::default();
    for edge in graph.edges() {
        connected.insert(edge.source.as_str());
        connected.insert(edge.target.as_str());
    }

    for node in graph.nodes() {
        let is_start = node.node_type().is_some_and(|k| k.is_start());
        if !is_start && !connected.contains(node.id.as_str()) {
            findings.warning(format!(
                "Orphaned node '{}' has no incoming or outgoing edges",
                node.id
            ));
        }
    }
}

fn check_loop_bounds(graph: &WorkflowGraph<'_>, findings: &mut Findings) {
    for node in graph.nodes_of_type(&NodeType::Loop) {
        if loop_lacks_bounds(node) {
            findings.warning(format!(
                "Loop node '{}' has no iteration bound or exit condition and may loop forever",
                node.id
            ));
        }
    }
}

fn describe_edge(index: usize, edge: &EdgeSpec) -> String {
    if edge.id.is_empty() {
        format!("at index {index}")
    } else {
        format!("'{}'", edge.id)
    }
}
