//! Heuristic risk assessment.

use rustc_hash::FxHashSet;

use crate::graph::WorkflowGraph;
use crate::types::NodeType;
use crate::validation::loop_lacks_bounds;

/// Node count above which a workflow with no error handler is flagged.
const COMPLEX_NODE_COUNT: usize = 5;
/// Store-vs-retrieve imbalance tolerated before flagging accumulation.
const MEMORY_IMBALANCE_TOLERANCE: usize = 2;
/// In- or out-degree above which a node is a single point of failure.
const SPOF_DEGREE: usize = 3;
/// Longest tolerated run of single-successor nodes.
const LONG_CHAIN_LIMIT: usize = 20;

/// Collect risk factors for a graph as human-readable strings.
///
/// Unbounded loops surface here *and* as execution-readiness warnings;
/// that duplication is intentional, since the two reports reach different
/// consumers.
pub fn assess_risks(graph: &WorkflowGraph<'_>) -> Vec<String> {
    let mut risks = Vec::new();

    for node in graph.nodes_of_type(&NodeType::Loop) {
        if loop_lacks_bounds(node) {
            risks.push(format!(
                "Potential infinite loop: node '{}' has no iteration bound or exit condition",
                node.id
            ));
        }
    }

    let handler_count = graph.count_of_type(&NodeType::ErrorHandler);
    if handler_count == 0 && graph.node_count() > COMPLEX_NODE_COUNT {
        risks.push(format!(
            "No error handling for complex workflow ({} nodes)",
            graph.node_count()
        ));
    }

    check_memory_accumulation(graph, &mut risks);

    for node in graph.nodes() {
        let fan_in = graph.in_degree(&node.id);
        let fan_out = graph.out_degree(&node.id);
        if fan_in > SPOF_DEGREE || fan_out > SPOF_DEGREE {
            risks.push(format!(
                "Node '{}' is a single point of failure ({fan_in} in, {fan_out} out)",
                node.id
            ));
        }
    }

    let chain = longest_single_successor_run(graph);
    if chain > LONG_CHAIN_LIMIT {
        risks.push(format!(
            "Very long sequential chain of {chain} nodes; failures roll back a lot of work"
        ));
    }

    risks
}

fn check_memory_accumulation(graph: &WorkflowGraph<'_>, risks: &mut Vec<String>) {
    let mut stores = 0usize;
    let mut retrieves = 0usize;
    for node in graph.nodes_of_type(&NodeType::Memory) {
        match node.config.get("operation").and_then(|v| v.as_str()) {
            Some("store") => stores += 1,
            Some("retrieve") => retrieves += 1,
            _ => {}
        }
    }
    if stores > retrieves + MEMORY_IMBALANCE_TOLERANCE {
        risks.push(format!(
            "Memory accumulation: {stores} store operations against {retrieves} retrievals"
        ));
    }
}

/// Length of the longest run of nodes that each have exactly one
/// successor. The walk only continues through out-degree-1 nodes and
/// guards against cycles, so it terminates on any graph.
fn longest_single_successor_run(graph: &WorkflowGraph<'_>) -> usize {
    let mut longest = 0usize;

    for start in graph.node_ids() {
        if graph.out_degree(start) != 1 {
            continue;
        }
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut current = start;
        let mut length = 0usize;
        while graph.out_degree(current) == 1 && seen.insert(current) {
            length += 1;
            current = graph.outgoing(current)[0];
        }
        longest = longest.max(length);
    }

    longest
}
