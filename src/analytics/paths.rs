//! Execution path counting.

use rustc_hash::FxHashSet;

use crate::graph::WorkflowGraph;

/// Count distinct start-to-sink execution paths, clamped at `cap`.
///
/// Depth-first over the outgoing adjacency with a per-path visited set
/// (an explicit stack rather than host recursion). Each terminated branch
/// is one path: a node with no outgoing edges is a sink, and a node
/// already on the current path counts as exactly one path instead of
/// recursing forever. That makes the result an approximation on cyclic
/// graphs, which is the intended trade for guaranteed termination.
///
/// Totals accumulate across all start nodes; a graph with no start node
/// has zero paths.
///
/// # Examples
///
/// ```rust
/// use flowlens::analytics::count_execution_paths;
/// use flowlens::definition::{EdgeSpec, NodeSpec};
/// use flowlens::graph::WorkflowGraph;
///
/// let nodes = vec![
///     NodeSpec::new("s", "start"),
///     NodeSpec::new("a", "model"),
///     NodeSpec::new("b", "model"),
/// ];
/// let edges = vec![EdgeSpec::new("e1", "s", "a"), EdgeSpec::new("e2", "s", "b")];
/// let graph = WorkflowGraph::build(&nodes, &edges);
/// assert_eq!(count_execution_paths(&graph, 1_000_000), 2);
/// ```
pub fn count_execution_paths(graph: &WorkflowGraph<'_>, cap: u64) -> u64 {
    let mut total = 0u64;
    let mut stack: Vec<(&str, FxHashSet<&str>)> = graph
        .start_ids()
        .map(|id| (id, FxHashSet::default()))
        .collect();

    while let Some((node, path)) = stack.pop() {
        if total >= cap {
            return cap;
        }

        let successors = graph.outgoing(node);
        if path.contains(node) || successors.is_empty() {
            total = total.saturating_add(1);
            continue;
        }

        let mut extended = path;
        extended.insert(node);
        for &next in successors {
            stack.push((next, extended.clone()));
        }
    }

    total.min(cap)
}
