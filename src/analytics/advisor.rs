//! Rule-driven optimization advice.
//!
//! The metric-driven rules live in a declarative table rather than a
//! cascade of conditionals: every rule whose predicate matches emits, in
//! table order, and adding a rule never touches control flow. Two
//! candidate scans over the graph itself (parallelizable siblings,
//! cacheable nodes) follow the table.

use serde::{Deserialize, Serialize};

use super::complexity::ComplexityMetrics;
use crate::graph::WorkflowGraph;
use crate::types::{Impact, NodeType};

/// An advisory emitted by the optimization rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    /// Machine-readable category, under the editor's `type` key.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub impact: Impact,
    /// Nodes the suggestion applies to, when it targets specific nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_ids: Option<Vec<String>>,
}

struct Rule {
    applies: fn(&ComplexityMetrics) -> bool,
    kind: &'static str,
    description: &'static str,
    impact: Impact,
}

const RULES: &[Rule] = &[
    Rule {
        applies: |m| m.score > 100,
        kind: "decomposition",
        description: "Workflow is highly complex; decompose it into smaller reusable components",
        impact: Impact::High,
    },
    Rule {
        applies: |m| m.depth > 15,
        kind: "parallelization",
        description: "Execution path is very deep; parallelize independent stages where possible",
        impact: Impact::Medium,
    },
    Rule {
        applies: |m| m.branching_factor > 3.0,
        kind: "consolidation",
        description: "High fan-out; consolidate similar branches",
        impact: Impact::Medium,
    },
    Rule {
        applies: |m| m.loop_complexity > 5,
        kind: "loop-optimization",
        description: "Many loops; ensure every loop has an exit condition and consider batching iterations",
        impact: Impact::High,
    },
];

/// Types whose nodes do real work and are worth parallelizing or caching.
const WORKLOAD_TYPES: &[NodeType] = &[NodeType::Tool, NodeType::Model, NodeType::Retrieval];

/// Evaluate every optimization rule against the metrics, then scan the
/// graph for parallelization and caching candidates.
pub fn advise(
    graph: &WorkflowGraph<'_>,
    metrics: &ComplexityMetrics,
) -> Vec<OptimizationSuggestion> {
    let mut suggestions: Vec<OptimizationSuggestion> = RULES
        .iter()
        .filter(|rule| (rule.applies)(metrics))
        .map(|rule| OptimizationSuggestion {
            kind: rule.kind.to_string(),
            description: rule.description.to_string(),
            impact: rule.impact,
            node_ids: None,
        })
        .collect();

    let parallel = parallelizable_siblings(graph);
    if !parallel.is_empty() {
        suggestions.push(OptimizationSuggestion {
            kind: "parallelization".to_string(),
            description: "These nodes share a parent and can run concurrently".to_string(),
            impact: Impact::Medium,
            node_ids: Some(parallel),
        });
    }

    let cacheable = cacheable_nodes(graph);
    if !cacheable.is_empty() {
        suggestions.push(OptimizationSuggestion {
            kind: "caching".to_string(),
            description: "Cache outputs of model, tool, and retrieval nodes whose inputs repeat"
                .to_string(),
            impact: Impact::Low,
            node_ids: Some(cacheable),
        });
    }

    suggestions
}

/// Workload nodes that sit as siblings (two or more) under one parent.
fn parallelizable_siblings(graph: &WorkflowGraph<'_>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for parent in graph.node_ids() {
        let siblings: Vec<&str> = graph
            .outgoing(parent)
            .iter()
            .copied()
            .filter(|&child| {
                graph
                    .node(child)
                    .and_then(|n| n.node_type())
                    .is_some_and(|k| WORKLOAD_TYPES.contains(k))
            })
            .collect();
        if siblings.len() < 2 {
            continue;
        }
        for id in siblings {
            if !candidates.iter().any(|c| c == id) {
                candidates.push(id.to_string());
            }
        }
    }

    candidates
}

fn cacheable_nodes(graph: &WorkflowGraph<'_>) -> Vec<String> {
    graph
        .nodes()
        .filter(|n| n.node_type().is_some_and(|k| WORKLOAD_TYPES.contains(k)))
        .map(|n| n.id.clone())
        .collect()
}
