//! Structural bottleneck detection.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::WorkflowGraph;
use crate::types::{NodeType, Severity};

/// Total degree above which a node counts as a connectivity bottleneck.
const HIGH_DEGREE_THRESHOLD: usize = 5;
/// Total degree above which the connectivity finding escalates to high.
const SEVERE_DEGREE_THRESHOLD: usize = 10;
/// Minimum length for a sequential tool chain to be reported.
const TOOL_CHAIN_MIN_LEN: usize = 3;
/// Memory node count above which overall memory pressure is reported.
const MEMORY_NODE_LIMIT: usize = 10;

/// Synthetic node id for the graph-wide memory pressure finding.
pub const MEMORY_SYSTEM_ID: &str = "memory_system";

/// A structural pattern likely to limit throughput or maintainability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckInfo {
    /// The node the finding is anchored at, or [`MEMORY_SYSTEM_ID`] for
    /// the graph-wide memory finding.
    pub node_id: String,
    pub node_type: String,
    pub reason: String,
    pub severity: Severity,
    pub suggestions: Vec<String>,
}

/// Scan the graph for connectivity hot spots, serial tool chains, and
/// memory overuse. Findings come out in node-list order so identical
/// graphs always produce identical reports.
pub fn detect_bottlenecks(graph: &WorkflowGraph<'_>) -> Vec<BottleneckInfo> {
    let mut findings = Vec::new();
    detect_high_degree(graph, &mut findings);
    detect_tool_chains(graph, &mut findings);
    detect_memory_pressure(graph, &mut findings);
    findings
}

fn detect_high_degree(graph: &WorkflowGraph<'_>, findings: &mut Vec<BottleneckInfo>) {
    for node in graph.nodes() {
        let total = graph.in_degree(&node.id) + graph.out_degree(&node.id);
        if total <= HIGH_DEGREE_THRESHOLD {
            continue;
        }
        let severity = if total <= SEVERE_DEGREE_THRESHOLD {
            Severity::Medium
        } else {
            Severity::High
        };
        findings.push(BottleneckInfo {
            node_id: node.id.clone(),
            node_type: node
                .node_type()
                .map(|k| k.as_str().to_string())
                .unwrap_or_default(),
            reason: format!("High connectivity node ({total} connections)"),
            severity,
            suggestions: vec![
                "Split this node's responsibilities across multiple nodes".to_string(),
                "Review whether every connection is necessary".to_string(),
                "Consider running independent branches in parallel".to_string(),
            ],
        });
    }
}

/// Walks maximal runs of directly-connected tool nodes. A run keeps
/// extending while the current node has exactly one unvisited tool
/// successor; runs of [`TOOL_CHAIN_MIN_LEN`] or more are reported,
/// anchored at the run's first node.
fn detect_tool_chains(graph: &WorkflowGraph<'_>, findings: &mut Vec<BottleneckInfo>) {
    let mut visited: FxHashSet<&str> = FxHashSet::default();

    for node in graph.nodes() {
        if !node.is(&NodeType::Tool) || visited.contains(node.id.as_str()) {
            continue;
        }

        let mut length = 1usize;
        let mut current: &str = &node.id;
        visited.insert(current);

        loop {
            let mut next_tool = None;
            let mut candidates = 0usize;
            for &target in graph.outgoing(current) {
                let is_unvisited_tool = graph
                    .node(target)
                    .is_some_and(|n| n.is(&NodeType::Tool))
                    && !visited.contains(target);
                if is_unvisited_tool {
                    candidates += 1;
                    next_tool = Some(target);
                }
            }
            // A fork in the chain ends it; only a single continuation
            // keeps the run sequential.
            let Some(next) = next_tool.filter(|_| candidates == 1) else {
                break;
            };
            visited.insert(next);
            current = next;
            length += 1;
        }

        if length >= TOOL_CHAIN_MIN_LEN {
            findings.push(BottleneckInfo {
                node_id: node.id.clone(),
                node_type: NodeType::Tool.as_str().to_string(),
                reason: format!("Sequential tool chain of {length} nodes"),
                severity: Severity::Medium,
                suggestions: vec![
                    "Run independent tool calls in parallel".to_string(),
                    "Batch related tool calls into a single call".to_string(),
                    "Cache tool results that rarely change".to_string(),
                ],
            });
        }
    }
}

fn detect_memory_pressure(graph: &WorkflowGraph<'_>, findings: &mut Vec<BottleneckInfo>) {
    let memory_count = graph.count_of_type(&NodeType::Memory);
    if memory_count > MEMORY_NODE_LIMIT {
        findings.push(BottleneckInfo {
            node_id: MEMORY_SYSTEM_ID.to_string(),
            node_type: NodeType::Memory.as_str().to_string(),
            reason: format!("High memory usage ({memory_count} memory nodes)"),
            severity: Severity::Medium,
            suggestions: vec![
                "Consolidate overlapping memory nodes".to_string(),
                "Scope memory reads to what each step actually needs".to_string(),
            ],
        });
    }
}
