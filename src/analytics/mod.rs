//! The analytics pipeline: complexity, bottlenecks, paths, risks, advice.
//!
//! [`analyze`] builds one [`WorkflowGraph`](crate::graph::WorkflowGraph)
//! and runs every pass over it:
//!
//! ```text
//! ComplexityAnalyzer ──┬─> OptimizationAdvisor ─┐
//! BottleneckDetector ──┤                        ├─> AnalyticsReport
//! PathCounter ─────────┤                        │
//! RiskAssessor ────────┴────────────────────────┘
//! ```
//!
//! Every pass is a pure function of the graph; the pipeline allocates all
//! derived state per call and shares nothing across requests. Result
//! caching is layered on from [`crate::engine`], not here.

pub mod advisor;
pub mod bottlenecks;
pub mod complexity;
pub mod paths;
pub mod risk;

pub use advisor::OptimizationSuggestion;
pub use bottlenecks::{BottleneckInfo, MEMORY_SYSTEM_ID};
pub use complexity::ComplexityMetrics;
pub use paths::count_execution_paths;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::definition::{EdgeSpec, NodeSpec};
use crate::graph::WorkflowGraph;

/// Aggregate analytics for one workflow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub complexity: ComplexityMetrics,
    pub bottlenecks: Vec<BottleneckInfo>,
    pub suggestions: Vec<OptimizationSuggestion>,
    /// Distinct start-to-sink paths, clamped at the configured cap.
    pub execution_paths: u64,
    /// Sequential worst-case duration estimate; absent for empty graphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_ms: Option<u64>,
    pub risk_factors: Vec<String>,
}

/// Run the full analytics pipeline over a raw node/edge list.
///
/// Pure and synchronous: identical input and configuration always yields
/// an identical report, and nothing outside the call is touched.
///
/// # Examples
///
/// ```rust
/// use flowlens::analytics::analyze;
/// use flowlens::config::AnalyzerConfig;
/// use flowlens::definition::{EdgeSpec, NodeSpec};
///
/// let nodes = vec![NodeSpec::new("s", "start"), NodeSpec::new("m", "model")];
/// let edges = vec![EdgeSpec::new("e1", "s", "m")];
/// let report = analyze(&nodes, &edges, &AnalyzerConfig::default());
///
/// assert_eq!(report.complexity.node_count, 2);
/// assert_eq!(report.execution_paths, 1);
/// ```
pub fn analyze(nodes: &[NodeSpec], edges: &[EdgeSpec], config: &AnalyzerConfig) -> AnalyticsReport {
    let graph = WorkflowGraph::build(nodes, edges);

    let complexity = complexity::analyze_complexity(&graph, &config.weights);
    let bottlenecks = bottlenecks::detect_bottlenecks(&graph);
    let execution_paths = paths::count_execution_paths(&graph, config.path_cap);
    let risk_factors = risk::assess_risks(&graph);
    let suggestions = advisor::advise(&graph, &complexity);
    let estimated_duration_ms = estimate_duration(&graph, config);

    debug!(
        score = complexity.score,
        bottlenecks = bottlenecks.len(),
        paths = execution_paths,
        risks = risk_factors.len(),
        "analytics pipeline complete"
    );

    AnalyticsReport {
        complexity,
        bottlenecks,
        suggestions,
        execution_paths,
        estimated_duration_ms,
        risk_factors,
    }
}

/// Sequential worst-case estimate: the sum of every node's base cost.
fn estimate_duration(graph: &WorkflowGraph<'_>, config: &AnalyzerConfig) -> Option<u64> {
    if graph.node_count() == 0 {
        return None;
    }
    Some(
        graph
            .nodes()
            .map(|n| config.costs.cost_for(n))
            .sum::<u64>(),
    )
}
