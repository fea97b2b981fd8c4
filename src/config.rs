//! Tunable knobs for the analytics pipeline.
//!
//! The scoring weights and duration model below are deliberate heuristics,
//! not formal complexity measures. The defaults are the calibrated values
//! the rest of the pipeline (and its tests) assume; change them per
//! deployment, not per call.

use chrono::TimeDelta;

use crate::definition::NodeSpec;
use crate::types::NodeType;

/// Weights applied when folding [`ComplexityMetrics`](crate::analytics::ComplexityMetrics)
/// into the composite score.
///
/// `score = node_count + edge_count + depth * depth_weight
///        + floor(branching_factor * branching_weight)
///        + loop_complexity * loop_weight
///        + conditional_complexity * conditional_weight`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComplexityWeights {
    pub depth_weight: u64,
    pub branching_weight: u64,
    pub loop_weight: u64,
    pub conditional_weight: u64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            depth_weight: 2,
            branching_weight: 10,
            loop_weight: 5,
            conditional_weight: 3,
        }
    }
}

/// Per-node-type base costs (milliseconds) for the sequential worst-case
/// duration estimate attached to analytics reports.
///
/// `delay` nodes read their own `duration` config value and fall back to
/// [`delay_default_ms`](Self::delay_default_ms) when it is absent or not a
/// number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeCostModel {
    pub model_ms: u64,
    pub tool_ms: u64,
    pub retrieval_ms: u64,
    pub memory_ms: u64,
    pub conditional_ms: u64,
    pub variable_ms: u64,
    pub loop_ms: u64,
    pub error_handler_ms: u64,
    pub delay_default_ms: u64,
    pub unknown_ms: u64,
}

impl Default for NodeCostModel {
    fn default() -> Self {
        Self {
            model_ms: 1500,
            tool_ms: 400,
            retrieval_ms: 600,
            memory_ms: 50,
            conditional_ms: 5,
            variable_ms: 5,
            loop_ms: 25,
            error_handler_ms: 10,
            delay_default_ms: 1000,
            unknown_ms: 100,
        }
    }
}

impl NodeCostModel {
    /// Estimated cost of a single node in milliseconds.
    pub fn cost_for(&self, node: &NodeSpec) -> u64 {
        match node.node_type() {
            Some(NodeType::Start) => 0,
            Some(NodeType::Model) => self.model_ms,
            Some(NodeType::Tool) => self.tool_ms,
            Some(NodeType::Retrieval) => self.retrieval_ms,
            Some(NodeType::Memory) => self.memory_ms,
            Some(NodeType::Conditional) => self.conditional_ms,
            Some(NodeType::Variable) => self.variable_ms,
            Some(NodeType::Loop) => self.loop_ms,
            Some(NodeType::ErrorHandler) => self.error_handler_ms,
            Some(NodeType::Delay) => node
                .config
                .get("duration")
                .and_then(|v| v.as_u64())
                .unwrap_or(self.delay_default_ms),
            Some(NodeType::Other(_)) | None => self.unknown_ms,
        }
    }
}

/// Configuration for a [`WorkflowAnalyzer`](crate::engine::WorkflowAnalyzer).
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    /// Composite-score weights.
    pub weights: ComplexityWeights,
    /// Duration model for the report's execution-time estimate.
    pub costs: NodeCostModel,
    /// Upper bound on the execution-path count; totals beyond this are
    /// clamped, not rejected.
    pub path_cap: u64,
    /// How long cached analytics reports stay valid.
    pub cache_ttl: TimeDelta,
    /// Namespace prefixed onto cache keys so multiple engines can share
    /// one backend.
    pub cache_namespace: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            weights: ComplexityWeights::default(),
            costs: NodeCostModel::default(),
            path_cap: 1_000_000,
            cache_ttl: TimeDelta::hours(1),
            cache_namespace: "workflow-analytics".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delay_cost_reads_config_duration() {
        let costs = NodeCostModel::default();
        let delay = NodeSpec::new("d", "delay").with_config("duration", json!(2500));
        assert_eq!(costs.cost_for(&delay), 2500);

        let bare = NodeSpec::new("d2", "delay");
        assert_eq!(costs.cost_for(&bare), costs.delay_default_ms);

        let bad = NodeSpec::new("d3", "delay").with_config("duration", json!("soon"));
        assert_eq!(costs.cost_for(&bad), costs.delay_default_ms);
    }

    #[test]
    fn start_nodes_cost_nothing() {
        let costs = NodeCostModel::default();
        assert_eq!(costs.cost_for(&NodeSpec::new("s", "start")), 0);
    }
}
