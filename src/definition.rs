//! Raw workflow definition records as produced by editors and API layers.
//!
//! These are the plain structured inputs the engine consumes: a list of
//! [`NodeSpec`] and a list of [`EdgeSpec`], optionally wrapped in a
//! [`WorkflowDefinition`] when the surrounding document (its `name` and the
//! presence of the lists themselves) is being checked.
//!
//! The records are deliberately permissive: ids may be empty, types may be
//! missing, edges may dangle. Deciding what is wrong with a definition is
//! the job of [`crate::validation`], never of deserialization.
//!
//! # Examples
//!
//! ```rust
//! use flowlens::definition::{EdgeSpec, NodeSpec};
//! use serde_json::json;
//!
//! let start = NodeSpec::new("entry", "start");
//! let agent = NodeSpec::new("agent", "model")
//!     .with_config("model", json!("claude-sonnet"))
//!     .with_config("temperature", json!(0.2));
//! let edge = EdgeSpec::new("e1", "entry", "agent");
//!
//! assert_eq!(agent.config.get("temperature"), Some(&json!(0.2)));
//! assert_eq!(edge.source, "entry");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::NodeType;

/// Canvas coordinates attached by the visual editor. Ignored by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single node record in a workflow definition.
///
/// `kind` is optional because a malformed definition may omit the type;
/// the validators report that as an error rather than this type refusing
/// to exist. An empty `id` likewise models a missing id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub id: String,
    /// The node type, under the editor's `type` key.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeType>,
    /// Type-dependent configuration (model name, tool parameters,
    /// loop bounds, memory operation, ...).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
    /// Presentational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Presentational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NodeSpec {
    /// Create a node with an id and type.
    pub fn new(id: impl Into<String>, kind: impl Into<NodeType>) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    /// Create a node that is missing its type (for exercising validators).
    pub fn untyped(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Add an editor label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The node's type, or `None` when the definition omitted it.
    pub fn node_type(&self) -> Option<&NodeType> {
        self.kind.as_ref()
    }

    /// Returns `true` if this node has the given type.
    pub fn is(&self, kind: &NodeType) -> bool {
        self.kind.as_ref() == Some(kind)
    }
}

/// A directed edge record in a workflow definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    /// Optional edge type, under the editor's `type` key.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Guard expression, meaningful only on edges out of conditional nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl EdgeSpec {
    /// Create an edge between two node ids.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    /// Attach a guard condition.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// A full workflow document as submitted for definition-level validation.
///
/// Top-level fields are `Option` so the permissive checker can tell a
/// missing field (an error) apart from a present-but-empty one (at most a
/// warning). Deserializing `{}` yields all-`None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<NodeSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<EdgeSpec>>,
}

impl WorkflowDefinition {
    /// Create a definition with all three required fields present.
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<NodeSpec>,
        edges: Vec<EdgeSpec>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            nodes: Some(nodes),
            edges: Some(edges),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_editor_payload() {
        let raw = json!({
            "name": "support-agent",
            "nodes": [
                {"id": "s", "type": "start", "position": {"x": 0.0, "y": 10.0}},
                {"id": "m", "type": "model", "config": {"model": "claude"}},
                {"id": "x", "type": "webhook"}
            ],
            "edges": [
                {"id": "e1", "source": "s", "target": "m"}
            ]
        });
        let def: WorkflowDefinition = serde_json::from_value(raw).unwrap();
        let nodes = def.nodes.as_ref().unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].is(&NodeType::Start));
        assert_eq!(nodes[2].kind, Some(NodeType::Other("webhook".into())));
        assert_eq!(def.edges.as_ref().unwrap()[0].target, "m");
    }

    #[test]
    fn missing_fields_deserialize_to_none() {
        let def: WorkflowDefinition = serde_json::from_str("{}").unwrap();
        assert!(def.name.is_none());
        assert!(def.nodes.is_none());
        assert!(def.edges.is_none());
    }

    #[test]
    fn node_missing_type_is_representable() {
        let node: NodeSpec = serde_json::from_value(json!({"id": "n1"})).unwrap();
        assert!(node.node_type().is_none());
    }
}
